use super::defang::defang;
use super::mrkdwn::{self, BULLET, FIELD_SEPARATOR};
use super::timestamp::format_timestamp;
use crate::lookup::domain::{Attribute, Event, IndicatorQuery, MispObject, SearchResult};
use crate::lookup::policies::AttributeFilter;

/// Reply when the search failed or returned something other than a list
pub const ERROR_REPORT: &str = "*Error parsing MISP results*";

/// Reply when the search returned an empty list
pub const NO_RESULTS: &str = "No results found";

const PUBLISHED: &str = "Published";
const IDS: &str = "IDS";
const DELETED_SUFFIX: &str = " DEL";

/// ResultRenderer - turns a search result into the chat report
///
/// One header line per event (link, publication state, title), followed by
/// one line per attribute that passes `AttributeFilter`. Object attributes
/// are grouped under an `Object Name` line that only appears when at least
/// one of the object's attributes is shown. Backend order is preserved.
#[derive(Debug, Clone)]
pub struct ResultRenderer {
    /// MISP base URL, always ending in `/`
    server_url: String,
}

impl ResultRenderer {
    /// Creates a renderer linking events to the given MISP instance
    pub fn new(server_url: &str) -> Self {
        let mut server_url = server_url.trim().to_string();
        if !server_url.ends_with('/') {
            server_url.push('/');
        }
        Self { server_url }
    }

    pub fn render(&self, result: &SearchResult, query: &IndicatorQuery) -> String {
        let events = match result {
            Ok(events) => events,
            Err(_) => return ERROR_REPORT.to_string(),
        };

        if events.is_empty() {
            return NO_RESULTS.to_string();
        }

        let mut output = String::new();
        for event in events {
            self.render_event(&mut output, event, query);
        }
        output
    }

    fn render_event(&self, output: &mut String, event: &Event, query: &IndicatorQuery) {
        self.render_event_header(output, event);

        for attribute in event.attributes() {
            if Self::is_displayed(attribute, query) {
                Self::render_attribute(output, attribute);
            }
        }

        for object in event.objects() {
            Self::render_object(output, object, query);
        }
    }

    fn render_event_header(&self, output: &mut String, event: &Event) {
        let published = if event.is_published() {
            PUBLISHED.to_string()
        } else {
            mrkdwn::strike(PUBLISHED)
        };

        let header = format!(
            "{}{}{}{}{}",
            self.event_link(event),
            BULLET,
            published,
            BULLET,
            event.info()
        );
        output.push_str(&mrkdwn::bold(&header));
        output.push('\n');
    }

    fn render_object(output: &mut String, object: &MispObject, query: &IndicatorQuery) {
        let mut header_written = false;

        for attribute in object.attributes() {
            if !Self::is_displayed(attribute, query) {
                continue;
            }

            if !header_written {
                output.push_str(&format!("Object Name{}{}\n", FIELD_SEPARATOR, object.name()));
                header_written = true;
            }
            Self::render_attribute(output, attribute);
        }
    }

    /// Line layout: value, type, IDS marker (+ deletion suffix), timestamp, comment
    fn render_attribute(output: &mut String, attribute: &Attribute) {
        let ids = if attribute.to_ids() {
            IDS.to_string()
        } else {
            mrkdwn::strike(IDS)
        };
        let deleted = if attribute.is_deleted() {
            DELETED_SUFFIX
        } else {
            ""
        };

        output.push_str(&format!(
            "{bullet}{value}{sep}{attribute_type}{sep}{ids}{deleted}{sep}{timestamp}{sep}{comment}\n",
            bullet = BULLET,
            sep = FIELD_SEPARATOR,
            value = defang(attribute.value()),
            attribute_type = attribute.attribute_type(),
            ids = ids,
            deleted = deleted,
            timestamp = format_timestamp(attribute.timestamp()),
            comment = attribute.comment(),
        ));
    }

    fn is_displayed(attribute: &Attribute, query: &IndicatorQuery) -> bool {
        AttributeFilter::matches(attribute, query.value(), query.attribute_types())
    }

    fn event_link(&self, event: &Event) -> String {
        let url = format!(
            "{}events/view/{}",
            self.server_url,
            urlencoding::encode(event.id())
        );
        mrkdwn::link(&url, &format!("Event {}", event.id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::domain::{decode_events, SearchScope};
    use crate::shared::BotError;
    use serde_json::json;

    const SERVER: &str = "https://misp.example.org/";
    const INDICATOR: &str = "93.184.216.34";
    const TS_TOKEN: &str = "<!date^1700000000^{date_num} {time}|2023-11-14 22:13:20 UTC>";

    fn renderer() -> ResultRenderer {
        ResultRenderer::new(SERVER)
    }

    fn query() -> IndicatorQuery {
        IndicatorQuery::ip(INDICATOR, SearchScope::Strict)
    }

    fn matching_attribute(to_ids: bool, deleted: bool, comment: &str) -> Attribute {
        Attribute::new("ip-dst", INDICATOR, to_ids, deleted, 1_700_000_000, comment)
    }

    fn event_with(attributes: Vec<Attribute>, objects: Vec<MispObject>) -> Event {
        Event::new("42", "Phish Campaign", true, attributes, objects)
    }

    #[test]
    fn test_render_empty_result() {
        let output = renderer().render(&Ok(vec![]), &query());
        assert_eq!(output, NO_RESULTS);
    }

    #[test]
    fn test_render_error_result() {
        let result = Err(BotError::BackendTimeout { seconds: 30 });
        let output = renderer().render(&result, &query());
        assert_eq!(output, ERROR_REPORT);
    }

    #[test]
    fn test_render_non_list_payload_is_error_not_empty() {
        let empty = renderer().render(&decode_events(json!([])), &query());
        let malformed = renderer().render(&decode_events(json!({"id": "1"})), &query());

        assert_eq!(empty, "No results found");
        assert_eq!(malformed, "*Error parsing MISP results*");
        assert_ne!(empty, malformed);
    }

    #[test]
    fn test_render_published_event_with_matching_attribute() {
        let event = event_with(vec![matching_attribute(true, false, "c2")], vec![]);
        let output = renderer().render(&Ok(vec![event]), &query());

        let expected = format!(
            "*<https://misp.example.org/events/view/42|Event 42>:black_small_square:Published:black_small_square:Phish Campaign*\n\
             :black_small_square:93[.]184[.]216[.]34:white_small_square:ip-dst:white_small_square:IDS:white_small_square:{}:white_small_square:c2\n",
            TS_TOKEN
        );
        assert_eq!(output, expected);
        assert_eq!(output.lines().count(), 2);
    }

    #[test]
    fn test_render_deleted_attribute_has_suffix() {
        let event = event_with(vec![matching_attribute(true, true, "c2")], vec![]);
        let output = renderer().render(&Ok(vec![event]), &query());

        let detail = output.lines().nth(1).unwrap();
        assert!(detail.contains(":white_small_square:IDS DEL:white_small_square:"));
    }

    #[test]
    fn test_render_unpublished_and_non_ids_markers() {
        let event = Event::new(
            "7",
            "Draft",
            false,
            vec![matching_attribute(false, false, "")],
            vec![],
        );
        let output = renderer().render(&Ok(vec![event]), &query());

        let mut lines = output.lines();
        let header = lines.next().unwrap();
        assert!(header.contains(":black_small_square:~Published~:black_small_square:Draft"));
        let detail = lines.next().unwrap();
        assert!(detail.contains(":white_small_square:~IDS~:white_small_square:"));
        assert!(detail.ends_with(":white_small_square:"));
    }

    #[test]
    fn test_render_skips_non_matching_attributes() {
        let attributes = vec![
            Attribute::new("ip-dst", "93.184.216.35", true, false, 1_700_000_000, "other ip"),
            Attribute::new("domain", INDICATOR, true, false, 1_700_000_000, "wrong type"),
            matching_attribute(true, false, "kept"),
        ];
        let output = renderer().render(&Ok(vec![event_with(attributes, vec![])]), &query());

        assert_eq!(output.lines().count(), 2);
        assert!(output.contains("kept"));
        assert!(!output.contains("other ip"));
        assert!(!output.contains("wrong type"));
    }

    #[test]
    fn test_render_event_header_without_matches() {
        let attributes = vec![Attribute::new("ip-src", "10.0.0.1", true, false, 1, "")];
        let output = renderer().render(&Ok(vec![event_with(attributes, vec![])]), &query());

        assert_eq!(output.lines().count(), 1);
        assert!(output.starts_with("*<https://misp.example.org/events/view/42|Event 42>"));
    }

    #[test]
    fn test_render_object_header_suppressed_when_nothing_matches() {
        let object = MispObject::new(
            "domain-ip",
            vec![
                Attribute::new("ip-dst", "10.0.0.1", true, false, 1, ""),
                Attribute::new("domain", "example.com", true, false, 1, ""),
            ],
        );
        let output = renderer().render(&Ok(vec![event_with(vec![], vec![object])]), &query());

        assert!(!output.contains("Object Name"));
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_render_object_header_written_once() {
        let object = MispObject::new(
            "ip-port",
            vec![
                Attribute::new("ip-src", "10.0.0.1", true, false, 1, "unrelated"),
                Attribute::new("ip-src", INDICATOR, true, false, 1_700_000_000, "first"),
                Attribute::new("ip-dst", INDICATOR, false, false, 1_700_000_000, "second"),
            ],
        );
        let output = renderer().render(&Ok(vec![event_with(vec![], vec![object])]), &query());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "Object Name:white_small_square:ip-port");
        assert!(lines[2].ends_with("first"));
        assert!(lines[3].ends_with("second"));
        assert_eq!(output.matches("Object Name").count(), 1);
    }

    #[test]
    fn test_render_preserves_backend_order() {
        let first = Event::new("2", "second id first", true, vec![matching_attribute(true, false, "a")], vec![]);
        let second = Event::new("1", "first id second", true, vec![matching_attribute(true, false, "b")], vec![]);
        let object = MispObject::new("obj", vec![matching_attribute(true, false, "c")]);
        let third = Event::new(
            "3",
            "mixed",
            true,
            vec![matching_attribute(true, false, "d")],
            vec![object],
        );

        let output = renderer().render(&Ok(vec![first, second, third]), &query());
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].contains("Event 2"));
        assert!(lines[1].ends_with(":white_small_square:a"));
        assert!(lines[2].contains("Event 1"));
        assert!(lines[3].ends_with(":white_small_square:b"));
        assert!(lines[4].contains("Event 3"));
        assert!(lines[5].ends_with(":white_small_square:d"));
        assert_eq!(lines[6], "Object Name:white_small_square:obj");
        assert!(lines[7].ends_with(":white_small_square:c"));
    }

    #[test]
    fn test_render_does_not_defang_comment() {
        let event = event_with(vec![matching_attribute(true, false, "see http://x.y")], vec![]);
        let output = renderer().render(&Ok(vec![event]), &query());
        assert!(output.ends_with(":white_small_square:see http://x.y\n"));
    }

    #[test]
    fn test_server_url_trailing_slash_added() {
        let renderer = ResultRenderer::new("https://misp.example.org");
        let event = event_with(vec![], vec![]);
        let output = renderer.render(&Ok(vec![event]), &query());
        assert!(output.contains("<https://misp.example.org/events/view/42|Event 42>"));
    }

    #[test]
    fn test_event_id_encoded_in_url_only() {
        let event = Event::new("a b", "odd id", true, vec![], vec![]);
        let output = renderer().render(&Ok(vec![event]), &query());
        assert!(output.contains("<https://misp.example.org/events/view/a%20b|Event a b>"));
    }
}
