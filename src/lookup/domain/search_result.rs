use super::Event;
use crate::shared::BotError;
use serde_json::Value;

/// SearchResult - what the renderer receives for one backend search
///
/// `Ok` holds the decoded events (possibly none). `Err` covers every way the
/// search can fail to produce a list: malformed payload, transport failure,
/// timeout. The renderer treats all of them as one error report.
pub type SearchResult = std::result::Result<Vec<Event>, BotError>;

/// Decodes a raw `events/restSearch` payload into events
///
/// Accepts a bare JSON array or MISP's `{"response": [...]}` envelope, and
/// elements that are either an event or wrapped as `{"Event": {...}}`.
/// Anything that is not a list, or an element that does not decode, yields
/// `BotError::MalformedResponse`.
pub fn decode_events(payload: Value) -> SearchResult {
    let items = match unwrap_envelope(payload, "response") {
        Value::Array(items) => items,
        other => {
            return Err(BotError::MalformedResponse {
                details: format!("expected a list of events, got {}", describe(&other)),
            })
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Event>(unwrap_envelope(item, "Event")).map_err(|e| {
                BotError::MalformedResponse {
                    details: format!("event #{}: {}", index, e),
                }
            })
        })
        .collect()
}

fn unwrap_envelope(value: Value, key: &str) -> Value {
    match value {
        Value::Object(mut map) => match map.remove(key) {
            Some(inner) => inner,
            None => Value::Object(map),
        },
        other => other,
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
