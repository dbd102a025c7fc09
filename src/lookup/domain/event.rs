use serde::de::{self, Deserializer};
use serde::Deserialize;

/// Event - a MISP event as returned by `events/restSearch`
///
/// Field names follow the MISP JSON layout (`info`, `Attribute`, `Object`).
/// Only the fields the bot renders are kept; everything else in the payload
/// is ignored during decoding.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Event {
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    info: String,
    #[serde(default)]
    published: bool,
    #[serde(rename = "Attribute", default)]
    attributes: Vec<Attribute>,
    #[serde(rename = "Object", default)]
    objects: Vec<MispObject>,
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        info: impl Into<String>,
        published: bool,
        attributes: Vec<Attribute>,
        objects: Vec<MispObject>,
    ) -> Self {
        Self {
            id: id.into(),
            info: info.into(),
            published,
            attributes,
            objects,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Event title (MISP `info` field)
    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn is_published(&self) -> bool {
        self.published
    }

    /// Top-level attributes, in backend order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Nested objects, in backend order; empty when the payload had none
    pub fn objects(&self) -> &[MispObject] {
        &self.objects
    }
}

/// MispObject - a named group of attributes inside an event
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MispObject {
    name: String,
    #[serde(rename = "Attribute", default)]
    attributes: Vec<Attribute>,
}

impl MispObject {
    pub fn new(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}

/// Attribute - a single indicator record
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    attribute_type: String,
    value: String,
    #[serde(default)]
    to_ids: bool,
    #[serde(default)]
    deleted: bool,
    #[serde(deserialize_with = "deserialize_epoch")]
    timestamp: i64,
    /// Missing and null comments both decode to None and render as ""
    #[serde(default)]
    comment: Option<String>,
}

impl Attribute {
    pub fn new(
        attribute_type: impl Into<String>,
        value: impl Into<String>,
        to_ids: bool,
        deleted: bool,
        timestamp: i64,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            attribute_type: attribute_type.into(),
            value: value.into(),
            to_ids,
            deleted,
            timestamp,
            comment: Some(comment.into()),
        }
    }

    /// MISP type tag, e.g. `ip-dst`
    pub fn attribute_type(&self) -> &str {
        &self.attribute_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn to_ids(&self) -> bool {
        self.to_ids
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Epoch seconds
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn comment(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }
}

/// MISP serializes numeric fields as strings; older instances and test
/// fixtures use plain numbers. Both are accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Integer(i64),
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(text) => text,
        StringOrNumber::Integer(number) => number.to_string(),
    })
}

fn deserialize_epoch<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Integer(number) => Ok(number),
        StringOrNumber::Text(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|e| de::Error::custom(format!("invalid timestamp '{}': {}", text, e))),
    }
}
