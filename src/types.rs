use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A loosely typed scalar as written by the catalog tooling: `year` and
/// `rating` show up as integers, floats or strings depending on who wrote them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Default for FieldValue {
    fn default() -> Self { FieldValue::Text(String::new()) }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self { FieldValue::Int(n) }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self { FieldValue::Float(x) }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self { FieldValue::Text(s.to_string()) }
}

/// Text form of a scalar. `null`, arrays and objects have none.
fn scalar_text(v: Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Text field that reads `null` as empty and numbers or booleans as their text.
fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(d)?).unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(Value::deserialize(d)?))
}

/// `year` / `rating`: `null` and non-scalars read as the empty default.
fn lenient_value<'de, D: Deserializer<'de>>(d: D) -> Result<FieldValue, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => match n.as_i64() {
            Some(i) => FieldValue::Int(i),
            None => n.as_f64().map(FieldValue::Float).unwrap_or_default(),
        },
        Value::String(s) => FieldValue::Text(s),
        Value::Bool(b) => FieldValue::Text(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => FieldValue::default(),
    })
}

/// One movie or series entry. Field names on the wire follow the catalog
/// document (`title_name`, `date_added`, `video_source`). Fields are read
/// leniently: a stray `null` or number never rejects the whole entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Map key in the catalog document; not part of the record body.
    #[serde(skip)]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(rename = "title_name", default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub display_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_value")]
    pub year: FieldValue,
    #[serde(default, deserialize_with = "lenient_string")]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient_value")]
    pub rating: FieldValue,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cast: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub director: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub release: String,
    #[serde(rename = "date_added", default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub genre: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub poster: String,
    #[serde(rename = "video_source", default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub video_source: Option<String>,
}

impl MovieRecord {
    /// Name shown to people: `title_name` unless it is missing or empty.
    pub fn display_name(&self) -> &str {
        self.display_title
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.title)
    }

    /// Individual genre labels; the raw field is a `", "`-joined list.
    pub fn genres(&self) -> Vec<&str> {
        self.genre.split(", ").filter(|g| !g.is_empty()).collect()
    }

    pub fn date_added(&self) -> Option<&str> {
        self.date_added.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn video_source(&self) -> Option<&str> {
        self.video_source.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}
