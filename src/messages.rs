use serde::{
    Deserialize, Deserializer,
    de::{MapAccess, Visitor},
};
use serde_json::Value;
use std::fmt;

/// Fallback shown when a failure status carries no usable `detail`.
pub const SERVER_ERROR_FALLBACK: &str = "Server Error.";

/// Body of a successful `POST /predict`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionResponse {
    /// The top class label.
    pub prediction: String,
    /// Confidence of the top class, displayed as sent.
    pub confidence: Confidence,
    /// Per-class probabilities in the order the server listed them.
    pub details: Details,
    /// Name of the uploaded file, when the server echoes it back.
    #[serde(default)]
    pub filename: Option<String>,
}

/// Confidence value as sent by the server, either preformatted text or a bare number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Confidence {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Text(text) => f.write_str(text),
            Confidence::Number(number) => write!(f, "{number}"),
        }
    }
}

/// Label → probability mapping that keeps the order of the JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Details(Vec<(String, f64)>);

impl Details {
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(label, p)| (label.as_str(), *p))
    }
}

impl<L: Into<String>> FromIterator<(L, f64)> for Details {
    fn from_iter<I: IntoIterator<Item = (L, f64)>>(iter: I) -> Self {
        Details(iter.into_iter().map(|(l, p)| (l.into(), p)).collect())
    }
}

impl<'de> Deserialize<'de> for Details {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DetailsVisitor;

        impl<'de> Visitor<'de> for DetailsVisitor {
            type Value = Details;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of class labels to probabilities")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Details, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((label, p)) = map.next_entry::<String, f64>()? {
                    entries.push((label, p));
                }
                Ok(Details(entries))
            }
        }

        deserializer.deserialize_map(DetailsVisitor)
    }
}

/// Body of a failed `POST /predict`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorPayload {
    /// Reads the payload out of an arbitrary JSON body; anything that is not an object has no detail.
    pub fn from_body(body: &Value) -> Self {
        ErrorPayload {
            detail: body.get("detail").cloned(),
        }
    }

    /// The message to present: the `detail` when it carries anything, the fixed fallback otherwise.
    ///
    /// Empty strings, `null`, `false` and zero count as absent; other values
    /// are shown as their JSON text.
    pub fn message(&self) -> String {
        match &self.detail {
            Some(Value::String(text)) if !text.is_empty() => text.clone(),
            Some(Value::Number(number)) if number.as_f64() != Some(0.0) => number.to_string(),
            Some(value @ (Value::Bool(true) | Value::Array(_) | Value::Object(_))) => {
                value.to_string()
            }
            _ => SERVER_ERROR_FALLBACK.to_string(),
        }
    }
}
