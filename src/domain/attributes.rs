use serde::Serialize;
use serde_json::{Map, Value};

/// Per-send values merged into the email template by Marketing Cloud.
///
/// Keys must match the field names of the definition's data extension
/// exactly, including case. A mismatch is accepted by the API with a `202`
/// and the message is silently never delivered, so nothing here can catch it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any previous value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<Map<String, Value>> for Attributes {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// Parses a `KEY=VALUE` pair as given on the command line.
///
/// Only the first `=` separates; the value may contain further `=` signs.
pub fn parse_pair(pair: &str) -> Result<(String, String), String> {
    match pair.split_once('=') {
        Some((key, _)) if key.trim().is_empty() => Err(format!("{} has an empty key", pair)),
        Some((key, value)) => Ok((key.to_owned(), value.to_owned())),
        None => Err(format!("{} is not a KEY=VALUE pair", pair)),
    }
}
