//! Classification of incoming JSON values

use serde_json::{Map, Value};

/// What a JSON value is, as far as rendering is concerned
#[derive(Debug, Clone, PartialEq)]
pub enum Field<'a> {
    /// `null`: for list entries this marks a removed item
    Null,
    /// Strings, numbers and booleans, already formatted for display
    Scalar(String),
    Object(&'a Map<String, Value>),
    Array(&'a [Value]),
}

impl<'a> From<&'a Value> for Field<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => Field::Null,
            Value::Bool(b) => Field::Scalar(b.to_string()),
            Value::Number(n) => Field::Scalar(n.to_string()),
            Value::String(s) => Field::Scalar(s.clone()),
            Value::Object(map) => Field::Object(map),
            Value::Array(items) => Field::Array(items),
        }
    }
}

impl<'a> Field<'a> {
    pub fn as_object(&self) -> Option<&'a Map<String, Value>> {
        match self {
            Field::Object(map) => Some(*map),
            _ => None,
        }
    }

    /// Display text for a table cell; nested values are shown as compact JSON
    pub fn to_cell(&self) -> String {
        match self {
            Field::Null => String::new(),
            Field::Scalar(text) => text.clone(),
            Field::Object(map) => Value::Object((*map).clone()).to_string(),
            Field::Array(items) => Value::Array(items.to_vec()).to_string(),
        }
    }
}

/// `[name, value]` pairs for every scalar member of `obj`, in source order
pub fn metadata(obj: &Map<String, Value>) -> Vec<(String, String)> {
    obj.iter()
        .filter_map(|(name, value)| match Field::from(value) {
            Field::Scalar(text) => Some((name.clone(), text)),
            Field::Null | Field::Object(_) | Field::Array(_) => None,
        })
        .collect()
}

/// Text of a scalar member, or an empty string when it is absent or nested
pub fn scalar_text(obj: &Map<String, Value>, name: &str) -> String {
    match obj.get(name).map(Field::from) {
        Some(Field::Scalar(text)) => text,
        _ => String::new(),
    }
}
