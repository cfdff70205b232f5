//! Values handed to the native rendering host.
//!
//! Arrays and records are reference-counted. Structural equality is
//! [`PartialEq`]; identity (the "same array object" test used by shallow
//! attribute comparison) is [`NativeValue::same`].

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

// ── NativeValue ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NativeValue {
    Null,
    Bool(bool),
    Number(f32),
    Str(Arc<str>),
    Array(Arc<[NativeValue]>),
    Record(Arc<BTreeMap<String, NativeValue>>),
}

impl NativeValue {
    pub fn str(s: impl AsRef<str>) -> Self {
        NativeValue::Str(Arc::from(s.as_ref()))
    }

    pub fn array(items: impl IntoIterator<Item = NativeValue>) -> Self {
        NativeValue::Array(items.into_iter().collect())
    }

    pub fn numbers(items: impl IntoIterator<Item = f32>) -> Self {
        NativeValue::Array(items.into_iter().map(NativeValue::Number).collect())
    }

    pub fn record(fields: BTreeMap<String, NativeValue>) -> Self {
        NativeValue::Record(Arc::new(fields))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, NativeValue::Null)
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            NativeValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            NativeValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[NativeValue]> {
        match self {
            NativeValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Identity comparison: scalars by value, arrays and records by pointer.
    pub fn same(&self, other: &NativeValue) -> bool {
        match (self, other) {
            (NativeValue::Array(a), NativeValue::Array(b)) => Arc::ptr_eq(a, b),
            (NativeValue::Record(a), NativeValue::Record(b)) => Arc::ptr_eq(a, b),
            (NativeValue::Array(_) | NativeValue::Record(_), _)
            | (_, NativeValue::Array(_) | NativeValue::Record(_)) => false,
            _ => self == other,
        }
    }
}

impl From<f32> for NativeValue {
    fn from(n: f32) -> Self {
        NativeValue::Number(n)
    }
}

impl From<u8> for NativeValue {
    fn from(n: u8) -> Self {
        NativeValue::Number(n as f32)
    }
}

impl From<bool> for NativeValue {
    fn from(b: bool) -> Self {
        NativeValue::Bool(b)
    }
}

impl From<&str> for NativeValue {
    fn from(s: &str) -> Self {
        NativeValue::str(s)
    }
}

impl From<String> for NativeValue {
    fn from(s: String) -> Self {
        NativeValue::Str(Arc::from(s))
    }
}

impl<T: Into<NativeValue>> From<Option<T>> for NativeValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(NativeValue::Null, Into::into)
    }
}

// ── NativeProps ───────────────────────────────────────────────────────────

/// The flat, native-ready record produced for one element.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NativeProps {
    fields: BTreeMap<String, NativeValue>,
}

impl NativeProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<NativeValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Inserts only when `value` is `Some`.
    pub fn insert_opt(&mut self, name: &str, value: Option<impl Into<NativeValue>>) {
        if let Some(v) = value {
            self.insert(name, v);
        }
    }

    pub fn get(&self, name: &str) -> Option<&NativeValue> {
        self.fields.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<NativeValue> {
        self.fields.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NativeValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Wraps the fields as a single record value.
    pub fn into_record(self) -> NativeValue {
        NativeValue::record(self.fields)
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
