use std::collections::BTreeMap;

use crate::error::{ParseOutcome, Warning};

// ── AttrValue ─────────────────────────────────────────────────────────────

/// A declared attribute value as handed over by the host framework.
///
/// Absent and `null` attributes are simply not present in the bag.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    /// Kept as `f64` so packed `0xAARRGGBB` colors survive intact.
    Number(f64),
    Bool(bool),
    List(Vec<AttrValue>),
    /// Nested object, e.g. a structured `font` or `transform`.
    Map(AttrBag),
}

impl AttrValue {
    /// Numeric view: a `Number`, or a `Str` holding a plain number.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            AttrValue::Number(n) => finite_f32(*n),
            AttrValue::Str(s) => parse_number(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// `true` for empty or whitespace-only strings.
    pub fn is_blank(&self) -> bool {
        matches!(self, AttrValue::Str(s) if s.trim().is_empty())
    }

    /// Converts a JSON value. `null` has no attribute representation.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(AttrValue::Bool(*b)),
            Value::Number(n) => n.as_f64().map(AttrValue::Number),
            Value::String(s) => Some(AttrValue::Str(s.clone())),
            Value::Array(items) => Some(AttrValue::List(
                items.iter().filter_map(AttrValue::from_json).collect(),
            )),
            Value::Object(_) => AttrBag::from_json(value).map(AttrValue::Map),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Number(n)
    }
}

impl From<f32> for AttrValue {
    fn from(n: f32) -> Self {
        AttrValue::Number(n as f64)
    }
}

impl From<i32> for AttrValue {
    fn from(n: i32) -> Self {
        AttrValue::Number(n as f64)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<Vec<AttrValue>> for AttrValue {
    fn from(items: Vec<AttrValue>) -> Self {
        AttrValue::List(items)
    }
}

impl From<AttrBag> for AttrValue {
    fn from(bag: AttrBag) -> Self {
        AttrValue::Map(bag)
    }
}

// ── AttrBag ───────────────────────────────────────────────────────────────

/// The flat attribute record declared on one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrBag {
    attrs: BTreeMap<String, AttrValue>,
}

impl AttrBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attrs.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.attrs.remove(key)
    }

    /// Look up an attribute by its declared name.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Get an attribute as `f32` if it is numeric or a numeric string.
    pub fn get_f32(&self, key: &str) -> Option<f32> {
        self.get(key)?.as_f32()
    }

    /// Get an attribute as `&str` if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    /// Get a nested object attribute.
    pub fn get_map(&self, key: &str) -> Option<&AttrBag> {
        match self.get(key)? {
            AttrValue::Map(bag) => Some(bag),
            _ => None,
        }
    }

    /// Builds a bag from a JSON object; `null` members are dropped.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        let attrs = object
            .iter()
            .filter_map(|(k, v)| AttrValue::from_json(v).map(|v| (k.clone(), v)))
            .collect();
        Some(Self { attrs })
    }
}

// ── Numbers ───────────────────────────────────────────────────────────────

/// Parses a plain decimal number, rejecting `inf`/`NaN` spellings.
pub fn parse_number(s: &str) -> Option<f32> {
    let n = s.trim().parse::<f32>().ok()?;
    n.is_finite().then_some(n)
}

/// Narrows to `f32`, rejecting values that overflow it.
pub(crate) fn finite_f32(n: f64) -> Option<f32> {
    let n = n as f32;
    n.is_finite().then_some(n)
}

// ── Keywords ──────────────────────────────────────────────────────────────

/// Matches a keyword against `table`; the first entry is the fallback.
pub(crate) fn keyword<T: Copy>(value: Option<&AttrValue>, table: &[(&str, T)]) -> ParseOutcome<T> {
    let fallback = table[0].1;
    let Some(value) = value else {
        return ParseOutcome::Parsed(fallback);
    };
    let found = value
        .as_str()
        .map(str::trim)
        .and_then(|s| table.iter().find(|(name, _)| *name == s));
    match found {
        Some((_, v)) => ParseOutcome::Parsed(*v),
        None => {
            let expected: Vec<&str> = table.iter().map(|(n, _)| *n).collect();
            ParseOutcome::Degraded(
                fallback,
                Warning::new(format!("{value:?} is not one of {}", expected.join(" | "))),
            )
        }
    }
}
