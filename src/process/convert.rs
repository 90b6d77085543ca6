use super::keys::clean_key;
use super::raw_table::RawRow;
use std::borrow::Cow;
use serde::{
    ser::{SerializeMap, Serializer},
    Serialize,
};

/// A single cleaned cell: a number when the text parses as one, the original
/// text otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Try-parse `raw` as a float. Surrounding whitespace is ignored for the
    /// parse, but a `Text` fallback keeps `raw` untouched. Non-finite values
    /// (`nan`, `inf`) stay text so the output remains valid JSON.
    /// Single underscores between digits group them (`1_000`).
    pub fn coerce(raw: &str) -> Self {
        let parsed = strip_digit_separators(raw.trim()).and_then(|s| s.parse::<f64>().ok());
        match parsed {
            Some(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Number(_) => None,
        }
    }
}

/// Drop `_` digit separators. `None` when an underscore is not between two
/// digits, which makes the literal invalid.
fn strip_digit_separators(s: &str) -> Option<Cow<'_, str>> {
    if !s.contains('_') {
        return Some(Cow::Borrowed(s));
    }
    let bytes = s.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'_' {
            let before = i.checked_sub(1).map(|j| bytes[j]);
            let after = bytes.get(i + 1).copied();
            let is_digit = |c: Option<u8>| c.is_some_and(|c| c.is_ascii_digit());
            if !is_digit(before) || !is_digit(after) {
                return None;
            }
        }
    }
    Some(Cow::Owned(s.replace('_', "")))
}

/// One cleaned record. Keys keep the order of their first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataRow {
    fields: Vec<(String, CellValue)>,
}

impl DataRow {
    /// Insert or replace. A repeated key keeps its original position and
    /// takes the newer value.
    fn insert(&mut self, key: String, value: CellValue) {
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for DataRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Clean every key and coerce every value of a raw record. Cells under a
/// blank header are dropped.
pub fn transform_row(raw: RawRow) -> DataRow {
    let mut row = DataRow::default();
    for (header, value) in raw.cells {
        if header.trim().is_empty() {
            continue;
        }
        row.insert(clean_key(&header), CellValue::coerce(&value));
    }
    row
}
