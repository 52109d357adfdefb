//! Flat name → value records, the shape rows take outside the store.

use crate::db::cell::Cell;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// An ordered mapping of field name to its string value.
///
/// Lookups of absent fields yield `""`, so a record never exposes a null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field, keeping the original position on replace.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> &str {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map_or("", |(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Convert a positional row into a named record following `headers`.
///
/// Columns with an empty header are skipped, missing cells become `""` and
/// date cells are rendered with the fixed `dd/MM/yyyy HH:mm:ss` format.
pub fn row_to_object(row: &[Cell], headers: &[String]) -> Record {
    let mut record = Record::new();
    for (idx, name) in headers.iter().enumerate() {
        if name.is_empty() {
            continue;
        }
        let value = row.get(idx).map(Cell::to_display).unwrap_or_default();
        record.set(name, value);
    }
    record
}
