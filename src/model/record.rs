//! Record: the ordered key-value projection of a node or edge.
//!
//! Field order is part of the JSON contract, so a `Record` keeps insertion
//! order and serializes as a JSON object in that order.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::{EnumTag, ShapeParameters, Value};

/// Ordered map of property names to values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field. A replaced field keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // ========================================================================
    // Projection helpers. Absent values never produce a field.
    // ========================================================================

    /// Scalar or list field. Null and non-finite floats are omitted, also
    /// as list items.
    pub fn field(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        let value = match value.into() {
            Value::List(items) => Value::List(items.into_iter().filter(|v| !v.is_absent()).collect()),
            other => other,
        };
        if !value.is_absent() {
            self.insert(key, value);
        }
        self
    }

    /// Optional string field.
    pub fn text(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value {
            self.insert(key, v);
        }
        self
    }

    /// Enumeration, written as its serialization tag.
    pub fn enumeration<E: EnumTag>(&mut self, key: &str, value: &E) -> &mut Self {
        self.insert(key, value.tag());
        self
    }

    /// Single entity reference, flattened to the referenced id.
    pub fn reference(&mut self, key: &str, id: Option<&str>) -> &mut Self {
        self.text(key, id)
    }

    /// Ordered collection of entity references, flattened to ids.
    pub fn references<'a>(&mut self, key: &str, ids: impl IntoIterator<Item = &'a str>) -> &mut Self {
        let ids: Vec<Value> = ids.into_iter().map(Value::from).collect();
        self.insert(key, Value::List(ids));
        self
    }

    /// String-keyed map, copied key-by-key with absent values replaced by `""`.
    pub fn map(&mut self, key: &str, map: &Record) -> &mut Self {
        let copied: Record = map
            .iter()
            .map(|(k, v)| {
                let v = if v.is_absent() { Value::from("") } else { v.clone() };
                (k.to_string(), v)
            })
            .collect();
        self.insert(key, copied);
        self
    }

    /// Shape-parameter bag, flattened to its finite named values.
    pub fn parameters(&mut self, key: &str, params: &dyn ShapeParameters) -> &mut Self {
        let values: Record = params
            .named_values()
            .into_iter()
            .filter(|(_, v)| v.is_finite())
            .map(|(k, v)| (k.to_string(), Value::Float(v)))
            .collect();
        self.insert(key, values);
        self
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Projection of a graph object into its ordered record.
pub trait ToRecord {
    fn to_record(&self) -> Record;
}
