//! Field access for rows
//!
//! Columns declared with a field-name accessor resolve their value through
//! the [`Record`] trait. Rows that are only read through computed accessors
//! can rely on the default implementation.

use crate::value::CellValue;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// A row that can look up values by field name
pub trait Record {
    /// Look up a field by name, returning [`CellValue::Null`] when absent
    fn field(&self, _name: &str) -> CellValue {
        CellValue::Null
    }
}

impl Record for Map<String, Value> {
    fn field(&self, name: &str) -> CellValue {
        if let Some(value) = self.get(name) {
            return CellValue::from(value);
        }

        // Dotted paths walk nested objects ("customer.name")
        let mut parts = name.split('.');
        let Some(first) = parts.next() else {
            return CellValue::Null;
        };
        let mut current = match self.get(first) {
            Some(value) => value,
            None => return CellValue::Null,
        };
        for part in parts {
            current = match current {
                Value::Object(map) => match map.get(part) {
                    Some(value) => value,
                    None => return CellValue::Null,
                },
                Value::Array(items) => match part.parse::<usize>().ok().and_then(|i| items.get(i)) {
                    Some(value) => value,
                    None => return CellValue::Null,
                },
                _ => return CellValue::Null,
            };
        }
        CellValue::from(current)
    }
}

impl Record for Value {
    fn field(&self, name: &str) -> CellValue {
        match self {
            Value::Object(map) => map.field(name),
            _ => CellValue::Null,
        }
    }
}

impl Record for HashMap<String, CellValue> {
    fn field(&self, name: &str) -> CellValue {
        self.get(name).cloned().unwrap_or_default()
    }
}

impl Record for BTreeMap<String, CellValue> {
    fn field(&self, name: &str) -> CellValue {
        self.get(name).cloned().unwrap_or_default()
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> CellValue {
        (**self).field(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_field_lookup() {
        let row = json!({"id": 1, "name": "Alpha", "customer": {"city": "Oslo"}});
        assert_eq!(row.field("id"), CellValue::Number(1.0));
        assert_eq!(row.field("name"), CellValue::from("Alpha"));
        assert_eq!(row.field("customer.city"), CellValue::from("Oslo"));
        assert_eq!(row.field("missing"), CellValue::Null);
        assert_eq!(row.field("customer.zip"), CellValue::Null);
    }

    #[test]
    fn test_literal_dotted_key_wins() {
        let row = json!({"a.b": "flat", "a": {"b": "nested"}});
        assert_eq!(row.field("a.b"), CellValue::from("flat"));
    }

    #[test]
    fn test_array_index_path() {
        let row = json!({"tags": ["x", "y"]});
        assert_eq!(row.field("tags.1"), CellValue::from("y"));
        assert_eq!(row.field("tags.5"), CellValue::Null);
    }

    #[test]
    fn test_non_object_row() {
        assert_eq!(json!(5).field("x"), CellValue::Null);
    }

    #[test]
    fn test_map_rows() {
        let mut row = HashMap::new();
        row.insert("amount".to_string(), CellValue::Number(3.5));
        assert_eq!(row.field("amount"), CellValue::Number(3.5));
        assert_eq!(row.field("other"), CellValue::Null);

        let mut row = BTreeMap::new();
        row.insert("flag".to_string(), CellValue::Bool(true));
        assert_eq!((&row).field("flag"), CellValue::Bool(true));
    }
}
