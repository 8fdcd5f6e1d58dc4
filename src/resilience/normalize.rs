use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Which envelope a list response arrived in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShape {
    /// A bare JSON array
    Array,
    /// `{"items": [...]}`
    Items,
    /// `{"data": [...]}`
    Data,
    /// `null`, or a body carrying none of the above
    Empty,
}

/// A list response flattened to its records
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedList<T> {
    pub kind: ListShape,
    pub value: Vec<T>,
}

impl<T> NormalizedList<T> {
    pub fn into_vec(self) -> Vec<T> {
        self.value
    }
}

/// Flatten any of the list shapes the backend uses.
///
/// Records that do not deserialize as `T` are skipped with a warning so
/// one malformed row cannot blank a whole page.
pub fn normalize_list<T: DeserializeOwned>(body: Value) -> NormalizedList<T> {
    let (kind, raw) = match body {
        Value::Array(items) => (ListShape::Array, items),
        Value::Object(mut map) => match (map.remove("items"), map.remove("data")) {
            (Some(Value::Array(items)), _) => (ListShape::Items, items),
            (_, Some(Value::Array(items))) => (ListShape::Data, items),
            // `{"data": {"items": [...]}}` as produced by the mock envelope
            (_, Some(nested @ Value::Object(_))) => return normalize_list(nested),
            _ => {
                warn!("List response has neither `items` nor `data`; treating as empty");
                (ListShape::Empty, Vec::new())
            }
        },
        Value::Null => (ListShape::Empty, Vec::new()),
        other => {
            warn!("Unexpected list response: {}", other);
            (ListShape::Empty, Vec::new())
        }
    };

    let total = raw.len();
    let value: Vec<T> = raw
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed record: {}", e);
                None
            }
        })
        .collect();
    if value.len() < total {
        warn!("Dropped {} of {} records", total - value.len(), total);
    }

    NormalizedList { kind, value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: i64,
    }

    #[test]
    fn all_three_shapes_flatten_to_the_same_list() {
        let expected = vec![Row { id: 1 }, Row { id: 2 }];

        let array = normalize_list::<Row>(json!([{ "id": 1 }, { "id": 2 }]));
        assert_eq!(array.kind, ListShape::Array);
        assert_eq!(array.value, expected);

        let items = normalize_list::<Row>(json!({ "items": [{ "id": 1 }, { "id": 2 }], "total": 2 }));
        assert_eq!(items.kind, ListShape::Items);
        assert_eq!(items.value, expected);

        let data = normalize_list::<Row>(json!({ "data": [{ "id": 1 }, { "id": 2 }] }));
        assert_eq!(data.kind, ListShape::Data);
        assert_eq!(data.value, expected);
    }

    #[test]
    fn unknown_shapes_become_empty() {
        assert_eq!(normalize_list::<Row>(json!(null)).kind, ListShape::Empty);
        assert_eq!(normalize_list::<Row>(json!({ "detail": "ok" })).value, vec![]);
        assert_eq!(normalize_list::<Row>(json!("oops")).kind, ListShape::Empty);
    }

    #[test]
    fn malformed_records_are_skipped() {
        let list = normalize_list::<Row>(json!([{ "id": 1 }, { "id": "x" }, { "id": 3 }]));
        assert_eq!(list.value, vec![Row { id: 1 }, Row { id: 3 }]);
    }

    #[test]
    fn nested_mock_envelope_is_unwrapped() {
        let list = normalize_list::<Row>(json!({ "data": { "items": [{ "id": 5 }], "is_mock": true } }));
        assert_eq!(list.kind, ListShape::Items);
        assert_eq!(list.value, vec![Row { id: 5 }]);
    }
}
