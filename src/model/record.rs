//! Field access over arbitrary item types.

use super::Value;

/// An item whose scalar fields can be addressed by name.
///
/// The table engine is generic over `Record`; it only looks at the fields
/// the caller names in column descriptors, search keys and filters.
///
/// # Example
///
/// ```
/// use postdesk::model::{Record, Value};
///
/// struct Fruit {
///     id: u64,
///     name: String,
/// }
///
/// impl Record for Fruit {
///     fn field(&self, key: &str) -> Option<Value> {
///         match key {
///             "id" => Some(self.id.into()),
///             "name" => Some(self.name.as_str().into()),
///             _ => None,
///         }
///     }
///
///     fn field_values(&self) -> Vec<Value> {
///         vec![self.id.into(), self.name.as_str().into()]
///     }
/// }
///
/// let fruit = Fruit { id: 1, name: "Apple".into() };
/// assert_eq!(fruit.field_text("name").as_deref(), Some("Apple"));
/// ```
pub trait Record {
    /// Value of the named field, or `None` if the item has no such field.
    fn field(&self, key: &str) -> Option<Value>;

    /// Values of every field, in declaration order.
    fn field_values(&self) -> Vec<Value>;

    /// Stringified value of the named field.
    fn field_text(&self, key: &str) -> Option<String> {
        self.field(key).map(|v| v.to_string())
    }
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, key: &str) -> Option<Value> {
        self.get(key).map(Value::from_json)
    }

    fn field_values(&self) -> Vec<Value> {
        self.values().map(Value::from_json).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_object_record() {
        let json = serde_json::json!({"id": 9, "title": "hello"});
        let object = json.as_object().unwrap();

        assert_eq!(object.field("id"), Some(Value::from(9u64)));
        assert_eq!(object.field_text("title").as_deref(), Some("hello"));
        assert!(object.field("missing").is_none());
        assert_eq!(object.field_values().len(), 2);
    }
}
