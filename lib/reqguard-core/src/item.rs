use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An input item: its JSON payload plus any other field (`binary`,
/// `pairedItem`, ...), kept as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionItem {
    /// JSON payload.
    #[serde(default)]
    pub json: Value,
    /// Other fields of the item.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Replaces a `null` JSON payload with an empty object.
///
/// # Example
///
/// ```rust
/// use reqguard_core::{ExecutionItem, replace_null_values};
/// use serde_json::json;
///
/// let item = replace_null_values(ExecutionItem::default());
/// assert_eq!(item.json, json!({}));
/// ```
#[must_use]
pub fn replace_null_values(mut item: ExecutionItem) -> ExecutionItem {
    if item.json.is_null() {
        item.json = Value::Object(Map::new());
    }
    item
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case::object(json!({ "id": 1 }))]
    #[case::empty_object(json!({}))]
    #[case::array(json!([null]))]
    #[case::falsy(json!(false))]
    #[case::zero(json!(0))]
    fn should_keep_non_null_payloads(#[case] json: Value) {
        let item = ExecutionItem {
            json: json.clone(),
            extra: Map::new(),
        };

        assert_eq!(replace_null_values(item).json, json);
    }

    #[test]
    fn should_replace_null_payload_and_keep_other_fields() {
        let item: ExecutionItem = serde_json::from_value(json!({
            "json": null,
            "pairedItem": { "item": 0 },
        }))
        .expect("should deserialize");

        let item = replace_null_values(item);

        insta::assert_json_snapshot!(item, @r#"
        {
          "json": {},
          "pairedItem": {
            "item": 0
          }
        }
        "#);
    }
}
