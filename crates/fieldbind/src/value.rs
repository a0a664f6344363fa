//! Small value helpers shared by the form and view surfaces.

use serde_json::Value;

/// Emptiness as the surfaces understand it: misses render as the placeholder
/// and empty fields are stripped from submissions. `false` and `0` are values.
pub(crate) fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.iter().all(is_empty),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// The id form of a select value: a non-empty string, or a number rendered
/// as one. Anything else does not name a reference.
pub(crate) fn scalar_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_detection() {
        assert!(is_empty(&Value::Null));
        assert!(is_empty(&json!("")));
        assert!(is_empty(&json!([])));
        assert!(is_empty(&json!([null, ""])));
        assert!(is_empty(&json!({})));
        assert!(!is_empty(&json!(false)));
        assert!(!is_empty(&json!(0)));
        assert!(!is_empty(&json!("x")));
        assert!(!is_empty(&json!([null, "x"])));
    }

    #[test]
    fn scalar_ids() {
        assert_eq!(scalar_id(&json!("p1")), Some("p1".to_string()));
        assert_eq!(scalar_id(&json!(7)), Some("7".to_string()));
        assert_eq!(scalar_id(&json!("")), None);
        assert_eq!(scalar_id(&json!({"id": "p1"})), None);
    }
}
