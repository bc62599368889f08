use serde_json::Value;

/// A single key that changed value after a successful write.
#[derive(Clone, Debug, PartialEq)]
pub struct StorageEvent {
    pub key: String,
    pub old_value: Option<Value>,
    pub new_value: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn debug_includes_key_and_values() {
        let ev = StorageEvent {
            key: "zoom".into(),
            old_value: Some(json!(1.0)),
            new_value: json!(2.0),
        };
        let s = format!("{:?}", ev);
        assert!(s.contains("StorageEvent"));
        assert!(s.contains("zoom"));
        assert!(s.contains("2.0"));
    }
}
