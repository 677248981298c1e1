use serde::Serialize;

/// A single YAML document (`---` header) of any serializable value, typically the receipt.
pub fn render_yaml<T: Serialize>(value: &T) -> Result<String, serde_yaml::Error> {
    let body = serde_yaml::to_string(value)?;
    Ok(format!("---\n{body}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn starts_with_document_marker() {
        let doc = render_yaml(&json!({"verdict": "deny", "allow": false})).expect("yaml");
        assert!(doc.starts_with("---\n"));
        assert!(doc.contains("verdict: deny"));
        assert!(doc.contains("allow: false"));
    }

    #[test]
    fn preserves_list_order() {
        let doc = render_yaml(&json!({
            "failed_predicates": ["within_limits.ttl", "ttl_positive"]
        }))
        .expect("yaml");
        let ttl = doc.find("within_limits.ttl").expect("present");
        let positive = doc.find("ttl_positive").expect("present");
        assert!(ttl < positive);
    }
}
