use crate::fingerprint::fingerprint_for_predicate;
use fogguard_types::Finding;
use serde_json::Value;

pub fn finding(
    predicate: &str,
    code: &str,
    message: String,
    help: &str,
    values: &[&str],
    data: Value,
) -> Finding {
    Finding {
        predicate: predicate.to_string(),
        code: code.to_string(),
        message,
        help: Some(help.to_string()),
        fingerprint: Some(fingerprint_for_predicate(predicate, code, values)),
        data,
    }
}
