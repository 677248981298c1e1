//! Conformance tests for fogguard.
//!
//! These tests validate:
//! 1. All predicate IDs have explanations
//! 2. All codes have explanations
//! 3. All fixture receipts use known IDs and validate against the decision schema
//! 4. Live CLI output validates against the same schema

use assert_cmd::Command;
use fogguard_types::{SCHEMA_DECISION_V1, explain, ids};
use serde_json::Value;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("fogguard-cli should have parent")
        .parent()
        .expect("crates should have parent")
        .join("tests")
        .join("fixtures")
}

/// `(fixture name, golden receipt)` for every fixture that expects one.
fn fixture_receipts() -> Vec<(String, Value)> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(fixtures_dir()).expect("Failed to read fixtures dir") {
        let dir = entry.expect("Failed to read entry").path();
        let expected_path = dir.join("expected.json");
        if !dir.is_dir() || !expected_path.exists() {
            continue;
        }
        let name = dir.file_name().unwrap().to_string_lossy().to_string();
        let content = std::fs::read_to_string(&expected_path)
            .unwrap_or_else(|_| panic!("Failed to read {}", expected_path.display()));
        let expected: Value = serde_json::from_str(&content)
            .unwrap_or_else(|_| panic!("Fixture {} has invalid JSON", name));
        if let Some(receipt) = expected.get("receipt") {
            out.push((name, receipt.clone()));
        }
    }
    out.sort_by(|a, b| a.0.cmp(&b.0));
    assert!(!out.is_empty(), "No fixture receipts found");
    out
}

fn decision_validator() -> jsonschema::Validator {
    let schema = schemars::schema_for!(fogguard_types::DecisionReceipt);
    let schema_value = serde_json::to_value(&schema).expect("schema serializes");
    jsonschema::draft7::new(&schema_value).expect("decision schema compiles")
}

fn assert_valid(validator: &jsonschema::Validator, label: &str, value: &Value) {
    let errors: Vec<String> = validator.iter_errors(value).map(|e| e.to_string()).collect();
    assert!(
        errors.is_empty(),
        "{} does not match the decision schema:\n{}",
        label,
        errors.join("\n")
    );
}

// =============================================================================
// Explanation Coverage Tests
// =============================================================================

#[test]
fn all_predicate_ids_have_explanations() {
    for id in explain::all_predicate_ids() {
        let exp = explain::lookup_explanation(id)
            .unwrap_or_else(|| panic!("Predicate '{}' has no explanation in registry", id));
        assert!(!exp.title.is_empty(), "Predicate '{}' has empty title", id);
        assert!(
            !exp.description.is_empty(),
            "Predicate '{}' has empty description",
            id
        );
        assert!(
            !exp.remediation.is_empty(),
            "Predicate '{}' has empty remediation",
            id
        );
    }
}

#[test]
fn all_codes_have_explanations() {
    for code in explain::all_codes() {
        let exp = explain::lookup_explanation(code)
            .unwrap_or_else(|| panic!("Code '{}' has no explanation in registry", code));
        assert!(!exp.title.is_empty(), "Code '{}' has empty title", code);
        assert!(
            !exp.examples.before.is_empty() && !exp.examples.after.is_empty(),
            "Code '{}' is missing examples",
            code
        );
    }
}

#[test]
fn predicate_ids_and_codes_are_well_formed() {
    let is_snake = |s: &str| {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    };

    for id in explain::all_predicate_ids() {
        assert!(
            id.split('.').all(is_snake),
            "Predicate '{}' should be dotted snake_case",
            id
        );
    }
    for &code in explain::all_codes() {
        assert!(is_snake(code), "Code '{}' should be snake_case", code);
        assert!(
            !explain::all_predicate_ids().contains(&code),
            "Code '{}' collides with a predicate ID",
            code
        );
    }
}

#[test]
fn evaluation_order_is_stable() {
    assert_eq!(
        explain::all_predicate_ids(),
        [
            ids::PREDICATE_PAUSE_BEFORE_PROPAGATE,
            ids::PREDICATE_INTENT_ALLOWED,
            ids::PREDICATE_DOMAIN_ALLOWED,
            ids::PREDICATE_WITHIN_LIMITS_TTL,
            ids::PREDICATE_WITHIN_LIMITS_CHILDREN,
            ids::PREDICATE_WITHIN_LIMITS_CONCURRENCY,
            ids::PREDICATE_WITHIN_LIMITS_RATE,
            ids::PREDICATE_TTL_POSITIVE,
            ids::PREDICATE_NOT_ENCODED_PAYLOAD,
        ]
    );
}

// =============================================================================
// Fixture Receipt Tests
// =============================================================================

#[test]
fn all_fixture_receipts_use_decision_schema() {
    for (name, receipt) in fixture_receipts() {
        assert_eq!(
            receipt["schema"].as_str(),
            Some(SCHEMA_DECISION_V1),
            "Fixture '{}' uses the wrong schema id",
            name
        );
    }
}

#[test]
fn all_fixture_receipts_use_known_predicates_and_codes() {
    for (name, receipt) in fixture_receipts() {
        let failed = receipt["failed_predicates"]
            .as_array()
            .unwrap_or_else(|| panic!("Fixture '{}' has no failed_predicates array", name));
        let findings = receipt["findings"]
            .as_array()
            .unwrap_or_else(|| panic!("Fixture '{}' has no findings array", name));

        assert_eq!(
            failed.len(),
            findings.len(),
            "Fixture '{}' must pair each failed predicate with one finding",
            name
        );
        assert_eq!(
            receipt["allow"].as_bool(),
            Some(failed.is_empty()),
            "Fixture '{}' allow flag disagrees with failed_predicates",
            name
        );

        let mut last_index = None;
        for (predicate, finding) in failed.iter().zip(findings) {
            let predicate = predicate.as_str().expect("predicate is a string");
            let index = ids::PREDICATE_ORDER
                .iter()
                .position(|p| *p == predicate)
                .unwrap_or_else(|| panic!("Fixture '{}' has unknown predicate '{}'", name, predicate));
            assert!(
                last_index.is_none_or(|last| last < index),
                "Fixture '{}' lists predicates out of evaluation order",
                name
            );
            last_index = Some(index);

            assert_eq!(finding["predicate"].as_str(), Some(predicate));
            let code = finding["code"].as_str().expect("code is a string");
            assert!(
                explain::all_codes().contains(&code),
                "Fixture '{}' has unknown code '{}'",
                name,
                code
            );
        }
    }
}

#[test]
fn all_fixture_receipts_validate_against_generated_schema() {
    let validator = decision_validator();
    for (name, receipt) in fixture_receipts() {
        assert_valid(&validator, &format!("fixture '{}'", name), &receipt);
    }
}

// =============================================================================
// Live Output Tests
// =============================================================================

#[test]
#[allow(deprecated)]
fn live_receipts_validate_against_generated_schema() {
    let validator = decision_validator();
    let requests = [
        r#"{"pauseBeforePropagate":true,"intent":"creative","domain":"github.com","ttl":3,"children":5,"concurrency":2,"rate":30}"#,
        r#"{"pauseBeforePropagate":false,"intent":"exfiltrate","domain":"evil.example","ttl":0,"children":9,"concurrency":9,"rate":99.5,"payload":"aGVsbG8gd29ybGQ="}"#,
    ];

    for request in requests {
        let output = Command::cargo_bin("fogguard")
            .expect("fogguard binary")
            .args(["check", "--policy", "strict", "--format", "json"])
            .write_stdin(request)
            .output()
            .expect("run fogguard");
        let receipt: Value =
            serde_json::from_slice(&output.stdout).expect("stdout should be a JSON receipt");
        assert_valid(&validator, "live receipt", &receipt);
    }
}

#[test]
fn policy_schema_accepts_fixture_policies_as_json() {
    let schema = schemars::schema_for!(fogguard_settings::PolicyFileV1);
    let schema_value = serde_json::to_value(&schema).expect("schema serializes");
    let validator = jsonschema::draft7::new(&schema_value).expect("policy schema compiles");

    for entry in std::fs::read_dir(fixtures_dir()).expect("Failed to read fixtures dir") {
        let policy_path = entry.expect("entry").path().join("policy.toml");
        if !policy_path.exists() {
            continue;
        }
        let text = std::fs::read_to_string(&policy_path).expect("read policy");
        let file = fogguard_settings::parse_policy_toml(&text)
            .unwrap_or_else(|e| panic!("{} should parse: {}", policy_path.display(), e));
        let value = serde_json::to_value(&file).expect("policy serializes");
        assert_valid(&validator, &policy_path.display().to_string(), &value);
    }
}
