//! Developer tasks (schema generation, fixture conformance, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use fogguard_test_util::normalize_nondeterministic;
use fogguard_types::{explain, ids};
use schemars::schema_for;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(manifest_dir)
    } else {
        manifest_dir
    }
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_decision_schema() -> schemars::Schema {
    schema_for!(fogguard_types::DecisionReceipt)
}

fn generate_policy_schema() -> schemars::Schema {
    schema_for!(fogguard_settings::PolicyFileV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "fogguard.decision.v1.json",
            generate: generate_decision_schema,
        },
        SchemaSpec {
            filename: "fogguard.policy.v1.json",
            generate: generate_policy_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  conform           Validate fixture receipts against the decision schema");
    eprintln!("  conform-full      conform + run the built fogguard binary against every fixture");
    eprintln!("  explain-coverage  Validate all predicate IDs and codes have explanations");
}

fn compile_decision_schema() -> anyhow::Result<jsonschema::Validator> {
    let schema_value =
        serde_json::to_value(generate_decision_schema()).context("Failed to encode schema")?;
    jsonschema::draft7::new(&schema_value)
        .map_err(|e| anyhow::anyhow!("Failed to compile schema: {}", e))
}

/// One fixture directory and its parsed `expected.json`.
struct Fixture {
    name: String,
    dir: PathBuf,
    expected: Value,
}

fn load_fixtures() -> anyhow::Result<Vec<Fixture>> {
    let root = fixtures_dir();
    let mut fixtures = Vec::new();

    for entry in fs::read_dir(&root).context("Failed to read tests/fixtures/")? {
        let dir = entry?.path();
        let expected_path = dir.join("expected.json");
        if !dir.is_dir() || !expected_path.exists() {
            continue;
        }
        let name = dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let content = fs::read_to_string(&expected_path)
            .with_context(|| format!("Failed to read {}", expected_path.display()))?;
        let expected = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}/expected.json", name))?;
        fixtures.push(Fixture {
            name,
            dir,
            expected,
        });
    }

    fixtures.sort_by(|a, b| a.name.cmp(&b.name));
    if fixtures.is_empty() {
        bail!("No fixtures found in {}", root.display());
    }
    Ok(fixtures)
}

/// Predicate IDs and codes in a receipt must come from the registry.
fn receipt_vocabulary_errors(name: &str, receipt: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    let failed = receipt
        .get("failed_predicates")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    for id in failed.iter().filter_map(Value::as_str) {
        if !ids::PREDICATE_ORDER.contains(&id) {
            errors.push(format!("{}: unknown predicate '{}'", name, id));
        }
    }

    let findings = receipt
        .get("findings")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if findings.len() != failed.len() {
        errors.push(format!(
            "{}: {} findings for {} failed predicates",
            name,
            findings.len(),
            failed.len()
        ));
    }
    for (i, finding) in findings.iter().enumerate() {
        let code = finding.get("code").and_then(Value::as_str).unwrap_or("");
        if !explain::all_codes().contains(&code) {
            errors.push(format!("{}: findings[{}] has unknown code '{}'", name, i, code));
        }
    }

    let allow = receipt.get("allow").and_then(Value::as_bool);
    if allow != Some(failed.is_empty()) {
        errors.push(format!("{}: allow must be true iff nothing failed", name));
    }

    errors
}

/// Validate fixture receipts: schema conformance and known vocabulary.
fn conform() -> anyhow::Result<()> {
    let compiled = compile_decision_schema()?;
    println!("✓ fogguard.decision.v1 schema compiles");

    let mut errors = Vec::new();
    let mut receipts = 0;

    for fixture in load_fixtures()? {
        let Some(receipt) = fixture.expected.get("receipt") else {
            println!("  - {} is an error fixture (no receipt)", fixture.name);
            continue;
        };
        for err in compiled.iter_errors(receipt) {
            errors.push(format!("{}: schema validation: {}", fixture.name, err));
        }
        errors.extend(receipt_vocabulary_errors(&fixture.name, receipt));
        receipts += 1;
        println!("  ✓ {} validates", fixture.name);
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {} fixture receipts pass conformance checks!", receipts);
    Ok(())
}

/// Full conformance: fixture receipts, then the built binary against every fixture.
fn conform_full() -> anyhow::Result<()> {
    conform()?;

    println!("\n--- Full conformance: fogguard binary output ---\n");

    let compiled = compile_decision_schema()?;
    let bin = project_root().join("target").join("debug").join("fogguard");
    #[cfg(target_os = "windows")]
    let bin = bin.with_extension("exe");

    if !bin.exists() {
        bail!(
            "fogguard binary not found at {}\n\nRun `cargo build -p fogguard-cli` first.",
            bin.display()
        );
    }

    let mut errors = Vec::new();

    for fixture in load_fixtures()? {
        let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;
        let receipt_out = temp_dir.path().join("receipt.json");

        let output = std::process::Command::new(&bin)
            .arg("check")
            .arg("--policy")
            .arg(fixture.dir.join("policy.toml"))
            .arg("--file")
            .arg(fixture.dir.join("request.json"))
            .arg("--report-out")
            .arg(&receipt_out)
            .output()
            .with_context(|| format!("Failed to run fogguard on fixture '{}'", fixture.name))?;

        let expected_code = fixture.expected["exit_code"].as_i64();
        if output.status.code().map(i64::from) != expected_code {
            errors.push(format!(
                "fixture '{}': exit code {:?}, expected {:?}",
                fixture.name,
                output.status.code(),
                expected_code
            ));
            continue;
        }

        let Some(golden) = fixture.expected.get("receipt") else {
            println!("  ✓ {} fails as expected", fixture.name);
            continue;
        };

        let content = fs::read_to_string(&receipt_out)
            .with_context(|| format!("fixture '{}': receipt not written", fixture.name))?;
        let actual: Value = serde_json::from_str(&content)
            .with_context(|| format!("fixture '{}': receipt is not JSON", fixture.name))?;

        for err in compiled.iter_errors(&actual) {
            errors.push(format!("{}: schema validation: {}", fixture.name, err));
        }
        if normalize_nondeterministic(actual) != normalize_nondeterministic(golden.clone()) {
            errors.push(format!("{}: receipt differs from golden", fixture.name));
        } else {
            println!("  ✓ {} matches golden receipt", fixture.name);
        }
    }

    if !errors.is_empty() {
        eprintln!("\nFull conformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!(
            "Full conformance validation failed with {} errors",
            errors.len()
        );
    }

    println!("\n✓ Full conformance checks passed!");
    Ok(())
}

/// Validate that all predicate IDs and codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let predicates = explain::all_predicate_ids();
    let codes = explain::all_codes();
    let mut errors = Vec::new();

    for (kind, identifier) in predicates
        .iter()
        .map(|p| ("Predicate", *p))
        .chain(codes.iter().map(|c| ("Code", *c)))
    {
        match explain::lookup_explanation(identifier) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("{} '{}' has empty title", kind, identifier));
                }
                if exp.description.is_empty() {
                    errors.push(format!("{} '{}' has empty description", kind, identifier));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("{} '{}' has empty remediation", kind, identifier));
                }
            }
            None => errors.push(format!("{} '{}' has no explanation", kind, identifier)),
        }
    }

    if errors.is_empty() {
        println!("✓ {} predicates have explanations", predicates.len());
        println!("✓ {} codes have explanations", codes.len());
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "conform-full" => conform_full(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
