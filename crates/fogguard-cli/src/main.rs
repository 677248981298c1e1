//! CLI entry point for fogguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging, and exit codes.
//! All business logic lives in the `fogguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use fogguard_app::{
    CheckInput, EXIT_ERROR, ExplainOutput, OutputFormat, PolicySource, render_receipt, run_check,
    run_explain, serialize_receipt, verdict_exit_code,
};
use fogguard_settings::PolicyFormat;
use fogguard_types::DecisionReceipt;
use std::io::Read;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "fogguard",
    version,
    about = "Admission-control gate for agent propagation, replication, and outbound actions"
)]
struct Cli {
    /// Print diagnostic logging to stderr (RUST_LOG takes precedence).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decide whether a request is admitted.
    Check {
        /// Policy file (TOML, or JSON when named *.json) or preset name. Required.
        #[arg(long)]
        policy: String,

        /// Request as inline JSON.
        #[arg(long, conflicts_with = "file")]
        data: Option<String>,

        /// Read the request JSON from a file. Without --data or --file, stdin is read.
        #[arg(long)]
        file: Option<Utf8PathBuf>,

        /// Feature-flag overrides as a JSON object, e.g. '{"enforce_encoded_payload": true}'.
        #[arg(long)]
        feature_flags: Option<String>,

        /// List failed predicates with their reasons (text format).
        #[arg(long)]
        explain: bool,

        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Also write the JSON receipt to this path.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,
    },

    /// Explain a predicate ID or finding code with remediation guidance.
    Explain {
        /// The predicate (e.g., "within_limits.ttl") or code (e.g., "ttl_exceeds_limit").
        identifier: String,
    },

    /// List the built-in policy presets.
    Presets,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Yaml,
    #[value(alias = "markdown")]
    Md,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Yaml => OutputFormat::Yaml,
            Format::Md => OutputFormat::Markdown,
        }
    }
}

fn main() {
    // Usage errors exit 1, never 2: 2 is reserved for a deny.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(if err.use_stderr() { EXIT_ERROR } else { 0 });
        }
    };

    let code = init_logging(cli.verbose)
        .and_then(|()| run(cli))
        .unwrap_or_else(|err| {
            eprintln!("fogguard error: {err:#}");
            EXIT_ERROR
        });
    std::process::exit(code);
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(default_level))
        .context("create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("initialize logging")?;

    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Commands::Check {
            policy,
            data,
            file,
            feature_flags,
            explain,
            format,
            report_out,
        } => cmd_check(CheckArgs {
            policy,
            data,
            file,
            feature_flags,
            explain,
            format,
            report_out,
        }),
        Commands::Explain { identifier } => Ok(cmd_explain(&identifier)),
        Commands::Presets => {
            for name in fogguard_settings::preset_names() {
                println!("{name}");
            }
            Ok(0)
        }
    }
}

struct CheckArgs {
    policy: String,
    data: Option<String>,
    file: Option<Utf8PathBuf>,
    feature_flags: Option<String>,
    explain: bool,
    format: Format,
    report_out: Option<Utf8PathBuf>,
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<i32> {
    let policy_text = read_policy(&args.policy)?;
    let policy = match &policy_text {
        Some((text, format)) => PolicySource::Text {
            text,
            format: *format,
        },
        None => PolicySource::Preset(&args.policy),
    };

    let request_json = read_request(args.data, args.file.as_deref())?;

    let output = run_check(CheckInput {
        policy,
        request_json: &request_json,
        feature_flags: args.feature_flags.as_deref(),
    })?;

    if let Some(path) = &args.report_out {
        write_receipt_file(path, &output.receipt)?;
    }

    let rendered = render_receipt(&output.receipt, args.format.into(), args.explain)?;
    print!("{rendered}");

    Ok(verdict_exit_code(output.receipt.verdict))
}

/// An existing file wins; otherwise the value must name a preset.
fn read_policy(policy: &str) -> anyhow::Result<Option<(String, PolicyFormat)>> {
    let path = Utf8Path::new(policy);
    if path.is_file() {
        debug!(path = %path, "loading policy file");
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read policy file: {}", path))?;
        return Ok(Some((text, PolicyFormat::from_file_name(path.as_str()))));
    }
    if fogguard_settings::preset_names().contains(&policy) {
        debug!(preset = policy, "using policy preset");
        return Ok(None);
    }
    anyhow::bail!(
        "policy `{policy}` is neither a readable file nor a preset ({})",
        fogguard_settings::preset_names().join(", ")
    )
}

fn read_request(data: Option<String>, file: Option<&Utf8Path>) -> anyhow::Result<String> {
    if let Some(data) = data {
        return Ok(data);
    }
    if let Some(path) = file {
        debug!(path = %path, "reading request file");
        return std::fs::read_to_string(path)
            .with_context(|| format!("read request file: {}", path));
    }
    debug!("reading request from stdin");
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("read request from stdin")?;
    Ok(buf)
}

fn write_receipt_file(path: &Utf8Path, receipt: &DecisionReceipt) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_receipt(receipt).context("serialize receipt")?;
    std::fs::write(path, data).with_context(|| format!("write receipt: {}", path))?;
    Ok(())
}

fn cmd_explain(identifier: &str) -> i32 {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", fogguard_app::format_explanation(&exp));
            0
        }
        ExplainOutput::NotFound {
            identifier,
            suggestions,
        } => {
            eprint!("{}", fogguard_app::format_not_found(&identifier, &suggestions));
            EXIT_ERROR
        }
    }
}
