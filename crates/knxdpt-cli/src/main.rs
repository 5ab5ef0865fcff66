use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use glob::glob;
use knxdpt_core::{BatchReport, DptDescriptor, DptError, ErrorKind, registry};
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::level_filters::LevelFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("KNXDPT_BUILD_COMMIT"),
    " (",
    env!("KNXDPT_BUILD_COMMIT_FULL"),
    ")\ndate: ",
    env!("KNXDPT_BUILD_DATE"),
);

const EXAMPLES: &str = "Examples:\n  knxdpt decode 9.001 000866\n  knxdpt encode DPST-232-600 255,128,0\n  knxdpt list --json\n  knxdpt batch telegrams.txt -o report.json";

#[derive(Parser, Debug)]
#[command(name = "knxdpt")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Encode and decode KNX datapoint type (DPT) payloads.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a hex payload (control octet included).
    #[command(after_help = "Examples:\n  knxdpt decode 9.001 000866\n  knxdpt decode 10.001 00 28 1e 00 --json")]
    Decode {
        /// Datapoint type, e.g. 9.001, 9.1 or DPST-9-1
        dpt: String,

        /// Payload bytes in hex; spaces, ':' and 0x prefixes are accepted
        #[arg(required = true, num_args = 1..)]
        payload: Vec<String>,

        /// Print a JSON record instead of text
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,
    },
    /// Encode a value given in its text form and print the payload as hex.
    #[command(after_help = "Examples:\n  knxdpt encode 9.001 21.5\n  knxdpt encode 19.001 ''\n  knxdpt encode 242.600 100,200,50,true,1")]
    Encode {
        /// Datapoint type, e.g. 9.001, 9.1 or DPST-9-1
        dpt: String,

        /// Value text; empty means "now" for date and time types
        #[arg(default_value = "", allow_hyphen_values = true)]
        text: String,
    },
    /// List every supported datapoint type.
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Decode a file of `<DPT> <HEX>` lines into a versioned JSON report.
    #[command(after_help = "Examples:\n  knxdpt batch telegrams.txt -o report.json\n  knxdpt batch 'logs/*.txt' --stdout --pretty")]
    Batch {
        /// Path to a text file (glob patterns must match exactly one file)
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Exit with a non-zero code if any line failed to decode
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Decode {
            dpt,
            payload,
            json,
            pretty,
        } => cmd_decode(&dpt, &payload.join(" "), json, pretty),
        Commands::Encode { dpt, text } => cmd_encode(&dpt, &text),
        Commands::List { json } => cmd_list(json),
        Commands::Batch {
            input,
            report,
            stdout,
            pretty,
            compact,
            strict,
        } => cmd_batch(BatchArgs {
            input,
            report,
            stdout,
            pretty,
            compact,
            quiet: cli.quiet,
            strict,
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

impl From<DptError> for CliError {
    fn from(err: DptError) -> Self {
        let hint = match err.kind() {
            ErrorKind::UnknownType => "run `knxdpt list` to see supported types",
            ErrorKind::InvalidLength => "payload length includes the leading control octet",
            ErrorKind::OutOfRange => "value is outside the domain of this type",
            ErrorKind::MalformedText => "check the text form with `knxdpt encode --help`",
        };
        CliError::new(err.to_string(), Some(hint.to_string()))
    }
}

fn resolve_type(dpt: &str) -> Result<&'static DptDescriptor, CliError> {
    Ok(registry::resolve(dpt)?)
}

fn cmd_decode(dpt: &str, payload: &str, json: bool, pretty: bool) -> Result<(), CliError> {
    let descriptor = resolve_type(dpt)?;
    let bytes = knxdpt_core::parse_payload(payload).map_err(|err| {
        CliError::new(
            format!("invalid hex payload '{}': {}", payload, err),
            Some("use hex digits, e.g. 000866 or 00:08:66".to_string()),
        )
    })?;
    tracing::debug!(dpt = %descriptor.id, len = bytes.len(), "decoding payload");
    let decoded = knxdpt_core::decode(descriptor.id, &bytes)?;

    if json {
        println!("{}", to_json(&decoded, pretty)?);
    } else if decoded.unit.is_empty() {
        println!("{}", decoded.text);
    } else {
        println!("{} {}", decoded.text, decoded.unit);
    }
    Ok(())
}

fn cmd_encode(dpt: &str, text: &str) -> Result<(), CliError> {
    let descriptor = resolve_type(dpt)?;
    tracing::debug!(dpt = %descriptor.id, text, "encoding text");
    let payload = knxdpt_core::encode_text(descriptor.id, text)?;
    println!("{}", hex::encode(payload));
    Ok(())
}

fn cmd_list(json: bool) -> Result<(), CliError> {
    let catalogue = knxdpt_core::catalogue();
    if json {
        println!("{}", to_json(&catalogue, false)?);
        return Ok(());
    }
    for info in catalogue {
        println!(
            "{:<8} {:<32} {:<12} {:>2}  {}",
            info.id.to_string(),
            info.name,
            info.family.as_str(),
            info.wire_len,
            info.unit
        );
    }
    Ok(())
}

struct BatchArgs {
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
}

fn cmd_batch(args: BatchArgs) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;
    let report_path = if args.stdout {
        None
    } else {
        Some(args.report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    if let Some(report_path) = report_path.as_ref() {
        ensure_distinct_output(report_path, &input_abs)?;
    }

    let mut rep = knxdpt_core::decode_batch_file(&resolved_input)
        .context("batch decoding failed")?;
    rep.generated_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("failed to format report timestamp")?;
    let json = serialize_report(&rep, args.pretty, args.compact)?;

    match report_path {
        None => print!("{}", json),
        Some(report_path) => {
            write_report(&report_path, &json)?;
            if !args.quiet {
                eprintln!(
                    "OK: {} decoded, {} failed -> {}",
                    rep.entries.len(),
                    rep.failures.len(),
                    report_path.display()
                );
            }
        }
    }

    if args.strict && !rep.failures.is_empty() {
        return Err(CliError::new(
            format!("{} line(s) failed to decode", rep.failures.len()),
            Some(first_failure_hint(&rep)),
        ));
    }
    Ok(())
}

fn first_failure_hint(rep: &BatchReport) -> String {
    match rep.failures.first() {
        Some(failure) => format!("line {}: {}", failure.line, failure.message),
        None => "inspect the `failures` array of the report".to_string(),
    }
}

fn ensure_distinct_output(report_path: &Path, input_abs: &Path) -> Result<(), CliError> {
    let report_dir = report_path
        .parent()
        .map(|parent| {
            if parent.as_os_str().is_empty() {
                fs::canonicalize(".")
            } else {
                fs::canonicalize(parent)
            }
        })
        .transpose()
        .with_context(|| format!("Failed to resolve output path: {}", report_path.display()))?;
    let Some(report_dir) = report_dir else {
        return Ok(());
    };
    let file_name = report_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path"))?;
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!(
                "report path must differ from input: {}",
                report_path.display()
            ),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn write_report(report: &Path, json: &str) -> Result<(), CliError> {
    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;
    Ok(())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("JSON serialization failed").map_err(Into::into)
}

fn serialize_report(rep: &BatchReport, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    to_json(rep, pretty)
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a text file of `<DPT> <HEX>` lines".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a text file of `<DPT> <HEX>` lines".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        message.push_str("; matches: ");
        message.push_str(&listed);
        if matches.len() > 3 {
            message.push_str(", ...");
        }
        return Err(CliError::new(
            message,
            Some("pass a single input file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
