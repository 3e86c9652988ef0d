mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::Parser;
use thiserror::Error;

use config::{ConfigFile, ResolvedRun, resolve_run};
use logging::init_logging;
use tiddlergen_generate::output::write_bytes_atomic;
use tiddlergen_generate::{GenerationEngine, GenerationError};

#[derive(Debug, Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug, Default)]
#[command(
    name = "tiddlergen",
    version,
    about = "Generate a JSON array of TiddlyWiki tiddlers for import."
)]
struct Cli {
    /// Number of tiddlers to generate (zero or negative gives an empty array).
    #[arg(short, long, required_unless_present = "config", allow_negative_numbers = true)]
    num: Option<i64>,
    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Title prefix (default: Tiddler).
    #[arg(short, long)]
    prefix: Option<String>,
    /// Starting index for titles (default: 1).
    #[arg(long, allow_negative_numbers = true)]
    start_index: Option<i64>,
    /// Body text template; placeholders: {i}, {title}.
    #[arg(long)]
    text: Option<String>,
    /// Fixed tag to add (repeatable or comma-separated).
    #[arg(long = "tag", value_name = "TAG")]
    tags: Vec<String>,
    /// Content type (default: text/vnd.tiddlywiki).
    #[arg(long = "type", value_name = "TYPE")]
    content_type: Option<String>,
    /// Creator field.
    #[arg(long)]
    creator: Option<String>,
    /// Modifier field.
    #[arg(long)]
    modifier: Option<String>,
    /// Seconds to add between each tiddler timestamp.
    #[arg(long, allow_negative_numbers = true)]
    increment_seconds: Option<i64>,

    /// Enable random tag assignment from a pool.
    #[arg(long, overrides_with = "no_random_tags")]
    random_tags: bool,
    /// Disable random tags even when the config file enables them.
    #[arg(long, overrides_with = "random_tags")]
    no_random_tags: bool,
    /// Tag pool (repeatable or comma-separated); a default pool is used if omitted.
    #[arg(long, value_name = "TAG")]
    tag_pool: Vec<String>,
    /// Minimum number of random tags per tiddler (default: 0).
    #[arg(long, allow_negative_numbers = true)]
    min_tags: Option<i64>,
    /// Maximum number of random tags per tiddler (default: 3).
    #[arg(long, allow_negative_numbers = true)]
    max_tags: Option<i64>,

    /// Generate lorem ipsum text instead of the --text template.
    #[arg(long, overrides_with = "no_lorem")]
    lorem: bool,
    /// Use the --text template even when the config file enables lorem.
    #[arg(long, overrides_with = "lorem")]
    no_lorem: bool,
    /// Paragraphs per tiddler (default: 1).
    #[arg(long, allow_negative_numbers = true)]
    lorem_paragraphs: Option<i64>,
    /// Minimum sentences per paragraph (default: 3).
    #[arg(long, allow_negative_numbers = true)]
    lorem_min_sentences: Option<i64>,
    /// Maximum sentences per paragraph (default: 7).
    #[arg(long, allow_negative_numbers = true)]
    lorem_max_sentences: Option<i64>,
    /// Minimum words per sentence (default: 5).
    #[arg(long, allow_negative_numbers = true)]
    lorem_min_words: Option<i64>,
    /// Maximum words per sentence (default: 12).
    #[arg(long, allow_negative_numbers = true)]
    lorem_max_words: Option<i64>,

    /// Random seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Timestamp of the first tiddler (RFC 3339; default: now).
    #[arg(long, value_parser = parse_base_time)]
    base_time: Option<DateTime<Utc>>,

    /// TOML file with defaults for any of the options above.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write a JSON generation report to this path.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Append JSON logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_base_time(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| format!("expected an RFC 3339 timestamp: {err}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.log_file.as_deref()) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(event = "run_failed", error = %err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let file = match cli.config.as_deref() {
        Some(path) => {
            let loaded = ConfigFile::load(path)?;
            tracing::info!(event = "config_loaded", path = %path.display());
            loaded
        }
        None => ConfigFile::default(),
    };

    let ResolvedRun {
        options,
        output,
        report,
    } = resolve_run(&cli, file)?;

    tracing::info!(event = "run_started", num = options.num, output = %output);

    let engine = GenerationEngine::new(options);
    let mut result = engine.run()?;
    result.write_to(&output)?;

    if let Some(path) = report {
        let data = serde_json::to_vec_pretty(&result.report)?;
        write_bytes_atomic(&path, &data)?;
        tracing::info!(event = "report_written", path = %path.display());
    }

    tracing::info!(
        event = "run_finished",
        status = "success",
        run_id = %result.report.run_id,
        records = result.report.records,
        bytes_written = result.report.bytes_written
    );
    Ok(())
}
