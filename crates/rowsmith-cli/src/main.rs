mod logging;
mod workspace;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use logging::LoggingError;
use rowsmith_export::Exporter;
use rowsmith_generate::{GenerateOptions, Synthesizer};
use rowsmith_pipeline::{Pipeline, PipelineError};
use rowsmith_store::{BatchStore, SqliteBatchStore, StoreError, StoreOptions};
use serde::Serialize;
use thiserror::Error;
use workspace::{WorkspaceError, WorkspacePaths, WorkspaceSettings, load_or_create_settings};

#[derive(Debug, Error)]
enum CliError {
    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),
    #[error("{0}")]
    Pipeline(#[from] PipelineError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    fn code(&self) -> &'static str {
        match self {
            CliError::Pipeline(err) => err.code(),
            CliError::Store(_) => "storage_error",
            CliError::Workspace(_) => "invalid_configuration",
            CliError::Logging(_) | CliError::Io(_) | CliError::Json(_) => "internal_error",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "rowsmith", version, about = "Synthetic person records to CSV")]
struct Cli {
    /// Workspace directory holding config, logs, database and exports.
    #[arg(long, global = true, default_value = ".rowsmith")]
    workspace: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new batch, replacing the stored one, and export it.
    Generate(GenerateArgs),
    /// Remove the stored batch.
    Reset,
    /// Re-export the stored batch.
    Export,
    /// Copy the current export file to stdout or a path.
    Download(DownloadArgs),
    /// Show the stored batch size and export file.
    Status,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of records, 1 to 1,000,000.
    #[arg(value_name = "ROWS")]
    rows: String,
    /// Seed for small (sampled) batches.
    #[arg(long)]
    seed: Option<u64>,
    /// Fail instead of storing a short batch when sampling runs out of retries.
    #[arg(long, overrides_with = "no_strict")]
    strict: bool,
    /// Store a short batch even when settings.toml enables strict generation.
    #[arg(long, overrides_with = "strict")]
    no_strict: bool,
}

impl GenerateArgs {
    fn strict_override(&self) -> Option<bool> {
        match (self.strict, self.no_strict) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Args, Debug)]
struct DownloadArgs {
    /// Destination file. Writes to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Serialize)]
struct Failure<'a> {
    success: bool,
    code: &'a str,
    message: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(event = "command_failed", code = err.code(), error = %err);
            let failure = Failure {
                success: false,
                code: err.code(),
                message: err.to_string(),
            };
            match serde_json::to_string(&failure) {
                Ok(line) => eprintln!("{line}"),
                Err(_) => eprintln!("{err}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let paths = WorkspacePaths::new(cli.workspace);
    paths.ensure_dirs()?;
    let settings = load_or_create_settings(&paths)?;
    logging::init_logging(&paths.cli_log_path())?;

    let timer = Instant::now();
    let command_name = command_name(&cli.command);
    tracing::info!(event = "command_started", command = command_name);

    let (seed, strict) = match &cli.command {
        Command::Generate(args) => (
            args.seed.or(settings.seed),
            args.strict_override().unwrap_or(settings.strict_generation),
        ),
        _ => (settings.seed, settings.strict_generation),
    };
    let pipeline = build_pipeline(&paths, &settings, seed, strict).await?;

    match cli.command {
        Command::Generate(args) => {
            let outcome = pipeline.request_generation_text(&args.rows).await?;
            print_json(&outcome)?;
        }
        Command::Reset => {
            pipeline.request_reset().await?;
            print_json(&serde_json::json!({ "success": true }))?;
        }
        Command::Export => {
            let summary = pipeline.request_export().await?;
            print_json(&summary)?;
        }
        Command::Download(args) => {
            let mut file = pipeline.request_export_file().await?;
            let copied = match args.out {
                Some(out) => {
                    let mut target = tokio::fs::File::create(&out).await?;
                    tokio::io::copy(&mut file, &mut target).await?
                }
                None => tokio::io::copy(&mut file, &mut tokio::io::stdout()).await?,
            };
            tracing::info!(event = "export_downloaded", bytes = copied);
        }
        Command::Status => {
            let status = pipeline.status().await?;
            print_json(&status)?;
        }
    }

    tracing::info!(
        event = "command_finished",
        command = command_name,
        status = "success",
        duration_ms = timer.elapsed().as_millis() as u64
    );
    Ok(())
}

async fn build_pipeline(
    paths: &WorkspacePaths,
    settings: &WorkspaceSettings,
    seed: Option<u64>,
    strict: bool,
) -> Result<Pipeline, CliError> {
    let store_options = StoreOptions {
        database_path: paths.resolve(&settings.database_path),
        max_connections: settings.max_connections,
        acquire_timeout: Duration::from_secs(10),
        insert_chunk_size: settings.insert_chunk_size,
    };
    let store: Arc<dyn BatchStore> = Arc::new(SqliteBatchStore::connect(&store_options).await?);

    let generate_options = GenerateOptions {
        seed,
        sampling_threshold: settings.sampling_threshold,
        reference_date: None,
        strict,
    };
    let exporter = Exporter::new(Arc::clone(&store), paths.resolve(&settings.export_path));

    Ok(Pipeline::new(
        Synthesizer::new(generate_options),
        store,
        exporter,
    ))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Generate(_) => "generate",
        Command::Reset => "reset",
        Command::Export => "export",
        Command::Download(_) => "download",
        Command::Status => "status",
    }
}
