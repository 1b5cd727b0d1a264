//! Job Schedule Visualizer command line.
//!
//! Loads a schedule spreadsheet and prints its Gantt chart.
//!
//! # Usage
//!
//! ```bash
//! # Text chart, reader picked from the extension
//! cargo run --bin jsv -- jobs.xlsx
//!
//! # Chart model as JSON, explicit reader and config
//! cargo run --bin jsv -- plan.dat --format ods --config jsv.toml --output json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log filter (default: info), ignored when `--verbose` is given

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use jsv_rust::config::{ConfigError, LoaderConfig};
use jsv_rust::services::text_chart::DEFAULT_WIDTH;
use jsv_rust::{GanttRenderer, ScheduleBuilder, ScheduleRenderer, TextGantt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputKind {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "jsv", version, about = "Render job schedules from spreadsheets")]
struct Args {
    /// Spreadsheet to load
    file: PathBuf,

    /// Source format tag (xlsx or ods); defaults to the file extension
    #[arg(short, long)]
    format: Option<String>,

    /// Loader configuration file; defaults to jsv.toml in the standard locations
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output kind
    #[arg(short, long, value_enum, default_value_t = OutputKind::Text)]
    output: OutputKind,

    /// Bar area width for text output
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("jsv: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let builder = ScheduleBuilder::new(&config);

    let loaded = match &args.format {
        Some(tag) => builder.build(&args.file, tag),
        None => builder.build_from_path(&args.file),
    };
    let schedule = match loaded {
        Ok(schedule) => schedule,
        Err(err) => bail!(
            "failed to load {} ({}): {}",
            args.file.display(),
            err.kind(),
            err
        ),
    };
    info!("Rendering {} jobs", schedule.len());

    let format = builder.time_parser().format().clone();
    match args.output {
        OutputKind::Text => {
            print!("{}", TextGantt::new(format, args.width).render(&schedule));
        }
        OutputKind::Json => {
            let chart = GanttRenderer::new(format).render(&schedule);
            let json =
                serde_json::to_string_pretty(&chart).context("Failed to serialize chart")?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<LoaderConfig> {
    match path {
        Some(path) => LoaderConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => match LoaderConfig::from_default_location() {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound) => {
                debug!("No config file found, using defaults");
                Ok(LoaderConfig::default())
            }
            Err(err) => Err(err).context("Failed to load default config"),
        },
    }
}
