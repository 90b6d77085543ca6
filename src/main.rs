use anyhow::{Context, Result};
use clap::Parser;
use meteojson::{convert_file, Config};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Convert an Open-Meteo CSV export into a clean JSON array"
)]
struct Args {
    /// CSV export to read (default: the bundled station export)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// JSON file to write (default: clean_output.json)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// YAML file with input_path / output_path / header_marker / indent
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) resolve config ───────────────────────────────────────────
    let args = Args::parse();
    let base = match &args.config {
        Some(path) => Config::from_yaml_file(path)?,
        None => Config::default(),
    };
    let config = base.with_overrides(args.input, args.output);
    info!(
        input = %config.input_path.display(),
        output = %config.output_path.display(),
        "startup"
    );

    // ─── 3) convert ──────────────────────────────────────────────────
    let confirmation = run(&config)?;
    println!("{}", confirmation);
    Ok(())
}

/// Convert per `config` and return the confirmation line. Only a complete
/// write produces one.
fn run(config: &Config) -> Result<String> {
    let summary = convert_file(config).with_context(|| {
        format!(
            "converting {} -> {}",
            config.input_path.display(),
            config.output_path.display()
        )
    })?;
    if summary.dropped_columns > 0 {
        info!(dropped = summary.dropped_columns, "skipped blank columns");
    }

    Ok(format!("Clean JSON saved to: {}", config.output_path.display()))
}
