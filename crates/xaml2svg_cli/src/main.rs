//! xaml2svg CLI
//!
//! Convert a XAML icon dictionary into a directory of SVG files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use xaml2svg::Converter;

mod config;

use config::{Naming, Xaml2SvgConfig};

#[derive(Parser)]
#[command(name = "xaml2svg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert XAML DrawingImage icons to SVG", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./xaml2svg.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every DrawingImage in a resource dictionary
    Convert {
        /// XAML resource dictionary
        input: PathBuf,

        /// Directory receiving one SVG per icon
        output: PathBuf,

        /// Name files by logical name or by full identifier
        #[arg(long, value_enum)]
        naming: Option<Naming>,

        /// Fill color for brushes that cannot be converted
        #[arg(long)]
        fallback: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = match &cli.config {
        Some(path) => Xaml2SvgConfig::load(path)?,
        None => Xaml2SvgConfig::load_from_dir(Path::new("."))?,
    };

    match cli.command {
        Commands::Convert {
            input,
            output,
            naming,
            fallback,
        } => cmd_convert(config, &input, &output, naming, fallback),
    }
}

fn cmd_convert(
    mut config: Xaml2SvgConfig,
    input: &Path,
    output: &Path,
    naming: Option<Naming>,
    fallback: Option<String>,
) -> Result<()> {
    if let Some(naming) = naming {
        config.output.naming = naming;
    }
    if let Some(fallback) = fallback {
        config.fill.fallback = fallback;
    }

    validate_paths(input, output)?;
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let outcome = Converter::new(config.to_options())
        .convert_file(input, output)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    for diagnostic in &outcome.diagnostics {
        warn!("{}", diagnostic);
    }

    info!(
        "{} icon(s) written to {}, {} skipped, {} with fallback fill",
        outcome.written.len(),
        output.display(),
        outcome.diagnostics.skipped_icons(),
        outcome.diagnostics.fallback_fills()
    );

    Ok(())
}

fn validate_paths(input: &Path, output: &Path) -> Result<()> {
    if !input.is_file() {
        anyhow::bail!("Input file {} does not exist", input.display());
    }

    let is_xaml = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xaml"));
    if !is_xaml {
        anyhow::bail!("Input file {} is not a .xaml file", input.display());
    }

    if output.is_file() {
        anyhow::bail!(
            "Output path {} is a file; expected a directory",
            output.display()
        );
    }

    Ok(())
}
