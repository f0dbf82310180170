//! Command line interface
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ctorkit metadata` | Print compiled metadata of every available target |
//! | `ctorkit converters` | List registered entity converters |
//! | `ctorkit activate <FILE>` | Activate the records in FILE and run them over samples |

use crate::samples::{Filter, SampleClock, SAMPLE_RATE_VARIABLE};
use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use ctorkit_application::context::{Context, Dependency};
use ctorkit_application::ports::Catalog;
use ctorkit_application::use_cases::{Activator, MetadataCompiler};
use ctorkit_domain::value_objects::Activation;
use ctorkit_infrastructure::config::{AppConfig, ConfigLoader};
use ctorkit_infrastructure::{build_context, init_logging};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

const DEFAULT_SAMPLE_RATE_HZ: f64 = 100.0;

/// Command line interface for ctorkit
#[derive(Parser, Debug)]
#[command(name = "ctorkit")]
#[command(about = "Describe and activate registered targets")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Force development mode regardless of configuration
    #[arg(long, global = true)]
    pub development: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print compiled metadata of every available target as JSON
    Metadata {
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// List registered entity converters
    Converters,

    /// Activate targets from a JSON file of activation records
    Activate {
        /// File holding one activation record or an array of them
        file: PathBuf,

        /// Comma-separated samples to run through the activated filters
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        input: Vec<f64>,
    },
}

/// Run the CLI, writing command output to `out`
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    if cli.development {
        config.context.development = true;
    }
    // A host embedding the CLI may already own the global subscriber
    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Logging not initialized: {e}");
    }

    let catalog = Catalog::discover().context("Failed to build the target catalog")?;
    let context = session_context(&config)?;

    match cli.command {
        Command::Metadata { pretty } => print_metadata(&catalog, &context, pretty, out),
        Command::Converters => print_converters(&catalog, out),
        Command::Activate { file, input } => activate_file(&catalog, &context, &file, &input, out),
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = path {
        loader = loader.with_config_path(path);
    }
    Ok(loader.load()?)
}

/// Context from configuration plus the sample clock dependency
pub fn session_context(config: &AppConfig) -> Result<Context> {
    let mut context = build_context(&config.context)?;
    let rate_hz = if context.contains(SAMPLE_RATE_VARIABLE) {
        context.get::<f64>(SAMPLE_RATE_VARIABLE)?
    } else {
        DEFAULT_SAMPLE_RATE_HZ
    };
    context.add_dependency(Dependency::new(Arc::new(SampleClock { rate_hz })))?;
    Ok(context)
}

fn print_metadata(
    catalog: &Catalog,
    context: &Context,
    pretty: bool,
    out: &mut impl Write,
) -> Result<()> {
    let metadata = MetadataCompiler::new(catalog, context).compile_all()?;
    info!(count = metadata.len(), "Compiled target metadata");
    let json = if pretty {
        serde_json::to_string_pretty(&metadata)?
    } else {
        serde_json::to_string(&metadata)?
    };
    writeln!(out, "{json}")?;
    Ok(())
}

fn print_converters(catalog: &Catalog, out: &mut impl Write) -> Result<()> {
    for entry in catalog.converters() {
        writeln!(out, "{}\t{}\t{}", entry.name, entry.role(), entry.description)?;
    }
    Ok(())
}

fn activate_file(
    catalog: &Catalog,
    context: &Context,
    file: &Path,
    input: &[f64],
    out: &mut impl Write,
) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let activations = parse_activations(&text)
        .with_context(|| format!("Invalid activation records in {}", file.display()))?;

    let activator = Activator::new(catalog, context);
    let mut filters: Vec<Box<dyn Filter>> = Vec::with_capacity(activations.len());
    for activation in &activations {
        let filter = activator
            .activate::<dyn Filter>(activation)
            .with_context(|| format!("Failed to activate '{}'", activation.key()))?;
        filters.push(filter);
    }
    filters.extend(activator.activate_permanent::<dyn Filter>(&activations)?);
    info!(count = filters.len(), "Activated filters");

    let mut samples = input.to_vec();
    for filter in &filters {
        writeln!(out, "{}", filter.label())?;
        if !samples.is_empty() {
            samples = filter.apply(&samples);
        }
    }
    if !samples.is_empty() {
        let rendered: Vec<String> = samples.iter().map(|x| format!("{x:.4}")).collect();
        writeln!(out, "{}", rendered.join(","))?;
    }
    Ok(())
}

/// Parse one activation record or a JSON array of them
pub fn parse_activations(text: &str) -> Result<Vec<Activation>> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        Ok(serde_json::from_str(trimmed)?)
    } else {
        Ok(vec![Activation::from_json(trimmed)?])
    }
}
