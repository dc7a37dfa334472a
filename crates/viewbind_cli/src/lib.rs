// viewbind_cli - command-line driver (library interface for testing)
use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use viewbind_elements::{RoundEnvironment, RoundInput};
use viewbind_processor::{
    Diagnostics, DirectorySink, LinkedTargets, Processor, ProcessorOptions, RoundOutcome,
};

pub mod config;

pub use config::{CliConfig, CliOverrides};

pub const DEFAULT_OUTPUT_DIR: &str = "generated";

#[derive(Parser)]
#[command(name = "viewbind")]
#[command(about = "Generates _ViewBinding companions for annotated Android classes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Process a round and write the generated Java sources
    Generate {
        /// Round description (JSON)
        round: PathBuf,
        /// Output directory for .java files
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Lowest API level the generated code targets
        #[arg(long)]
        min_sdk: Option<u32>,
        /// Emit plain lookups and casts without runtime checks
        #[arg(long)]
        release: bool,
        /// Settings file (viewbind.toml)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Log processing details
        #[arg(short, long)]
        verbose: bool,
    },
    /// Validate a round without writing anything
    Check {
        /// Round description (JSON)
        round: PathBuf,
        /// Settings file (viewbind.toml)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Log processing details
        #[arg(short, long)]
        verbose: bool,
    },
    /// Show version information
    Version,
}

pub fn get_version() -> String {
    format!("viewbind {}", env!("CARGO_PKG_VERSION"))
}

/// Installs the stderr subscriber. `RUST_LOG` applies unless `verbose` is set.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

pub fn load_round(path: &Path) -> Result<RoundEnvironment> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read round file {}", path.display()))?;
    let input = RoundInput::from_json(&text)
        .with_context(|| format!("invalid round file {}", path.display()))?;
    let env = RoundEnvironment::new(input)
        .with_context(|| format!("invalid round file {}", path.display()))?;
    debug!(path = %path.display(), "round loaded");
    Ok(env)
}

pub fn load_config(path: Option<&Path>) -> Result<CliConfig> {
    match path {
        Some(path) => CliConfig::load(path),
        None => Ok(CliConfig::default()),
    }
}

/// Round options, then the settings file, then command-line flags.
pub fn effective_options(
    env: &RoundEnvironment,
    config: &CliConfig,
    overrides: &CliOverrides,
    diagnostics: &mut Diagnostics,
) -> ProcessorOptions {
    let mut options = ProcessorOptions::from_options(&env.options, diagnostics);
    config.apply(&mut options);
    overrides.apply(&mut options);
    options
}

pub fn run_generate(
    round: &Path,
    config: &CliConfig,
    overrides: &CliOverrides,
) -> Result<(RoundOutcome, PathBuf)> {
    let env = load_round(round)?;
    let mut option_diagnostics = Diagnostics::new();
    let options = effective_options(&env, config, overrides, &mut option_diagnostics);
    let output_dir = overrides.output_dir(config);
    info!(output = %output_dir.display(), "generating binding classes");

    let mut sink = DirectorySink::new(&output_dir);
    let mut outcome = Processor::new(options).process(&env, &mut sink);
    option_diagnostics.extend(outcome.diagnostics);
    outcome.diagnostics = option_diagnostics;
    Ok((outcome, output_dir))
}

pub fn run_check(round: &Path, config: &CliConfig) -> Result<(LinkedTargets, Diagnostics)> {
    let env = load_round(round)?;
    let mut diagnostics = Diagnostics::new();
    let options = effective_options(&env, config, &CliOverrides::default(), &mut diagnostics);
    let (targets, collected) = Processor::new(options).collect(&env);
    diagnostics.extend(collected);
    Ok((targets, diagnostics))
}
