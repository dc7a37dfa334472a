// viewbind CLI entry point
use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::process;

use viewbind_cli::{
    get_version, init_logging, load_config, run_check, run_generate, Cli, CliOverrides, Commands,
};
use viewbind_processor::Diagnostics;

fn report(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics.iter() {
        eprintln!("{diagnostic}");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate {
            round,
            output,
            min_sdk,
            release,
            config,
            verbose,
        }) => {
            init_logging(verbose);
            let config = load_config(config.as_deref())?;
            let overrides = CliOverrides {
                min_sdk,
                release,
                output,
            };
            let (outcome, output_dir) = run_generate(&round, &config, &overrides)?;
            report(&outcome.diagnostics);
            for name in &outcome.written {
                println!("Generated {name}");
            }
            if outcome.has_errors() {
                process::exit(1);
            }
            println!(
                "Wrote {} binding class(es) to {}",
                outcome.written.len(),
                output_dir.display()
            );
        }
        Some(Commands::Check {
            round,
            config,
            verbose,
        }) => {
            init_logging(verbose);
            let config = load_config(config.as_deref())?;
            let (targets, diagnostics) = run_check(&round, &config)?;
            report(&diagnostics);
            if diagnostics.has_errors() {
                process::exit(1);
            }
            println!("{} target(s) bound, no errors", targets.len());
        }
        Some(Commands::Version) => {
            println!("{}", get_version());
        }
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
