//! Tessera command-line interface.
//!
//! Evaluate scattered and incident fields from TOML job files:
//! ```sh
//! tessera-cli run job.toml
//! tessera-cli validate job.toml
//! tessera-cli functions
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tessera_core::{StandardFieldFunctions, DEFAULT_FUNCTIONS};

#[derive(Parser)]
#[command(name = "tessera-cli")]
#[command(about = "Tessera: periodic BEM field evaluation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate fields for a TOML job file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output CSV file (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a job file and build its geometry without evaluating fields.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// List the built-in field functions.
    Functions,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("Tessera field evaluation");
            println!("========================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let result = runner::run_job(&job)?;

            let csv_path = output.unwrap_or_else(|| PathBuf::from(&job.output.file));
            runner::write_fields_csv(&result, &csv_path)?;

            if job.output.save_json {
                runner::write_fields_json(&result, &csv_path.with_extension("json"))?;
            }

            println!("Evaluation complete.");
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            let setup = runner::build_setup(&job)?;
            println!("Configuration is valid: {}", config.display());
            println!(
                "  {} surface(s), {} basis function(s), lattice dimension {}",
                setup.geometry.surfaces().len(),
                setup.geometry.total_dof(),
                setup.geometry.lattice().dimension()
            );
            Ok(())
        }
        Commands::Functions => {
            println!("Built-in field functions:");
            println!();
            for name in StandardFieldFunctions::NAMES {
                println!("  {name}");
            }
            println!();
            println!("Default list: {DEFAULT_FUNCTIONS}");
            Ok(())
        }
    }
}
