//! helmshim CLI - render and debug templates that depend on runtime shims

use clap::{Parser, Subcommand};
use console::style;
use helmshim_engine::EngineConfig;
use std::path::{Path, PathBuf};

mod commands;
mod error;
mod exit_codes;

use error::Result;

#[derive(Parser)]
#[command(name = "helmshim")]
#[command(author = "helmshim Contributors")]
#[command(version)]
#[command(about = "Render and debug templates that depend on the helmshim runtime shims", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Engine configuration file (default: ./helmshim.yaml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template file, or every template in a directory
    Render {
        /// Template file or directory
        template: PathBuf,

        /// Values file(s) to merge, in order
        #[arg(short = 'f', long = "values")]
        values: Vec<PathBuf>,

        /// Set values on command line (key=value)
        #[arg(long = "set")]
        set: Vec<String>,

        /// Render undefined variables as empty instead of failing
        #[arg(long)]
        lenient: bool,

        /// Write the output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Call a shim with JSON arguments and print the JSON result
    Call {
        /// Shim name, as used in templates
        shim: String,

        /// Arguments; anything that is not valid JSON is passed as a string
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Convert Kubernetes quantities to integers
    Quantity {
        /// Quantities to convert (e.g. 500Mi, 2Gi, 1.5)
        #[arg(required = true)]
        quantities: Vec<String>,

        /// Only check that the quantities are well formed
        #[arg(long)]
        validate: bool,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List registered shims
    Shims,
}

fn main() -> miette::Result<()> {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Render {
            template,
            values,
            set,
            lenient,
            output,
        } => {
            let config = load_config(cli.config.as_deref(), cli.debug)?;
            commands::render::run(
                &template,
                &values,
                &set,
                lenient,
                output.as_deref(),
                config,
                cli.debug,
            )
        }

        Commands::Call { shim, args } => commands::call::run(&shim, &args, cli.debug),

        Commands::Quantity {
            quantities,
            validate,
            json,
        } => commands::quantity::run(&quantities, validate, json),

        Commands::Shims => commands::shims::run(),
    }
}

/// Load `--config`, or `helmshim.yaml` from the working directory
fn load_config(path: Option<&Path>, debug: bool) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::load_from(path)?,
        None => EngineConfig::discover(&std::env::current_dir()?)?,
    };

    if debug {
        eprintln!(
            "{} Engine config: namespace={} strict={}",
            style("DEBUG").dim(),
            config.namespace,
            config.strict
        );
    }

    Ok(config)
}
