use std::path::PathBuf;

use clap::{Parser, Subcommand};
use valdoc_cli::commands::{generate, routes};
use valdoc_cli::logging;
use valdoc_core::DocConfig;

#[derive(Parser)]
#[command(name = "valdoc", version, about = "valdoc: Swagger documents from validation schemas")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the Swagger document
    Generate {
        /// Route table (YAML or JSON)
        #[arg(long)]
        routes: PathBuf,
        /// package.json providing title, version and contact
        #[arg(long)]
        package: Option<PathBuf>,
        /// Base configuration file (defaults to ./valdoc.yaml)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Configuration profile
        #[arg(long, default_value = DocConfig::DEFAULT_PROFILE)]
        profile: String,
        /// Output file (defaults to the configured output)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List the routes that would be documented
    Routes {
        /// Route table (YAML or JSON)
        #[arg(long)]
        routes: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            routes,
            package,
            config,
            profile,
            out,
        } => generate::run(&generate::GenerateOptions {
            routes,
            package,
            config,
            profile,
            out,
        })
        .map(|_| ()),
        Commands::Routes { routes: path } => routes::run(&path),
    };

    if let Err(e) = result {
        eprintln!("{}", colored::Colorize::red(format!("Error: {e:#}").as_str()));
        std::process::exit(1);
    }
}
