pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "shopfront",
    about = "Shopfront operator CLI",
    long_about = "Inspect configuration, run readiness checks, and browse the product catalog of a running shopfront-server.",
    after_help = "Examples:\n  shopfront doctor --json\n  shopfront config\n  shopfront products\n  shopfront products --id 3"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config {
        #[arg(long, help = "Emit the effective configuration as JSON")]
        json: bool,
    },
    #[command(about = "Validate config, seed catalog, and static bundle readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Load the product catalog from the configured API and print it")]
    Products {
        #[arg(long, help = "Show a single product by identifier")]
        id: Option<i32>,
        #[arg(long, help = "Override client.api_base_url for this invocation")]
        api_base_url: Option<String>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Command::Config { json } => commands::config::run(json),
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
        Command::Products { id, api_base_url } => commands::products::run(id, api_base_url),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

// Diagnostics go to stderr so command output stays parseable.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();
}
