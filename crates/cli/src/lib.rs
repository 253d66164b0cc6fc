pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "agronova",
    about = "AgroNova operator CLI",
    long_about = "Inspect AgroNova configuration and readiness, apply migrations, and run the crop engine from the terminal.",
    after_help = "Examples:\n  agronova doctor --json\n  agronova weather Pune\n  agronova recommend --location Nagpur --soil black --water medium\n  agronova guidance cotton --area 2.5 --language marathi"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Validate config, catalog, integrations, and DB readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "List the crops in the active catalog")]
    Catalog,
    #[command(about = "Resolve a climate profile for a location")]
    Weather {
        #[arg(help = "Village or city name")]
        location: String,
    },
    #[command(about = "Rank the best crops for a field")]
    Recommend {
        #[arg(long)]
        location: String,
        #[arg(long, help = "clay|loam|sandy|black|red|alluvial")]
        soil: String,
        #[arg(long, help = "low|medium|high")]
        water: String,
        #[arg(long, default_value = "english")]
        language: String,
    },
    #[command(about = "Print area-scaled cultivation guidance for one crop")]
    Guidance {
        crop_key: String,
        #[arg(long, default_value_t = 1.0)]
        area: f64,
        #[arg(long, default_value = "english")]
        language: String,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Doctor { json } => commands::doctor::run(json),
        Command::Config => commands::config::run(),
        Command::Catalog => commands::catalog::run(),
        Command::Weather { location } => commands::weather::run(&location),
        Command::Recommend { location, soil, water, language } => {
            commands::recommend::run(&location, &soil, &water, &language)
        }
        Command::Guidance { crop_key, area, language } => {
            commands::guidance::run(&crop_key, area, &language)
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
