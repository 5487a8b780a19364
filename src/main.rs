use clap::Parser;
use duck_hunt_log::cli::{Cli, Commands};
use duck_hunt_log::commands::{run_formats, run_scan, run_stats};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan(args) => run_scan(args),
        Commands::Stats(args) => run_stats(args),
        Commands::Formats => run_formats(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
