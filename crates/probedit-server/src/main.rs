//! Probedit Server CLI
//!
//! Starts the HTTP server for the problem editor.

use probedit_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default configuration");
        eprintln!("Usage: probedit-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default_config()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Probedit Server - LaTeX problem editor backend");
    println!();
    println!("USAGE:");
    println!("    probedit-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - database_path: SQLite database file (required)");
    println!("    - bind_address: IP address to bind (default: '127.0.0.1')");
    println!("    - bind_port: Port number (default: 3000)");
    println!("    - seed_problem: Source text to insert when the database is empty");
    println!();
    println!("ENVIRONMENT:");
    println!("    PROBEDIT_DATABASE  Overrides database_path");
    println!("    RUST_LOG           Log filter (default: info)");
    println!();
}
