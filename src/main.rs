//! mayacmd - a command-port client for Autodesk Maya.
//!
//! Sends single MEL command lines to a running Maya session's command port
//! over TCP, one connection per command. The main use case is reloading a
//! freshly built plugin without touching the Maya UI.

mod config;
mod mel;
mod port;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::Config;
use mel::MelCommand;
use port::CommandPort;
use std::process::Command as ProcessCommand;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mayacmd")]
#[command(author, version, about = "A command-port client for Autodesk Maya")]
#[command(
    long_about = "Sends MEL commands to a running Maya session over its command port.\n\nOpen a port in Maya first: commandPort -name \":1234\""
)]
struct Cli {
    /// Host Maya is listening on (overrides config)
    #[arg(long, global = true, value_name = "HOST")]
    host: Option<String>,

    /// Command port number (overrides config)
    #[arg(long, global = true, value_name = "PORT")]
    port: Option<u16>,

    /// Network timeout in seconds (overrides config)
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a compiled plugin (.mll) into the running Maya session
    Load {
        /// Path to the plugin binary (falls back to the configured default)
        #[arg(value_name = "PLUGIN")]
        plugin: Option<String>,

        /// Wait for and print Maya's result line
        #[arg(long)]
        reply: bool,
    },
    /// Send a raw MEL command line
    Send {
        /// The MEL command, e.g. 'polyCube;'
        #[arg(value_name = "COMMAND")]
        command: String,

        /// Wait for and print Maya's result line
        #[arg(long)]
        reply: bool,
    },
    /// Check whether Maya's command port is accepting connections
    Ping,
    /// Open configuration file in $EDITOR
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let mut config = Config::load()?;
    if let Some(host) = cli.host {
        config.port.host = host;
    }
    if let Some(port) = cli.port {
        config.port.port = port;
    }
    if let Some(timeout) = cli.timeout {
        config.port.timeout_secs = timeout;
    }

    match cli.command {
        Commands::Load { plugin, reply } => handle_load(&config, plugin, reply).await,
        Commands::Send { command, reply } => handle_send(&config, command, reply).await,
        Commands::Ping => handle_ping(&config).await,
        Commands::Config => handle_config(),
    }
}

/// Initialize tracing with an env-filter; `-v` bumps mayacmd to debug.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "mayacmd=debug" } else { "mayacmd=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Handle the load subcommand.
async fn handle_load(config: &Config, plugin: Option<String>, reply: bool) -> Result<()> {
    let plugin = plugin
        .or_else(|| config.defaults.plugin.clone())
        .context("No plugin path given and no default configured. Set one with: mayacmd config")?;

    let command = MelCommand::load_plugin(&plugin)?;
    dispatch(config, &command, reply).await
}

/// Handle the send subcommand.
async fn handle_send(config: &Config, command: String, reply: bool) -> Result<()> {
    let command = MelCommand::raw(&command)?;
    dispatch(config, &command, reply).await
}

/// Send a built command over one connection, printing the reply if asked for.
async fn dispatch(config: &Config, command: &MelCommand, reply: bool) -> Result<()> {
    let port = CommandPort::new(config.address(), config.timeout());
    let read_reply = reply || config.defaults.reply;

    info!("Sending '{}' to {}", command, port.address());
    if let Some(result) = port.send(command, read_reply).await? {
        println!("{}", result);
    }
    Ok(())
}

/// Handle the ping subcommand.
async fn handle_ping(config: &Config) -> Result<()> {
    let port = CommandPort::new(config.address(), config.timeout());
    port.ping().await?;
    println!("Maya is listening on {}", port.address());
    Ok(())
}

/// Handle the config command.
fn handle_config() -> Result<()> {
    let config_path = Config::config_path()?;

    // Ensure config directory exists
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Create default config if it doesn't exist
    if !config_path.exists() {
        let default_config = Config::default();
        default_config.save()?;
        println!("Created default config at {}", config_path.display());
    }

    // Open in editor
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = ProcessCommand::new(&editor)
        .arg(&config_path)
        .status()
        .context("Failed to open editor")?;

    if !status.success() {
        eprintln!("Editor exited with non-zero status");
    }

    Ok(())
}
