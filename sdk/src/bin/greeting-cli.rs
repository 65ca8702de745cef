//! Greeting registry CLI
//!
//! Deploy registries, change them, and watch their notifications.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use futures::StreamExt;
use greeting_sdk::{
    addresses::parse_address, ClientConfig, EventWatcher, GreetingClient, DEFAULT_GREETING,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "greeting-cli")]
#[command(about = "Command-line client for the greeting registry program")]
#[command(version)]
struct Cli {
    /// TOML config file (otherwise GREETING_* environment variables are used)
    #[arg(long)]
    config: Option<PathBuf>,

    /// RPC endpoint URL
    #[arg(long, env = "GREETING_RPC_URL")]
    rpc_url: Option<String>,

    /// Path to keypair file
    #[arg(long, env = "GREETING_KEYPAIR")]
    keypair: Option<String>,

    /// Greeting registry program ID
    #[arg(long, env = "GREETING_PROGRAM_ID")]
    program_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new registry owned by the keypair
    Deploy {
        #[arg(long, default_value = DEFAULT_GREETING)]
        greeting: String,
    },
    /// Replace the greeting (owner only)
    SetGreeting {
        registry: String,
        message: String,
    },
    /// Hand the registry to another address (owner only)
    TransferOwnership {
        registry: String,
        new_owner: String,
    },
    /// Print the registry state
    Show {
        registry: String,
    },
    /// Stream notifications from one registry
    Watch {
        registry: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config =
        ClientConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(rpc_url) = cli.rpc_url {
        config.rpc_url = rpc_url;
    }
    if let Some(keypair) = cli.keypair {
        config.keypair_path = keypair;
    }
    if let Some(program_id) = cli.program_id {
        config.program_id = program_id;
    }
    config.validate().context("Invalid configuration")?;

    match cli.command {
        Commands::Deploy { greeting } => {
            let client = GreetingClient::new(&config)?;
            println!("Deploying with account: {}", client.payer());

            let (registry, signature) = client.deploy(&greeting)?;
            println!("Greeting registry deployed to: {}", registry);
            println!("Signature: {}", signature);
        }
        Commands::SetGreeting { registry, message } => {
            let client = GreetingClient::new(&config)?;
            let registry = parse_address(&registry)?;

            let signature = client.set_greeting(registry, &message)?;
            print_events(&client, &signature)?;
        }
        Commands::TransferOwnership { registry, new_owner } => {
            let client = GreetingClient::new(&config)?;
            let registry = parse_address(&registry)?;
            let new_owner = parse_address(&new_owner)?;

            let signature = client.transfer_ownership(registry, new_owner)?;
            print_events(&client, &signature)?;
        }
        Commands::Show { registry } => {
            let client = GreetingClient::new(&config)?;
            let snapshot = client.fetch(parse_address(&registry)?)?;

            println!("Registry:     {}", snapshot.address);
            println!("Owner:        {}", snapshot.owner);
            println!("Greeting:     {}", snapshot.greeting);
            println!("Last updated: {}", snapshot.last_updated);
        }
        Commands::Watch { registry } => {
            let watcher = EventWatcher::new(
                config.ws_url(),
                config.program_id()?,
                parse_address(&registry)?,
                config.commitment_config()?,
            );
            let mut events = watcher.start().await?;

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        info!("Received shutdown signal");
                        watcher.stop();
                        break;
                    }
                    next = events.next() => match next {
                        Some(observed) => println!(
                            "{} {} {}",
                            observed.registry, observed.signature, observed.event
                        ),
                        None => anyhow::bail!("Event stream for {} closed", watcher.registry()),
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_events(
    client: &GreetingClient,
    signature: &solana_sdk::signature::Signature,
) -> Result<()> {
    println!("Signature: {}", signature);
    for event in client.events_for(signature)? {
        println!("{}", event);
    }
    Ok(())
}
