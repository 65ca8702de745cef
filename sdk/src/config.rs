//! Client configuration

use crate::error::{GreetingSdkError, Result};
use serde::Deserialize;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::{fs, path::Path, str::FromStr};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Solana RPC URL
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Solana WebSocket URL, derived from `rpc_url` when absent
    #[serde(default)]
    pub ws_url: Option<String>,

    /// Path to the payer / caller keypair
    #[serde(default = "default_keypair_path")]
    pub keypair_path: String,

    /// Greeting registry program ID
    #[serde(default = "default_program_id")]
    pub program_id: String,

    /// Commitment level: processed, confirmed or finalized
    #[serde(default = "default_commitment")]
    pub commitment: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            ws_url: None,
            keypair_path: default_keypair_path(),
            program_id: default_program_id(),
            commitment: default_commitment(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file or the environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        // Load from .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }

        let config = match config_path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    GreetingSdkError::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                Self::from_toml_str(&content)?
            }
            None => Self::from_env(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| GreetingSdkError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            rpc_url: std::env::var("GREETING_RPC_URL").unwrap_or(defaults.rpc_url),
            ws_url: std::env::var("GREETING_WS_URL").ok(),
            keypair_path: std::env::var("GREETING_KEYPAIR").unwrap_or(defaults.keypair_path),
            program_id: std::env::var("GREETING_PROGRAM_ID").unwrap_or(defaults.program_id),
            commitment: std::env::var("GREETING_COMMITMENT").unwrap_or(defaults.commitment),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.rpc_url.trim().is_empty() {
            return Err(GreetingSdkError::Config("rpc_url must not be empty".to_string()));
        }
        if self.keypair_path.trim().is_empty() {
            return Err(GreetingSdkError::Config("keypair_path must not be empty".to_string()));
        }
        self.program_id()?;
        self.commitment_config()?;
        Ok(())
    }

    pub fn program_id(&self) -> Result<Pubkey> {
        Pubkey::from_str(self.program_id.trim()).map_err(|_| {
            GreetingSdkError::Config(format!("Invalid program_id: {}", self.program_id))
        })
    }

    pub fn commitment_config(&self) -> Result<CommitmentConfig> {
        match self.commitment.to_ascii_lowercase().as_str() {
            "processed" => Ok(CommitmentConfig::processed()),
            "confirmed" => Ok(CommitmentConfig::confirmed()),
            "finalized" => Ok(CommitmentConfig::finalized()),
            other => Err(GreetingSdkError::Config(format!("Unknown commitment: {}", other))),
        }
    }

    /// WebSocket endpoint for log subscriptions
    pub fn ws_url(&self) -> String {
        match &self.ws_url {
            Some(url) => url.clone(),
            None => self
                .rpc_url
                .replacen("http", "ws", 1)
                .replace(":8899", ":8900"),
        }
    }

    /// Keypair path with `~` expanded
    pub fn expanded_keypair_path(&self) -> String {
        shellexpand::tilde(&self.keypair_path).to_string()
    }
}

fn default_rpc_url() -> String {
    "http://localhost:8899".to_string()
}

fn default_keypair_path() -> String {
    "~/.config/solana/id.json".to_string()
}

fn default_program_id() -> String {
    greeting_registry::ID.to_string()
}

fn default_commitment() -> String {
    "confirmed".to_string()
}
