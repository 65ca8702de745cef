//! Greeting SDK - client side of the greeting registry program
//!
//! This SDK provides:
//! - Instruction builders for every registry instruction
//! - A blocking RPC client for deploying, updating and reading registries
//! - Decoding of `NewGreeting` / `OwnershipTransferred` notifications
//! - A websocket watcher streaming notifications as they land

pub mod addresses;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod instructions;
pub mod types;
pub mod watcher;

// Re-export key types
pub use client::{GreetingClient, DEFAULT_GREETING};
pub use config::ClientConfig;
pub use error::{GreetingSdkError, Result};
pub use events::RegistryEvent;
pub use types::RegistrySnapshot;
pub use watcher::{EventWatcher, ObservedEvent};

// Program types used in SDK signatures
pub use greeting_registry::{GreetingError, NewGreeting, OwnershipTransferred};
