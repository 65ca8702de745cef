//! Off-chain views of registry state

use greeting_registry::GreetingRegistry;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

/// Registry state as read from the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Registry account address
    pub address: Pubkey,
    pub owner: Pubkey,
    pub greeting: String,
    pub last_updated: i64,
}

impl RegistrySnapshot {
    pub fn from_state(address: Pubkey, state: &GreetingRegistry) -> Self {
        Self {
            address,
            owner: state.current_owner(),
            greeting: state.greeting().to_string(),
            last_updated: state.last_updated(),
        }
    }
}
