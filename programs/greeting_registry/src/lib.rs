//! Greeting Registry - a single greeting guarded by its owner
//!
//! - The deployer becomes the owner of a new registry account
//! - Only the owner can change the greeting or transfer ownership
//! - Every successful change emits a notification; failures change nothing

use anchor_lang::prelude::*;

declare_id!("5KVzw9wQJtX28Ajw6nrw4AaKjRHheuUuiSBLvVuvDG5m");

pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

pub use error::*;
pub use events::*;
pub use instructions::*;
pub use state::*;

#[program]
pub mod greeting_registry {
    use super::*;

    /// Create a new registry owned by the deployer
    pub fn initialize(ctx: Context<Initialize>, greeting: String) -> Result<()> {
        instructions::initialize(ctx, greeting)
    }

    /// Replace the greeting and emit `NewGreeting`
    pub fn set_greeting(ctx: Context<SetGreeting>, new_greeting: String) -> Result<()> {
        instructions::set_greeting(ctx, new_greeting)
    }

    /// Move ownership and emit `OwnershipTransferred`
    pub fn transfer_ownership(ctx: Context<TransferOwnership>, new_owner: Pubkey) -> Result<()> {
        instructions::transfer_ownership(ctx, new_owner)
    }

    /// Current greeting, returned as return data
    pub fn get_greeting(ctx: Context<ReadRegistry>) -> Result<String> {
        instructions::get_greeting(ctx)
    }

    /// Current owner, returned as return data
    pub fn get_owner(ctx: Context<ReadRegistry>) -> Result<Pubkey> {
        instructions::get_owner(ctx)
    }

    /// Timestamp of the last greeting change, returned as return data
    pub fn get_last_updated(ctx: Context<ReadRegistry>) -> Result<i64> {
        instructions::get_last_updated(ctx)
    }
}
