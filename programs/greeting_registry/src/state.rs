use anchor_lang::prelude::*;
use crate::{error::GreetingError, events::*};

/// Greeting registry state
///
/// One account per registry. Only the owner may change the greeting or hand
/// the registry to someone else; reads are open to anyone.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct GreetingRegistry {
    /// Only address allowed to mutate the registry
    pub owner: Pubkey,
    /// Unix timestamp of the last greeting change (or creation)
    pub last_updated: i64,
    /// Current greeting
    pub greeting: String,
}

impl GreetingRegistry {
    /// Fixed part of the account: discriminator + owner + last_updated + string length prefix
    pub const BASE_SIZE: usize = 8 + // discriminator
        32 + // owner
        8 + // last_updated
        4; // greeting length prefix

    /// Account size needed to hold `greeting`
    pub fn space(greeting: &str) -> usize {
        Self::BASE_SIZE + greeting.len()
    }

    /// Build the initial state for a freshly deployed registry
    pub fn new(greeting: String, deployer: Pubkey, clock: &Clock) -> Result<Self> {
        require_keys_neq!(deployer, Pubkey::default(), GreetingError::InvalidAddress);

        Ok(Self {
            owner: deployer,
            last_updated: clock.unix_timestamp,
            greeting,
        })
    }

    // ===== Access Guard =====

    /// Fails with `Unauthorized` unless `caller` is the current owner
    pub fn require_owner(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.owner, GreetingError::Unauthorized);
        Ok(())
    }

    // ===== Mutators =====

    /// Replace the greeting and stamp the change
    ///
    /// Returns the notification to emit. Nothing is written unless the caller
    /// owns the registry. `last_updated` never moves backwards even if the
    /// clock does.
    pub fn set_greeting(
        &mut self,
        caller: Pubkey,
        message: String,
        clock: &Clock,
    ) -> Result<NewGreeting> {
        self.require_owner(&caller)?;

        let timestamp = self.last_updated.max(clock.unix_timestamp);

        self.greeting = message.clone();
        self.last_updated = timestamp;

        Ok(NewGreeting {
            sender: caller,
            message,
            timestamp,
        })
    }

    /// Hand the registry to `new_owner`
    ///
    /// The previous owner loses access as soon as this returns. Does not
    /// touch `last_updated`.
    pub fn transfer_ownership(
        &mut self,
        caller: Pubkey,
        new_owner: Pubkey,
    ) -> Result<OwnershipTransferred> {
        self.require_owner(&caller)?;
        require_keys_neq!(new_owner, Pubkey::default(), GreetingError::InvalidAddress);

        let previous_owner = self.owner;
        self.owner = new_owner;

        Ok(OwnershipTransferred {
            previous_owner,
            new_owner,
        })
    }

    // ===== Accessors =====

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Registry owner. `Self::owner()` is `anchor_lang::Owner` (the program id)
    pub fn current_owner(&self) -> Pubkey {
        self.owner
    }

    pub fn last_updated(&self) -> i64 {
        self.last_updated
    }
}
