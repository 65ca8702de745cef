use anchor_lang::prelude::*;

// ================================
// Registry Notifications
// ================================

/// Emitted after the owner replaces the greeting
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewGreeting {
    pub sender: Pubkey,   // Owner that made the change
    pub message: String,  // The greeting now stored
    pub timestamp: i64,   // New value of `last_updated`
}

/// Emitted after ownership moves to a new address
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnershipTransferred {
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}
