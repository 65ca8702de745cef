//! Address parsing and comparison
//!
//! Addresses are compared as 32-byte keys, never as strings. Text input is
//! base58 and is parsed before it is compared with anything.

use crate::error::{GreetingSdkError, Result};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// The address registries refuse as an owner
pub const ZERO_ADDRESS: Pubkey = Pubkey::new_from_array([0u8; 32]);

/// Parse a base58 address, ignoring surrounding whitespace
pub fn parse_address(input: &str) -> Result<Pubkey> {
    let trimmed = input.trim();
    Pubkey::from_str(trimmed).map_err(|_| GreetingSdkError::InvalidAddress(trimmed.to_string()))
}

pub fn is_zero_address(address: &Pubkey) -> bool {
    *address == ZERO_ADDRESS
}

/// Compare two textual addresses by the keys they decode to
pub fn same_address(a: &str, b: &str) -> Result<bool> {
    Ok(parse_address(a)? == parse_address(b)?)
}
