//! Registry errors

use anchor_lang::prelude::*;

#[error_code]
pub enum GreetingError {
    #[msg("Only the owner can perform this action")]
    Unauthorized,

    #[msg("New owner must be a valid address")]
    InvalidAddress,
}
