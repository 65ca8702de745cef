//! Error types for the greeting SDK

use greeting_registry::GreetingError;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Main error type for the greeting SDK
#[derive(Error, Debug)]
pub enum GreetingSdkError {
    #[error("Invalid address '{0}'")]
    InvalidAddress(String),

    #[error("Registry account not found: {0}")]
    AccountNotFound(Pubkey),

    #[error("Account {0} is not a greeting registry: {1}")]
    InvalidAccountData(Pubkey, String),

    #[error("Event decoding error: {0}")]
    EventDecode(String),

    #[error("Keypair error: {0}")]
    Keypair(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transaction {0} not found or has no logs")]
    TransactionNotFound(String),

    #[error("Program rejected the call: {0}")]
    Program(GreetingError),

    #[error("RPC error: {0}")]
    Rpc(Box<solana_client::client_error::ClientError>),
}

impl From<solana_client::client_error::ClientError> for GreetingSdkError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        // Surface registry failures with their reason instead of a raw custom code
        if let Some(code) = custom_error_code(&err) {
            if let Some(program_err) = program_error(code) {
                return Self::Program(program_err);
            }
        }
        Self::Rpc(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, GreetingSdkError>;

/// Map a custom program error code back to the registry error it came from
pub fn program_error(code: u32) -> Option<GreetingError> {
    [GreetingError::Unauthorized, GreetingError::InvalidAddress]
        .into_iter()
        .find(|err| u32::from(*err) == code)
}

fn custom_error_code(err: &solana_client::client_error::ClientError) -> Option<u32> {
    use solana_sdk::{instruction::InstructionError, transaction::TransactionError};

    match err.get_transaction_error()? {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => Some(code),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_error_codes() {
        assert!(matches!(program_error(6000), Some(GreetingError::Unauthorized)));
        assert!(matches!(program_error(6001), Some(GreetingError::InvalidAddress)));
        assert!(program_error(6002).is_none());
        assert!(program_error(0).is_none());
    }

    #[test]
    fn test_program_error_reason() {
        let err = GreetingSdkError::Program(GreetingError::Unauthorized);
        assert_eq!(
            err.to_string(),
            "Program rejected the call: Only the owner can perform this action"
        );

        let err = GreetingSdkError::Program(GreetingError::InvalidAddress);
        assert_eq!(
            err.to_string(),
            "Program rejected the call: New owner must be a valid address"
        );
    }
}
