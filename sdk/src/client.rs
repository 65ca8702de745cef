//! RPC client for the greeting registry program

use crate::{
    config::ClientConfig,
    error::{GreetingSdkError, Result},
    events::{parse_logs, RegistryEvent},
    instructions,
    types::RegistrySnapshot,
};
use anchor_lang::AccountDeserialize;
use greeting_registry::GreetingRegistry;
use solana_client::{rpc_client::RpcClient, rpc_config::RpcTransactionConfig};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use solana_transaction_status::UiTransactionEncoding;
use tracing::{debug, info};

/// Default greeting for new deployments
pub const DEFAULT_GREETING: &str = "Hello from the contract!";

/// Submits registry calls signed by a single payer keypair
pub struct GreetingClient {
    rpc: RpcClient,
    payer: Keypair,
    program_id: Pubkey,
}

impl GreetingClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let keypair_path = config.expanded_keypair_path();
        let payer = read_keypair_file(&keypair_path).map_err(|e| {
            GreetingSdkError::Keypair(format!(
                "Failed to read keypair from {}: {}",
                keypair_path, e
            ))
        })?;

        Ok(Self::with_keypair(
            &config.rpc_url,
            config.commitment_config()?,
            payer,
            config.program_id()?,
        ))
    }

    pub fn with_keypair(
        rpc_url: &str,
        commitment: CommitmentConfig,
        payer: Keypair,
        program_id: Pubkey,
    ) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(rpc_url.to_string(), commitment),
            payer,
            program_id,
        }
    }

    /// Address that signs every call
    pub fn payer(&self) -> Pubkey {
        self.payer.pubkey()
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    /// Create a new registry owned by the payer
    pub fn deploy(&self, greeting: &str) -> Result<(Pubkey, Signature)> {
        let registry = Keypair::new();
        info!("Deploying greeting registry {} with account {}", registry.pubkey(), self.payer());

        let ix = instructions::initialize(
            self.program_id,
            registry.pubkey(),
            self.payer(),
            greeting.to_string(),
        );
        let signature = self.send(&[ix], &[&registry])?;

        info!("Greeting registry deployed to {}", registry.pubkey());
        Ok((registry.pubkey(), signature))
    }

    pub fn set_greeting(&self, registry: Pubkey, greeting: &str) -> Result<Signature> {
        let ix = instructions::set_greeting(
            self.program_id,
            registry,
            self.payer(),
            greeting.to_string(),
        );
        self.send(&[ix], &[])
    }

    pub fn transfer_ownership(&self, registry: Pubkey, new_owner: Pubkey) -> Result<Signature> {
        let ix =
            instructions::transfer_ownership(self.program_id, registry, self.payer(), new_owner);
        self.send(&[ix], &[])
    }

    /// Read and decode the registry account
    pub fn fetch(&self, registry: Pubkey) -> Result<RegistrySnapshot> {
        let account = self
            .rpc
            .get_account_with_commitment(&registry, self.rpc.commitment())?
            .value
            .ok_or(GreetingSdkError::AccountNotFound(registry))?;

        if account.owner != self.program_id {
            return Err(GreetingSdkError::InvalidAccountData(
                registry,
                format!("owned by {}", account.owner),
            ));
        }

        let state = GreetingRegistry::try_deserialize(&mut account.data.as_slice())
            .map_err(|e| GreetingSdkError::InvalidAccountData(registry, e.to_string()))?;

        Ok(RegistrySnapshot::from_state(registry, &state))
    }

    /// Notifications emitted by a confirmed transaction
    pub fn events_for(&self, signature: &Signature) -> Result<Vec<RegistryEvent>> {
        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::Json),
            commitment: Some(self.rpc.commitment()),
            max_supported_transaction_version: Some(0),
        };
        let tx = self.rpc.get_transaction_with_config(signature, config)?;

        let logs: Vec<String> = tx
            .transaction
            .meta
            .and_then(|meta| Option::<Vec<String>>::from(meta.log_messages))
            .ok_or_else(|| GreetingSdkError::TransactionNotFound(signature.to_string()))?;

        parse_logs(&self.program_id, &logs)
    }

    fn send(&self, instructions: &[Instruction], extra_signers: &[&Keypair]) -> Result<Signature> {
        let mut signers: Vec<&Keypair> = vec![&self.payer];
        signers.extend_from_slice(extra_signers);

        let recent_blockhash = self.rpc.get_latest_blockhash()?;
        let transaction = Transaction::new_signed_with_payer(
            instructions,
            Some(&self.payer.pubkey()),
            &signers[..],
            recent_blockhash,
        );

        let signature = self.rpc.send_and_confirm_transaction(&transaction)?;
        debug!("Transaction confirmed: {}", signature);
        Ok(signature)
    }
}
