//! Instruction builders for the greeting registry program

use anchor_lang::{
    solana_program::instruction::Instruction, system_program, InstructionData, ToAccountMetas,
};
use greeting_registry::{accounts, instruction};
use solana_sdk::pubkey::Pubkey;

/// Create `registry` (a fresh keypair account that must also sign)
pub fn initialize(
    program_id: Pubkey,
    registry: Pubkey,
    deployer: Pubkey,
    greeting: String,
) -> Instruction {
    let mut metas = accounts::Initialize {
        registry,
        deployer,
        system_program: system_program::ID,
    }
    .to_account_metas(None);

    // Keypair-addressed accounts sign their own creation
    for meta in metas.iter_mut().filter(|meta| meta.pubkey == registry) {
        meta.is_signer = true;
    }

    Instruction {
        program_id,
        accounts: metas,
        data: instruction::Initialize { greeting }.data(),
    }
}

/// `caller` signs and pays for any growth of the account
pub fn set_greeting(
    program_id: Pubkey,
    registry: Pubkey,
    caller: Pubkey,
    new_greeting: String,
) -> Instruction {
    Instruction {
        program_id,
        accounts: accounts::SetGreeting {
            registry,
            caller,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: instruction::SetGreeting { new_greeting }.data(),
    }
}

pub fn transfer_ownership(
    program_id: Pubkey,
    registry: Pubkey,
    caller: Pubkey,
    new_owner: Pubkey,
) -> Instruction {
    Instruction {
        program_id,
        accounts: accounts::TransferOwnership { registry, caller }.to_account_metas(None),
        data: instruction::TransferOwnership { new_owner }.data(),
    }
}

pub fn get_greeting(program_id: Pubkey, registry: Pubkey) -> Instruction {
    Instruction {
        program_id,
        accounts: accounts::ReadRegistry { registry }.to_account_metas(None),
        data: instruction::GetGreeting {}.data(),
    }
}

pub fn get_owner(program_id: Pubkey, registry: Pubkey) -> Instruction {
    Instruction {
        program_id,
        accounts: accounts::ReadRegistry { registry }.to_account_metas(None),
        data: instruction::GetOwner {}.data(),
    }
}

pub fn get_last_updated(program_id: Pubkey, registry: Pubkey) -> Instruction {
    Instruction {
        program_id,
        accounts: accounts::ReadRegistry { registry }.to_account_metas(None),
        data: instruction::GetLastUpdated {}.data(),
    }
}
