use anchor_lang::prelude::*;
use crate::state::GreetingRegistry;

/// Hand the registry to a new owner (owner only)
pub fn transfer_ownership(ctx: Context<TransferOwnership>, new_owner: Pubkey) -> Result<()> {
    let caller = ctx.accounts.caller.key();

    let event = ctx.accounts.registry.transfer_ownership(caller, new_owner)?;

    msg!(
        "Ownership transferred from {} to {}",
        event.previous_owner,
        event.new_owner
    );
    emit!(event);
    Ok(())
}

#[derive(Accounts)]
pub struct TransferOwnership<'info> {
    #[account(mut)]
    pub registry: Account<'info, GreetingRegistry>,

    pub caller: Signer<'info>,
}
