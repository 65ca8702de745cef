//! Read-only views. Values are returned as instruction return data.

use anchor_lang::prelude::*;
use crate::state::GreetingRegistry;

pub fn get_greeting(ctx: Context<ReadRegistry>) -> Result<String> {
    Ok(ctx.accounts.registry.greeting().to_string())
}

pub fn get_owner(ctx: Context<ReadRegistry>) -> Result<Pubkey> {
    Ok(ctx.accounts.registry.current_owner())
}

pub fn get_last_updated(ctx: Context<ReadRegistry>) -> Result<i64> {
    Ok(ctx.accounts.registry.last_updated())
}

#[derive(Accounts)]
pub struct ReadRegistry<'info> {
    pub registry: Account<'info, GreetingRegistry>,
}
