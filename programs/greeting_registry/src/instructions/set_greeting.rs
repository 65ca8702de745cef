use anchor_lang::prelude::*;
use crate::state::GreetingRegistry;

/// Replace the greeting (owner only)
pub fn set_greeting(ctx: Context<SetGreeting>, new_greeting: String) -> Result<()> {
    let clock = Clock::get()?;
    let caller = ctx.accounts.caller.key();

    let event = ctx.accounts.registry.set_greeting(caller, new_greeting, &clock)?;

    msg!("Greeting updated by {} at {}", event.sender, event.timestamp);
    emit!(event);
    Ok(())
}

/// The registry is resized to fit the new greeting before the handler runs.
/// If the owner check then fails the transaction reverts, resize included.
#[derive(Accounts)]
#[instruction(new_greeting: String)]
pub struct SetGreeting<'info> {
    #[account(
        mut,
        realloc = GreetingRegistry::space(&new_greeting),
        realloc::payer = caller,
        realloc::zero = false
    )]
    pub registry: Account<'info, GreetingRegistry>,

    #[account(mut)]
    pub caller: Signer<'info>,

    pub system_program: Program<'info, System>,
}
