use anchor_lang::prelude::*;
use crate::state::GreetingRegistry;

/// Create a registry holding `greeting`, owned by the deployer
pub fn initialize(ctx: Context<Initialize>, greeting: String) -> Result<()> {
    let clock = Clock::get()?;
    let deployer = ctx.accounts.deployer.key();

    let registry = GreetingRegistry::new(greeting, deployer, &clock)?;
    ctx.accounts.registry.set_inner(registry);

    msg!(
        "Greeting registry initialized by {} with: {}",
        deployer,
        ctx.accounts.registry.greeting()
    );
    Ok(())
}

#[derive(Accounts)]
#[instruction(greeting: String)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = deployer,
        space = GreetingRegistry::space(&greeting)
    )]
    pub registry: Account<'info, GreetingRegistry>,

    #[account(mut)]
    pub deployer: Signer<'info>,

    pub system_program: Program<'info, System>,
}
