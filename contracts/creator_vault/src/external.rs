//! Calls out of the vault: registry policy, badge issuance and asset transfers.

use soroban_sdk::{token, vec, Address, Env, IntoVal, Symbol};

use crate::error::Error;

// ============================================
// REGISTRY
// ============================================

pub fn is_paused(env: &Env, registry: &Address) -> bool {
    env.invoke_contract(registry, &Symbol::new(env, "is_paused"), vec![env])
}

pub fn platform_fee_rate(env: &Env, registry: &Address) -> u32 {
    env.invoke_contract(registry, &Symbol::new(env, "platform_fee_rate"), vec![env])
}

pub fn is_supported_token(env: &Env, registry: &Address, asset: &Address) -> bool {
    env.invoke_contract(
        registry,
        &Symbol::new(env, "is_supported_token"),
        vec![env, asset.to_val()],
    )
}

pub fn is_creator_active(env: &Env, registry: &Address, creator: &Address) -> bool {
    env.invoke_contract(
        registry,
        &Symbol::new(env, "is_creator_active"),
        vec![env, creator.to_val()],
    )
}

pub fn record_subscription(env: &Env, registry: &Address, creator: &Address) {
    env.invoke_contract::<()>(
        registry,
        &Symbol::new(env, "record_subscription"),
        vec![env, creator.to_val()],
    );
}

pub fn platform_admin(env: &Env, registry: &Address) -> Address {
    env.invoke_contract(registry, &Symbol::new(env, "admin"), vec![env])
}

pub fn treasury(env: &Env, registry: &Address) -> Address {
    env.invoke_contract(registry, &Symbol::new(env, "treasury"), vec![env])
}

// ============================================
// BADGES
// ============================================

pub fn mint_badge(env: &Env, badge: &Address, subscriber: &Address, tier_id: u32) -> u64 {
    env.invoke_contract(
        badge,
        &Symbol::new(env, "mint"),
        vec![
            env,
            env.current_contract_address().to_val(),
            subscriber.to_val(),
            tier_id.into_val(env),
        ],
    )
}

pub fn burn_badge(env: &Env, badge: &Address, token_id: u64) {
    env.invoke_contract::<()>(
        badge,
        &Symbol::new(env, "burn"),
        vec![
            env,
            env.current_contract_address().to_val(),
            token_id.into_val(env),
        ],
    );
}

// ============================================
// ASSET TRANSFERS
// ============================================

/// Pull `amount` of `asset` from `payer` into the vault.
///
/// Spends the allowance `payer` granted the vault, so it also works for
/// third-party callers of the recurring payment crank.
pub fn pull(env: &Env, asset: &Address, payer: &Address, amount: i128) -> Result<(), Error> {
    let vault = env.current_contract_address();
    let client = token::Client::new(env, asset);

    match client.try_transfer_from(&vault, payer, &vault, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::PaymentFailed),
    }
}

/// Push `amount` of `asset` from the vault to `payee`.
pub fn push(env: &Env, asset: &Address, payee: &Address, amount: i128) -> Result<(), Error> {
    let vault = env.current_contract_address();
    let client = token::Client::new(env, asset);

    match client.try_transfer(&vault, payee, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::PaymentFailed),
    }
}
