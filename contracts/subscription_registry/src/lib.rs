#![no_std]

mod error;
mod events;
mod storage;
mod validation;

pub use error::Error;
pub use storage::{
    CreatorInfo, PlatformStats, SupportedToken, DEFAULT_FEE_BPS, MAX_FEE_BPS, MAX_PAGE_SIZE,
};

use events::*;
use storage::{extend_instance, DataKey};
use validation::{validate_fee_rate, validate_profile};

use soroban_sdk::{
    contract, contractimpl, log, vec, Address, BytesN, Env, IntoVal, String, Symbol, Vec,
};

#[contract]
pub struct SubscriptionRegistry;

#[contractimpl]
impl SubscriptionRegistry {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the registry
    ///
    /// `badge` must already be initialized with this registry as its admin.
    /// `vault_wasm_hash` is the uploaded creator vault code every
    /// registration deploys.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(
        env: Env,
        admin: Address,
        treasury: Address,
        badge: Address,
        vault_wasm_hash: BytesN<32>,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Treasury, &treasury);
        env.storage().instance().set(&DataKey::Badge, &badge);
        env.storage()
            .instance()
            .set(&DataKey::VaultWasmHash, &vault_wasm_hash);
        env.storage()
            .instance()
            .set(&DataKey::FeeRate, &DEFAULT_FEE_BPS);
        env.storage().instance().set(&DataKey::Paused, &false);
        storage::set_stats(&env, &PlatformStats::default());
        extend_instance(&env);

        Ok(())
    }

    /// Add an asset to the supported set, or relabel it
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn add_supported_token(env: Env, asset: Address, label: String) -> Result<(), Error> {
        Self::load_admin(&env)?.require_auth();

        storage::add_supported_asset(&env, &asset, &label);
        extend_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "token_added"), asset.clone()),
            SupportedTokenEvent { asset, label },
        );

        Ok(())
    }

    /// Remove an asset from the supported set
    ///
    /// New subscriptions in the asset stop; existing subscriptions keep
    /// billing and creators can still withdraw it.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `UnsupportedAsset`: Asset was not supported
    pub fn remove_supported_token(env: Env, asset: Address, label: String) -> Result<(), Error> {
        Self::load_admin(&env)?.require_auth();

        if storage::get_token_label(&env, &asset).is_none() {
            return Err(Error::UnsupportedAsset);
        }
        storage::remove_supported_asset(&env, &asset);
        extend_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "token_removed"), asset.clone()),
            SupportedTokenEvent { asset, label },
        );

        Ok(())
    }

    /// Set the platform fee taken from every payment
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `FeeTooHigh`: Above MAX_FEE_BPS
    pub fn set_platform_fee_rate(env: Env, fee_rate_bps: u32) -> Result<(), Error> {
        Self::load_admin(&env)?.require_auth();

        validate_fee_rate(fee_rate_bps)?;

        let old_fee_rate_bps = storage::get_fee_rate(&env);
        env.storage()
            .instance()
            .set(&DataKey::FeeRate, &fee_rate_bps);
        extend_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "platform_fee_updated"),),
            PlatformFeeUpdatedEvent {
                old_fee_rate_bps,
                new_fee_rate_bps: fee_rate_bps,
            },
        );

        Ok(())
    }

    /// Change where collected platform fees are sent
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn set_treasury(env: Env, treasury: Address) -> Result<(), Error> {
        Self::load_admin(&env)?.require_auth();

        let old_treasury = Self::treasury(env.clone())?;
        env.storage().instance().set(&DataKey::Treasury, &treasury);
        extend_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "treasury_updated"),),
            TreasuryUpdatedEvent {
                old_treasury,
                new_treasury: treasury,
            },
        );

        Ok(())
    }

    /// Deactivate a creator. Their vault, balances and subscriptions stay.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `CreatorNotFound`: Unknown creator
    /// - `CreatorInactive`: Already deactivated
    pub fn deactivate_creator(env: Env, creator: Address) -> Result<(), Error> {
        Self::load_admin(&env)?.require_auth();

        let mut info = storage::get_creator(&env, &creator).ok_or(Error::CreatorNotFound)?;
        if !info.active {
            return Err(Error::CreatorInactive);
        }

        info.active = false;
        storage::set_creator(&env, &info);

        let mut stats = storage::get_stats(&env);
        stats.active_creators = stats.active_creators.saturating_sub(1);
        storage::set_stats(&env, &stats);
        extend_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "creator_deactivated"), creator.clone()),
            CreatorDeactivatedEvent { creator },
        );

        Ok(())
    }

    /// Pause every vault (emergency)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn pause(env: Env) -> Result<(), Error> {
        Self::load_admin(&env)?.require_auth();

        env.storage().instance().set(&DataKey::Paused, &true);
        extend_instance(&env);
        env.events().publish((Symbol::new(&env, "paused"),), ());
        Ok(())
    }

    /// Unpause
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn unpause(env: Env) -> Result<(), Error> {
        Self::load_admin(&env)?.require_auth();

        env.storage().instance().set(&DataKey::Paused, &false);
        extend_instance(&env);
        env.events().publish((Symbol::new(&env, "unpaused"),), ());
        Ok(())
    }

    // ============================================
    // CREATOR REGISTRATION
    // ============================================

    /// Register the caller as a creator and deploy their vault
    ///
    /// Returns the new vault's address.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `PlatformPaused`: Platform is paused
    /// - `InvalidInput`: Empty name, or empty / duplicated asset list
    /// - `AlreadyRegistered`: Creator already has a vault
    /// - `UnsupportedAsset`: An accepted asset is not supported
    pub fn register_creator(
        env: Env,
        creator: Address,
        name: String,
        description: String,
        accepted_assets: Vec<Address>,
    ) -> Result<Address, Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }
        if storage::is_paused(&env) {
            return Err(Error::PlatformPaused);
        }

        creator.require_auth();

        validate_profile(&name, &accepted_assets)?;

        if storage::get_creator(&env, &creator).is_some() {
            return Err(Error::AlreadyRegistered);
        }

        for asset in accepted_assets.iter() {
            if storage::get_token_label(&env, &asset).is_none() {
                return Err(Error::UnsupportedAsset);
            }
        }

        let mut stats = storage::get_stats(&env);
        let sequence = stats.total_creators.checked_add(1).ok_or(Error::Overflow)?;

        let vault = Self::deploy_vault(&env, sequence)?;

        let badge: Address = env
            .storage()
            .instance()
            .get(&DataKey::Badge)
            .ok_or(Error::NotInitialized)?;

        env.invoke_contract::<()>(
            &vault,
            &Symbol::new(&env, "initialize"),
            vec![
                &env,
                env.current_contract_address().to_val(),
                badge.to_val(),
                creator.to_val(),
                accepted_assets.into_val(&env),
            ],
        );

        env.invoke_contract::<()>(
            &badge,
            &Symbol::new(&env, "add_vault"),
            vec![&env, vault.to_val()],
        );

        let info = CreatorInfo {
            creator: creator.clone(),
            name: name.clone(),
            description,
            vault: vault.clone(),
            accepted_assets,
            active: true,
            created_at: env.ledger().timestamp(),
        };
        storage::set_creator(&env, &info);
        storage::set_creator_at(&env, sequence, &creator);

        stats.total_creators = sequence;
        stats.active_creators = stats
            .active_creators
            .checked_add(1)
            .ok_or(Error::Overflow)?;
        storage::set_stats(&env, &stats);
        extend_instance(&env);

        log!(&env, "creator registered", sequence);

        env.events().publish(
            (Symbol::new(&env, "creator_registered"), creator.clone()),
            CreatorRegisteredEvent {
                creator,
                vault: vault.clone(),
                name,
            },
        );

        Ok(vault)
    }

    /// Count a new subscription (called by the creator's vault)
    ///
    /// # Errors
    /// - `CreatorNotFound`: Unknown creator
    pub fn record_subscription(env: Env, creator: Address) -> Result<(), Error> {
        let info = storage::get_creator(&env, &creator).ok_or(Error::CreatorNotFound)?;
        info.vault.require_auth();

        let mut stats = storage::get_stats(&env);
        stats.total_subscriptions = stats
            .total_subscriptions
            .checked_add(1)
            .ok_or(Error::Overflow)?;
        storage::set_stats(&env, &stats);
        extend_instance(&env);

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn get_creator_info(env: Env, creator: Address) -> Option<CreatorInfo> {
        storage::get_creator(&env, &creator)
    }

    pub fn get_vault_address(env: Env, creator: Address) -> Option<Address> {
        storage::get_creator(&env, &creator).map(|info| info.vault)
    }

    pub fn is_creator_active(env: Env, creator: Address) -> bool {
        storage::get_creator(&env, &creator).map_or(false, |info| info.active)
    }

    pub fn get_platform_stats(env: Env) -> PlatformStats {
        storage::get_stats(&env)
    }

    pub fn get_supported_tokens(env: Env) -> Vec<SupportedToken> {
        let mut tokens = Vec::new(&env);
        for asset in storage::get_supported_assets(&env).iter() {
            if let Some(label) = storage::get_token_label(&env, &asset) {
                tokens.push_back(SupportedToken { asset, label });
            }
        }
        tokens
    }

    pub fn is_supported_token(env: Env, asset: Address) -> bool {
        storage::get_token_label(&env, &asset).is_some()
    }

    /// Every registered creator, in registration order
    pub fn get_creators_list(env: Env) -> Vec<Address> {
        let total = storage::get_stats(&env).total_creators;
        storage::get_creators_page(&env, 0, total)
    }

    /// Up to `limit` creators (capped at MAX_PAGE_SIZE) after the first `start`
    pub fn get_creators_page(env: Env, start: u32, limit: u32) -> Vec<Address> {
        storage::get_creators_page(&env, start, limit.min(MAX_PAGE_SIZE))
    }

    pub fn platform_fee_rate(env: Env) -> u32 {
        storage::get_fee_rate(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        Self::load_admin(&env)
    }

    pub fn treasury(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Treasury)
            .ok_or(Error::NotInitialized)
    }

    pub fn badge(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Badge)
            .ok_or(Error::NotInitialized)
    }
}

// ============================================
// INTERNAL HELPERS
// ============================================

impl SubscriptionRegistry {
    fn load_admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    /// Deploy a fresh vault; the salt is the creator's registration sequence
    fn deploy_vault(env: &Env, sequence: u32) -> Result<Address, Error> {
        let wasm_hash: BytesN<32> = env
            .storage()
            .instance()
            .get(&DataKey::VaultWasmHash)
            .ok_or(Error::NotInitialized)?;

        let mut salt = [0u8; 32];
        salt[..4].copy_from_slice(&sequence.to_be_bytes());

        Ok(env
            .deployer()
            .with_current_contract(BytesN::from_array(env, &salt))
            .deploy_v2(wasm_hash, ()))
    }
}

#[cfg(test)]
mod test;
