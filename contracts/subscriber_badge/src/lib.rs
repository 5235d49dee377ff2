#![no_std]

mod error;
mod events;
mod storage;

pub use error::Error;
pub use storage::Badge;

use events::{BadgeBurnedEvent, BadgeMintedEvent, VaultAuthorizedEvent};
use storage::{extend_instance, DataKey};

use soroban_sdk::{contract, contractimpl, log, Address, Env, Symbol, Vec};

/// Soulbound proof-of-subscription badges.
///
/// One live badge exists per (vault, subscriber, tier). Badges are minted and
/// burned only by the creator vaults the registry has authorized, and can never
/// be transferred or approved.
#[contract]
pub struct SubscriberBadge;

#[contractimpl]
impl SubscriberBadge {
    /// Initialize the badge contract
    ///
    /// `admin` is the subscription registry, which authorizes vaults as they
    /// are deployed.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::NextTokenId, &1u64);
        extend_instance(&env);

        Ok(())
    }

    /// Allow a vault to mint and burn badges
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn add_vault(env: Env, vault: Address) -> Result<(), Error> {
        Self::admin(&env)?.require_auth();

        storage::set_vault(&env, &vault);

        env.events().publish(
            (Symbol::new(&env, "vault_authorized"),),
            VaultAuthorizedEvent {
                vault,
                authorized: true,
            },
        );

        Ok(())
    }

    /// Revoke a vault's minting rights. Badges it already minted stay live.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn remove_vault(env: Env, vault: Address) -> Result<(), Error> {
        Self::admin(&env)?.require_auth();

        storage::remove_vault(&env, &vault);

        env.events().publish(
            (Symbol::new(&env, "vault_authorized"),),
            VaultAuthorizedEvent {
                vault,
                authorized: false,
            },
        );

        Ok(())
    }

    /// Mint a badge for an active subscription (authorized vaults only)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: `vault` is not an authorized vault
    /// - `AlreadyMinted`: A live badge exists for this subscriber and tier
    pub fn mint(env: Env, vault: Address, subscriber: Address, tier_id: u32) -> Result<u64, Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        vault.require_auth();

        if !storage::is_vault(&env, &vault) {
            return Err(Error::Unauthorized);
        }
        storage::extend_vault(&env, &vault);

        if storage::get_live(&env, &vault, &subscriber, tier_id).is_some() {
            return Err(Error::AlreadyMinted);
        }

        let token_id: u64 = env
            .storage()
            .instance()
            .get(&DataKey::NextTokenId)
            .unwrap_or(1);
        let next_token_id = token_id.checked_add(1).ok_or(Error::Overflow)?;

        let badge = Badge {
            token_id,
            subscriber: subscriber.clone(),
            vault: vault.clone(),
            tier_id,
            minted_at: env.ledger().timestamp(),
            active: true,
        };

        storage::set_badge(&env, &badge);
        storage::set_live(&env, &vault, &subscriber, tier_id, token_id);

        let mut owned = storage::get_user_badges(&env, &subscriber);
        owned.push_back(token_id);
        storage::set_user_badges(&env, &subscriber, &owned);

        env.storage()
            .instance()
            .set(&DataKey::NextTokenId, &next_token_id);
        extend_instance(&env);

        log!(&env, "badge minted", token_id, tier_id);

        env.events().publish(
            (Symbol::new(&env, "badge_minted"), token_id),
            BadgeMintedEvent {
                token_id,
                subscriber,
                vault,
                tier_id,
            },
        );

        Ok(token_id)
    }

    /// Burn a badge when its subscription ends (minting vault only)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `BadgeNotFound`: Unknown or already burned token
    /// - `Unauthorized`: `vault` did not mint this badge
    pub fn burn(env: Env, vault: Address, token_id: u64) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        vault.require_auth();

        let mut badge = storage::get_badge(&env, token_id).ok_or(Error::BadgeNotFound)?;
        if !badge.active {
            return Err(Error::BadgeNotFound);
        }
        if badge.vault != vault {
            return Err(Error::Unauthorized);
        }

        badge.active = false;
        storage::set_badge(&env, &badge);
        storage::remove_live(&env, &vault, &badge.subscriber, badge.tier_id);

        let mut owned = storage::get_user_badges(&env, &badge.subscriber);
        if let Some(index) = owned.first_index_of(token_id) {
            owned.remove(index);
        }
        storage::set_user_badges(&env, &badge.subscriber, &owned);
        extend_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "badge_burned"), token_id),
            BadgeBurnedEvent {
                token_id,
                subscriber: badge.subscriber,
                vault,
                tier_id: badge.tier_id,
            },
        );

        Ok(())
    }

    // ============================================
    // SOULBOUND: ownership never moves
    // ============================================

    pub fn transfer(_env: Env, _from: Address, _to: Address, _token_id: u64) -> Result<(), Error> {
        Err(Error::NonTransferable)
    }

    pub fn transfer_from(
        _env: Env,
        _spender: Address,
        _from: Address,
        _to: Address,
        _token_id: u64,
    ) -> Result<(), Error> {
        Err(Error::NonTransferable)
    }

    pub fn approve(_env: Env, _owner: Address, _spender: Address, _token_id: u64) -> Result<(), Error> {
        Err(Error::NonTransferable)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Live badge ids held by `subscriber`
    pub fn get_user_badges(env: Env, subscriber: Address) -> Vec<u64> {
        storage::get_user_badges(&env, &subscriber)
    }

    pub fn get_badge(env: Env, token_id: u64) -> Result<Badge, Error> {
        storage::get_badge(&env, token_id).ok_or(Error::BadgeNotFound)
    }

    pub fn balance_of(env: Env, subscriber: Address) -> u32 {
        storage::get_user_badges(&env, &subscriber).len()
    }

    pub fn owner_of(env: Env, token_id: u64) -> Result<Address, Error> {
        storage::get_badge(&env, token_id)
            .filter(|badge| badge.active)
            .map(|badge| badge.subscriber)
            .ok_or(Error::BadgeNotFound)
    }

    /// Number of badges ever minted, burned ones included
    pub fn total_minted(env: Env) -> u64 {
        env.storage()
            .instance()
            .get::<DataKey, u64>(&DataKey::NextTokenId)
            .unwrap_or(1)
            - 1
    }

    pub fn is_vault(env: Env, vault: Address) -> bool {
        storage::is_vault(&env, &vault)
    }

    fn admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }
}
