#![no_std]

mod error;
mod events;
mod external;
mod fees;
mod reentrancy;
mod storage;


pub use error::Error;
pub use storage::{CancelReason, CreatorBalance, Subscription, Tier};

use events::*;
use fees::{split_payment, PaymentSplit};
use reentrancy::guarded;
use storage::{extend_instance, DataKey, BILLING_PERIOD, GRACE_PERIOD};

use soroban_sdk::{contract, contractimpl, log, Address, Env, String, Symbol, Vec};

/// Per-creator subscription vault.
///
/// Deployed and initialized by the subscription registry, one instance per
/// creator. Holds the creator's tier catalogue, every subscriber's billing
/// state and the per-asset balance ledger.
#[contract]
pub struct CreatorVault;

#[contractimpl]
impl CreatorVault {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Bind the vault to its creator (called by the registry on registration)
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `InvalidInput`: No accepted assets
    pub fn initialize(
        env: Env,
        registry: Address,
        badge: Address,
        creator: Address,
        accepted_assets: Vec<Address>,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        registry.require_auth();

        if accepted_assets.is_empty() {
            return Err(Error::InvalidInput);
        }

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Registry, &registry);
        env.storage().instance().set(&DataKey::Badge, &badge);
        env.storage().instance().set(&DataKey::Creator, &creator);
        env.storage()
            .instance()
            .set(&DataKey::AcceptedAssets, &accepted_assets);
        storage::set_tier_count(&env, 0);
        storage::set_active_subscriptions(&env, 0);
        extend_instance(&env);

        Ok(())
    }

    // ============================================
    // TIER CATALOGUE (creator only)
    // ============================================

    /// Create a subscription tier
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `PlatformPaused`: Platform is paused
    /// - `InvalidInput`: Empty name
    /// - `InvalidPrice`: Price must be positive
    pub fn create_tier(
        env: Env,
        name: String,
        description: String,
        price: i128,
        max_subscribers: u32,
    ) -> Result<u32, Error> {
        Self::check_not_paused(&env)?;

        let creator = storage::get_creator(&env)?;
        creator.require_auth();

        if name.len() == 0 {
            return Err(Error::InvalidInput);
        }
        if price <= 0 {
            return Err(Error::InvalidPrice);
        }

        let tier_id = storage::get_tier_count(&env)
            .checked_add(1)
            .ok_or(Error::Overflow)?;

        let tier = Tier {
            id: tier_id,
            name: name.clone(),
            description,
            price,
            max_subscribers,
            current_subscribers: 0,
            active: true,
        };

        storage::set_tier(&env, &tier);
        storage::set_tier_count(&env, tier_id);
        extend_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "tier_created"), tier_id),
            TierCreatedEvent {
                tier_id,
                name,
                price,
                max_subscribers,
            },
        );

        Ok(tier_id)
    }

    /// Overwrite a tier's mutable fields
    ///
    /// Lowering `max_subscribers` below the current count is allowed; it
    /// blocks new subscriptions until the count drops. Existing subscriptions
    /// keep the price they signed up at.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `PlatformPaused`: Platform is paused
    /// - `TierNotFound`: Unknown tier id
    /// - `InvalidInput`: Empty name
    /// - `InvalidPrice`: Price must be positive
    pub fn update_tier(
        env: Env,
        tier_id: u32,
        name: String,
        description: String,
        price: i128,
        max_subscribers: u32,
        active: bool,
    ) -> Result<(), Error> {
        Self::check_not_paused(&env)?;

        let creator = storage::get_creator(&env)?;
        creator.require_auth();

        let mut tier = storage::get_tier(&env, tier_id).ok_or(Error::TierNotFound)?;

        if name.len() == 0 {
            return Err(Error::InvalidInput);
        }
        if price <= 0 {
            return Err(Error::InvalidPrice);
        }

        tier.name = name.clone();
        tier.description = description;
        tier.price = price;
        tier.max_subscribers = max_subscribers;
        tier.active = active;
        storage::set_tier(&env, &tier);
        extend_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "tier_updated"), tier_id),
            TierUpdatedEvent {
                tier_id,
                name,
                price,
                max_subscribers,
                active,
            },
        );

        Ok(())
    }

    // ============================================
    // SUBSCRIBER FLOWS
    // ============================================

    /// Subscribe to a tier, paying the first cycle up front
    ///
    /// The subscriber must have approved the vault to spend at least the tier
    /// price of `asset`. Returns the id of the minted badge.
    ///
    /// # Errors
    /// - `Reentrancy`: Nested call into the vault
    /// - `PlatformPaused`: Platform is paused
    /// - `CreatorInactive`: Registry deactivated this creator
    /// - `TierNotFound` / `TierInactive`: Tier unknown or switched off
    /// - `UnsupportedAsset`: Asset not accepted by creator or platform
    /// - `TierFull`: Tier at its subscriber cap
    /// - `AlreadySubscribed`: Subscriber already active on this tier
    /// - `PaymentFailed`: Allowance or balance too low
    pub fn subscribe(env: Env, subscriber: Address, tier_id: u32, asset: Address) -> Result<u64, Error> {
        guarded(&env, || Self::subscribe_unguarded(&env, subscriber, tier_id, asset))
    }

    /// Cancel the caller's subscription. The current period is not refunded.
    ///
    /// # Errors
    /// - `Reentrancy`: Nested call into the vault
    /// - `PlatformPaused`: Platform is paused
    /// - `SubscriptionNotFound`: No active subscription on this tier
    pub fn cancel_subscription(env: Env, subscriber: Address, tier_id: u32) -> Result<(), Error> {
        guarded(&env, || {
            Self::check_not_paused(&env)?;

            subscriber.require_auth();

            let subscription = Self::active_subscription(&env, &subscriber, tier_id)?;
            Self::end_subscription(&env, subscription, CancelReason::Cancelled)
        })
    }

    // ============================================
    // RECURRING PAYMENTS (permissionless)
    // ============================================

    /// Charge the next billing cycle. Anyone may call this once payment is due.
    ///
    /// A failed pull leaves the subscription untouched, so the call can be
    /// retried until the grace period runs out.
    ///
    /// # Errors
    /// - `Reentrancy`: Nested call into the vault
    /// - `PlatformPaused`: Platform is paused
    /// - `SubscriptionNotFound`: No active subscription
    /// - `PaymentNotDue`: Before `next_payment_due`
    /// - `GracePeriodExpired`: After `next_payment_due + GRACE_PERIOD`
    /// - `PaymentFailed`: Allowance or balance too low
    pub fn process_recurring_payment(env: Env, subscriber: Address, tier_id: u32) -> Result<(), Error> {
        guarded(&env, || Self::process_payment_unguarded(&env, subscriber, tier_id))
    }

    /// Close a subscription whose grace period ran out. Anyone may call this.
    ///
    /// # Errors
    /// - `Reentrancy`: Nested call into the vault
    /// - `PlatformPaused`: Platform is paused
    /// - `SubscriptionNotFound`: No active subscription
    /// - `SubscriptionNotLapsed`: Still inside the payment window
    pub fn expire_subscription(env: Env, subscriber: Address, tier_id: u32) -> Result<(), Error> {
        guarded(&env, || {
            Self::check_not_paused(&env)?;

            let subscription = Self::active_subscription(&env, &subscriber, tier_id)?;
            let grace_end = subscription
                .next_payment_due
                .checked_add(GRACE_PERIOD)
                .ok_or(Error::Overflow)?;
            if env.ledger().timestamp() <= grace_end {
                return Err(Error::SubscriptionNotLapsed);
            }

            log!(&env, "subscription lapsed", tier_id);
            Self::end_subscription(&env, subscription, CancelReason::Lapsed)
        })
    }

    // ============================================
    // PAYOUTS
    // ============================================

    /// Withdraw the creator's full available balance in `asset`
    ///
    /// # Errors
    /// - `Reentrancy`: Nested call into the vault
    /// - `PlatformPaused`: Platform is paused
    /// - `NoFundsAvailable`: Nothing to withdraw
    /// - `PaymentFailed`: Transfer out was refused
    pub fn withdraw_earnings(env: Env, asset: Address) -> Result<i128, Error> {
        guarded(&env, || {
            Self::check_not_paused(&env)?;

            let creator = storage::get_creator(&env)?;
            creator.require_auth();

            let mut balance = storage::get_balance(&env, &asset);
            let amount = balance.available;
            if amount <= 0 {
                return Err(Error::NoFundsAvailable);
            }

            // Zero before the transfer out
            balance.available = 0;
            storage::set_balance(&env, &asset, &balance);

            external::push(&env, &asset, &creator, amount)?;
            extend_instance(&env);

            env.events().publish(
                (Symbol::new(&env, "payment_withdrawn"), creator.clone()),
                PaymentWithdrawnEvent {
                    creator,
                    asset,
                    amount,
                },
            );

            Ok(amount)
        })
    }

    /// Send accrued platform fees in `asset` to the registry treasury
    /// (platform admin only)
    ///
    /// # Errors
    /// - `Reentrancy`: Nested call into the vault
    /// - `PlatformPaused`: Platform is paused
    /// - `NoFundsAvailable`: No fees accrued
    /// - `PaymentFailed`: Transfer out was refused
    pub fn collect_platform_fees(env: Env, asset: Address) -> Result<i128, Error> {
        guarded(&env, || {
            let registry = storage::get_registry(&env)?;
            Self::check_not_paused(&env)?;

            external::platform_admin(&env, &registry).require_auth();

            let amount = storage::get_platform_fees(&env, &asset);
            if amount <= 0 {
                return Err(Error::NoFundsAvailable);
            }
            storage::set_platform_fees(&env, &asset, 0);

            let treasury = external::treasury(&env, &registry);
            external::push(&env, &asset, &treasury, amount)?;
            extend_instance(&env);

            env.events().publish(
                (Symbol::new(&env, "platform_fees_collected"), asset.clone()),
                PlatformFeesCollectedEvent {
                    treasury,
                    asset,
                    amount,
                },
            );

            Ok(amount)
        })
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn get_tier(env: Env, tier_id: u32) -> Result<Tier, Error> {
        storage::get_tier(&env, tier_id).ok_or(Error::TierNotFound)
    }

    /// Latest subscription record, including cancelled ones
    pub fn get_subscription(env: Env, subscriber: Address, tier_id: u32) -> Result<Subscription, Error> {
        storage::get_subscription(&env, &subscriber, tier_id).ok_or(Error::SubscriptionNotFound)
    }

    /// True while the subscription is active and not past its grace period
    pub fn is_subscription_active(env: Env, subscriber: Address, tier_id: u32) -> bool {
        match storage::get_subscription(&env, &subscriber, tier_id) {
            Some(subscription) if subscription.active => subscription
                .next_payment_due
                .checked_add(GRACE_PERIOD)
                .map_or(true, |grace_end| env.ledger().timestamp() <= grace_end),
            _ => false,
        }
    }

    pub fn get_creator_balance(env: Env, asset: Address) -> CreatorBalance {
        storage::get_balance(&env, &asset)
    }

    /// Platform fees accrued in `asset` and not yet collected
    pub fn get_platform_fee_balance(env: Env, asset: Address) -> i128 {
        storage::get_platform_fees(&env, &asset)
    }

    pub fn get_total_tiers(env: Env) -> u32 {
        storage::get_tier_count(&env)
    }

    pub fn total_active_subscriptions(env: Env) -> u32 {
        storage::get_active_subscriptions(&env)
    }

    pub fn get_creator(env: Env) -> Result<Address, Error> {
        storage::get_creator(&env)
    }

    pub fn get_registry(env: Env) -> Result<Address, Error> {
        storage::get_registry(&env)
    }

    pub fn get_accepted_assets(env: Env) -> Vec<Address> {
        storage::get_accepted_assets(&env)
    }
}

// ============================================
// INTERNAL HELPERS
// ============================================

impl CreatorVault {
    fn check_not_paused(env: &Env) -> Result<(), Error> {
        let registry = storage::get_registry(env)?;
        if external::is_paused(env, &registry) {
            return Err(Error::PlatformPaused);
        }
        Ok(())
    }

    fn active_subscription(env: &Env, subscriber: &Address, tier_id: u32) -> Result<Subscription, Error> {
        storage::get_subscription(env, subscriber, tier_id)
            .filter(|subscription| subscription.active)
            .ok_or(Error::SubscriptionNotFound)
    }

    /// Credit a payment to the creator and platform ledgers
    fn credit(env: &Env, asset: &Address, split: &PaymentSplit) -> Result<(), Error> {
        let mut balance = storage::get_balance(env, asset);
        balance.available = balance
            .available
            .checked_add(split.creator_share)
            .ok_or(Error::Overflow)?;
        balance.total_earned = balance
            .total_earned
            .checked_add(split.creator_share)
            .ok_or(Error::Overflow)?;
        storage::set_balance(env, asset, &balance);

        let fees = storage::get_platform_fees(env, asset)
            .checked_add(split.platform_fee)
            .ok_or(Error::Overflow)?;
        storage::set_platform_fees(env, asset, fees);

        Ok(())
    }

    fn subscribe_unguarded(env: &Env, subscriber: Address, tier_id: u32, asset: Address) -> Result<u64, Error> {
        Self::check_not_paused(env)?;

        subscriber.require_auth();

        let registry = storage::get_registry(env)?;
        let creator = storage::get_creator(env)?;

        if !external::is_creator_active(env, &registry, &creator) {
            return Err(Error::CreatorInactive);
        }

        let mut tier = storage::get_tier(env, tier_id).ok_or(Error::TierNotFound)?;
        if !tier.active {
            return Err(Error::TierInactive);
        }

        if !storage::get_accepted_assets(env).contains(&asset)
            || !external::is_supported_token(env, &registry, &asset)
        {
            return Err(Error::UnsupportedAsset);
        }

        if tier.max_subscribers > 0 && tier.current_subscribers >= tier.max_subscribers {
            return Err(Error::TierFull);
        }

        if Self::active_subscription(env, &subscriber, tier_id).is_ok() {
            return Err(Error::AlreadySubscribed);
        }

        let fee_rate = external::platform_fee_rate(env, &registry);
        let split = split_payment(tier.price, fee_rate).ok_or(Error::Overflow)?;

        let now = env.ledger().timestamp();
        let mut subscription = Subscription {
            subscriber: subscriber.clone(),
            tier_id,
            amount: tier.price,
            last_payment: now,
            next_payment_due: now.checked_add(BILLING_PERIOD).ok_or(Error::Overflow)?,
            asset: asset.clone(),
            badge_id: 0,
            active: true,
        };

        // State first, then the external pull
        storage::set_subscription(env, &subscription);
        tier.current_subscribers = tier
            .current_subscribers
            .checked_add(1)
            .ok_or(Error::Overflow)?;
        storage::set_tier(env, &tier);
        let active = storage::get_active_subscriptions(env)
            .checked_add(1)
            .ok_or(Error::Overflow)?;
        storage::set_active_subscriptions(env, active);
        Self::credit(env, &asset, &split)?;

        external::pull(env, &asset, &subscriber, tier.price)?;

        let badge = storage::get_badge_contract(env)?;
        subscription.badge_id = external::mint_badge(env, &badge, &subscriber, tier_id);
        storage::set_subscription(env, &subscription);

        external::record_subscription(env, &registry, &creator);
        extend_instance(env);

        env.events().publish(
            (Symbol::new(env, "subscription_created"), subscriber.clone(), tier_id),
            SubscriptionCreatedEvent {
                subscriber,
                tier_id,
                asset,
                amount: subscription.amount,
                badge_id: subscription.badge_id,
                next_payment_due: subscription.next_payment_due,
            },
        );

        Ok(subscription.badge_id)
    }

    fn process_payment_unguarded(env: &Env, subscriber: Address, tier_id: u32) -> Result<(), Error> {
        Self::check_not_paused(env)?;

        let mut subscription = Self::active_subscription(env, &subscriber, tier_id)?;

        let now = env.ledger().timestamp();
        if now < subscription.next_payment_due {
            return Err(Error::PaymentNotDue);
        }
        let grace_end = subscription
            .next_payment_due
            .checked_add(GRACE_PERIOD)
            .ok_or(Error::Overflow)?;
        if now > grace_end {
            return Err(Error::GracePeriodExpired);
        }

        let registry = storage::get_registry(env)?;
        let fee_rate = external::platform_fee_rate(env, &registry);
        let split = split_payment(subscription.amount, fee_rate).ok_or(Error::Overflow)?;

        subscription.last_payment = now;
        subscription.next_payment_due = subscription
            .next_payment_due
            .checked_add(BILLING_PERIOD)
            .ok_or(Error::Overflow)?;
        storage::set_subscription(env, &subscription);
        Self::credit(env, &subscription.asset, &split)?;

        external::pull(env, &subscription.asset, &subscriber, subscription.amount)?;
        extend_instance(env);

        env.events().publish(
            (Symbol::new(env, "payment_processed"), subscriber.clone(), tier_id),
            PaymentProcessedEvent {
                subscriber,
                tier_id,
                asset: subscription.asset,
                amount: subscription.amount,
                platform_fee: split.platform_fee,
                creator_share: split.creator_share,
                next_payment_due: subscription.next_payment_due,
            },
        );

        Ok(())
    }

    /// Deactivate, release the tier slot and burn the badge
    fn end_subscription(env: &Env, mut subscription: Subscription, reason: CancelReason) -> Result<(), Error> {
        subscription.active = false;
        storage::set_subscription(env, &subscription);

        if let Some(mut tier) = storage::get_tier(env, subscription.tier_id) {
            tier.current_subscribers = tier.current_subscribers.saturating_sub(1);
            storage::set_tier(env, &tier);
        }
        let active = storage::get_active_subscriptions(env).saturating_sub(1);
        storage::set_active_subscriptions(env, active);

        let badge = storage::get_badge_contract(env)?;
        external::burn_badge(env, &badge, subscription.badge_id);
        extend_instance(env);

        env.events().publish(
            (
                Symbol::new(env, "subscription_cancelled"),
                subscription.subscriber.clone(),
                subscription.tier_id,
            ),
            SubscriptionCancelledEvent {
                subscriber: subscription.subscriber,
                tier_id: subscription.tier_id,
                badge_id: subscription.badge_id,
                reason,
            },
        );

        Ok(())
    }
}
