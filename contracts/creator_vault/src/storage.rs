use soroban_sdk::{contracttype, Address, Env, String, Vec};

use crate::error::Error;

// Constants
pub const BILLING_PERIOD: u64 = 30 * 24 * 60 * 60; // 30 days
pub const GRACE_PERIOD: u64 = 8 * 24 * 60 * 60; // 8 days past due
pub const BASIS_POINTS: i128 = 10_000; // 100% = 10,000 basis points

pub const TTL_THRESHOLD: u32 = 518_400; // ~30 days
pub const TTL_EXTEND: u32 = 2_592_000; // ~150 days

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tier {
    /// Sequential id, starting at 1
    pub id: u32,
    pub name: String,
    pub description: String,
    /// Price per billing cycle in the asset's smallest unit
    pub price: i128,
    /// 0 = unlimited
    pub max_subscribers: u32,
    pub current_subscribers: u32,
    pub active: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subscription {
    pub subscriber: Address,
    pub tier_id: u32,
    /// Charged every cycle; fixed at subscribe time
    pub amount: i128,
    pub last_payment: u64,
    pub next_payment_due: u64,
    pub asset: Address,
    pub badge_id: u64,
    pub active: bool,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CreatorBalance {
    /// Withdrawable now
    pub available: i128,
    /// Lifetime creator share, never decreases
    pub total_earned: i128,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CancelReason {
    /// Subscriber cancelled
    Cancelled = 0,
    /// Grace period ran out without payment
    Lapsed = 1,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Registry,
    Badge,
    Creator,
    AcceptedAssets,
    TierCount,
    ActiveSubscriptions,
    Locked,
    Tier(u32),
    Subscription(Address, u32), // (subscriber, tier_id)
    Balance(Address),           // asset -> CreatorBalance
    PlatformFees(Address),      // asset -> accrued platform fee
}

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND);
}

fn set_persistent<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND);
}

// Configuration

pub fn get_registry(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Registry)
        .ok_or(Error::NotInitialized)
}

pub fn get_badge_contract(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Badge)
        .ok_or(Error::NotInitialized)
}

pub fn get_creator(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Creator)
        .ok_or(Error::NotInitialized)
}

pub fn get_accepted_assets(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::AcceptedAssets)
        .unwrap_or(Vec::new(env))
}

// Tiers

pub fn get_tier_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::TierCount)
        .unwrap_or(0)
}

pub fn set_tier_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::TierCount, &count);
}

pub fn get_tier(env: &Env, tier_id: u32) -> Option<Tier> {
    env.storage().persistent().get(&DataKey::Tier(tier_id))
}

pub fn set_tier(env: &Env, tier: &Tier) {
    set_persistent(env, &DataKey::Tier(tier.id), tier);
}

// Subscriptions

pub fn get_subscription(env: &Env, subscriber: &Address, tier_id: u32) -> Option<Subscription> {
    env.storage()
        .persistent()
        .get(&DataKey::Subscription(subscriber.clone(), tier_id))
}

pub fn set_subscription(env: &Env, subscription: &Subscription) {
    set_persistent(
        env,
        &DataKey::Subscription(subscription.subscriber.clone(), subscription.tier_id),
        subscription,
    );
}

pub fn get_active_subscriptions(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ActiveSubscriptions)
        .unwrap_or(0)
}

pub fn set_active_subscriptions(env: &Env, count: u32) {
    env.storage()
        .instance()
        .set(&DataKey::ActiveSubscriptions, &count);
}

// Ledger

pub fn get_balance(env: &Env, asset: &Address) -> CreatorBalance {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(asset.clone()))
        .unwrap_or_default()
}

pub fn set_balance(env: &Env, asset: &Address, balance: &CreatorBalance) {
    set_persistent(env, &DataKey::Balance(asset.clone()), balance);
}

pub fn get_platform_fees(env: &Env, asset: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::PlatformFees(asset.clone()))
        .unwrap_or(0)
}

pub fn set_platform_fees(env: &Env, asset: &Address, amount: i128) {
    set_persistent(env, &DataKey::PlatformFees(asset.clone()), &amount);
}
