use soroban_sdk::{contracttype, Address, String};

use crate::storage::CancelReason;

#[contracttype]
#[derive(Clone, Debug)]
pub struct TierCreatedEvent {
    pub tier_id: u32,
    pub name: String,
    pub price: i128,
    pub max_subscribers: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TierUpdatedEvent {
    pub tier_id: u32,
    pub name: String,
    pub price: i128,
    pub max_subscribers: u32,
    pub active: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SubscriptionCreatedEvent {
    pub subscriber: Address,
    pub tier_id: u32,
    pub asset: Address,
    pub amount: i128,
    pub badge_id: u64,
    pub next_payment_due: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SubscriptionCancelledEvent {
    pub subscriber: Address,
    pub tier_id: u32,
    pub badge_id: u64,
    pub reason: CancelReason,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PaymentProcessedEvent {
    pub subscriber: Address,
    pub tier_id: u32,
    pub asset: Address,
    pub amount: i128,
    pub platform_fee: i128,
    pub creator_share: i128,
    pub next_payment_due: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PaymentWithdrawnEvent {
    pub creator: Address,
    pub asset: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PlatformFeesCollectedEvent {
    pub treasury: Address,
    pub asset: Address,
    pub amount: i128,
}
