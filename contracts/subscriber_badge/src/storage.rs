use soroban_sdk::{contracttype, Address, Env, Vec};

pub const TTL_THRESHOLD: u32 = 518_400; // ~30 days
pub const TTL_EXTEND: u32 = 2_592_000; // ~150 days

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Badge {
    pub token_id: u64,
    /// Holder, fixed at mint
    pub subscriber: Address,
    /// Vault that minted the badge and the only one allowed to burn it
    pub vault: Address,
    pub tier_id: u32,
    pub minted_at: u64,
    pub active: bool,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Initialized,
    NextTokenId,
    Vault(Address),
    Badge(u64),
    UserBadges(Address),
    Live(Address, Address, u32), // (vault, subscriber, tier_id) -> token_id
}

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND);
}

// Vault allow-list, one persistent entry per vault

pub fn is_vault(env: &Env, vault: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Vault(vault.clone()))
}

pub fn set_vault(env: &Env, vault: &Address) {
    let key = DataKey::Vault(vault.clone());
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND);
}

pub fn extend_vault(env: &Env, vault: &Address) {
    env.storage()
        .persistent()
        .extend_ttl(&DataKey::Vault(vault.clone()), TTL_THRESHOLD, TTL_EXTEND);
}

pub fn remove_vault(env: &Env, vault: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Vault(vault.clone()));
}

// Badges

pub fn get_badge(env: &Env, token_id: u64) -> Option<Badge> {
    env.storage().persistent().get(&DataKey::Badge(token_id))
}

pub fn set_badge(env: &Env, badge: &Badge) {
    let key = DataKey::Badge(badge.token_id);
    env.storage().persistent().set(&key, badge);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND);
}

pub fn get_user_badges(env: &Env, subscriber: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::UserBadges(subscriber.clone()))
        .unwrap_or(Vec::new(env))
}

pub fn set_user_badges(env: &Env, subscriber: &Address, badges: &Vec<u64>) {
    let key = DataKey::UserBadges(subscriber.clone());
    if badges.is_empty() {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, badges);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND);
}

pub fn get_live(env: &Env, vault: &Address, subscriber: &Address, tier_id: u32) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::Live(vault.clone(), subscriber.clone(), tier_id))
}

pub fn set_live(env: &Env, vault: &Address, subscriber: &Address, tier_id: u32, token_id: u64) {
    let key = DataKey::Live(vault.clone(), subscriber.clone(), tier_id);
    env.storage().persistent().set(&key, &token_id);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND);
}

pub fn remove_live(env: &Env, vault: &Address, subscriber: &Address, tier_id: u32) {
    env.storage()
        .persistent()
        .remove(&DataKey::Live(vault.clone(), subscriber.clone(), tier_id));
}
