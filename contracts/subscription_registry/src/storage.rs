use soroban_sdk::{contracttype, Address, Env, String, Vec};

// Constants
pub const DEFAULT_FEE_BPS: u32 = 250; // 2.5%
pub const MAX_FEE_BPS: u32 = 1_000; // 10%
pub const MAX_PAGE_SIZE: u32 = 100;

pub const TTL_THRESHOLD: u32 = 518_400; // ~30 days
pub const TTL_EXTEND: u32 = 2_592_000; // ~150 days

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreatorInfo {
    pub creator: Address,
    pub name: String,
    pub description: String,
    pub vault: Address,
    pub accepted_assets: Vec<Address>,
    /// Only field that changes after registration
    pub active: bool,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SupportedToken {
    pub asset: Address,
    pub label: String,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PlatformStats {
    pub total_creators: u32,
    pub active_creators: u32,
    /// Subscriptions ever started across all vaults
    pub total_subscriptions: u64,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Admin,
    Treasury,
    Badge,
    VaultWasmHash,
    FeeRate,
    Paused,
    Stats,
    SupportedTokens,     // Vec<Address>, registration order
    TokenLabel(Address), // asset -> label, present iff supported
    CreatorAt(u32),      // registration sequence (from 1) -> creator
    Creator(Address),    // creator -> CreatorInfo
}

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND);
}

// Policy

pub fn get_fee_rate(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::FeeRate)
        .unwrap_or(DEFAULT_FEE_BPS)
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn get_stats(env: &Env) -> PlatformStats {
    env.storage()
        .instance()
        .get(&DataKey::Stats)
        .unwrap_or_default()
}

pub fn set_stats(env: &Env, stats: &PlatformStats) {
    env.storage().instance().set(&DataKey::Stats, stats);
}

// Supported tokens

pub fn get_token_label(env: &Env, asset: &Address) -> Option<String> {
    env.storage()
        .instance()
        .get(&DataKey::TokenLabel(asset.clone()))
}

pub fn get_supported_assets(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::SupportedTokens)
        .unwrap_or(Vec::new(env))
}

pub fn add_supported_asset(env: &Env, asset: &Address, label: &String) {
    let mut assets = get_supported_assets(env);
    if !assets.contains(asset) {
        assets.push_back(asset.clone());
        env.storage()
            .instance()
            .set(&DataKey::SupportedTokens, &assets);
    }
    env.storage()
        .instance()
        .set(&DataKey::TokenLabel(asset.clone()), label);
}

pub fn remove_supported_asset(env: &Env, asset: &Address) {
    let mut assets = get_supported_assets(env);
    if let Some(index) = assets.first_index_of(asset) {
        assets.remove(index);
        env.storage()
            .instance()
            .set(&DataKey::SupportedTokens, &assets);
    }
    env.storage()
        .instance()
        .remove(&DataKey::TokenLabel(asset.clone()));
}

// Creators

pub fn get_creator(env: &Env, creator: &Address) -> Option<CreatorInfo> {
    env.storage()
        .persistent()
        .get(&DataKey::Creator(creator.clone()))
}

pub fn set_creator(env: &Env, info: &CreatorInfo) {
    let key = DataKey::Creator(info.creator.clone());
    env.storage().persistent().set(&key, info);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND);
}

pub fn get_creator_at(env: &Env, sequence: u32) -> Option<Address> {
    env.storage().persistent().get(&DataKey::CreatorAt(sequence))
}

pub fn set_creator_at(env: &Env, sequence: u32, creator: &Address) {
    let key = DataKey::CreatorAt(sequence);
    env.storage().persistent().set(&key, creator);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND);
}

/// Creators in registration order, skipping the first `start`
pub fn get_creators_page(env: &Env, start: u32, limit: u32) -> Vec<Address> {
    let total = get_stats(env).total_creators;
    let end = start.saturating_add(limit).min(total);

    let mut creators = Vec::new(env);
    for sequence in start.saturating_add(1)..=end {
        if let Some(creator) = get_creator_at(env, sequence) {
            creators.push_back(creator);
        }
    }
    creators
}
