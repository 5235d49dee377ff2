use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BadgeMintedEvent {
    pub token_id: u64,
    pub subscriber: Address,
    pub vault: Address,
    pub tier_id: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BadgeBurnedEvent {
    pub token_id: u64,
    pub subscriber: Address,
    pub vault: Address,
    pub tier_id: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultAuthorizedEvent {
    pub vault: Address,
    pub authorized: bool,
}
