use soroban_sdk::{contracttype, Address, String};

#[contracttype]
#[derive(Clone, Debug)]
pub struct CreatorRegisteredEvent {
    pub creator: Address,
    pub vault: Address,
    pub name: String,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct CreatorDeactivatedEvent {
    pub creator: Address,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PlatformFeeUpdatedEvent {
    pub old_fee_rate_bps: u32,
    pub new_fee_rate_bps: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TreasuryUpdatedEvent {
    pub old_treasury: Address,
    pub new_treasury: Address,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SupportedTokenEvent {
    pub asset: Address,
    pub label: String,
}
