use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Initialization errors
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // Authorization errors
    /// Caller is not an authorized vault, or not the vault that minted the badge
    Unauthorized = 10,

    // Soulbound
    /// Badges can never change hands
    NonTransferable = 20,

    // Badge errors
    BadgeNotFound = 30,
    /// A live badge already exists for this (vault, subscriber, tier)
    AlreadyMinted = 31,

    Overflow = 40,
}
