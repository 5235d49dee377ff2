use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // CREATOR ERRORS (20-29)
    // ============================================
    /// Creator already has a vault
    AlreadyRegistered = 20,
    /// No creator registered under this address
    CreatorNotFound = 21,
    /// Creator already deactivated
    CreatorInactive = 22,

    // ============================================
    // INPUT ERRORS (30-39)
    // ============================================
    /// Empty or malformed argument
    InvalidInput = 30,
    /// Asset not in the supported set
    UnsupportedAsset = 31,

    // ============================================
    // POLICY ERRORS (40-49)
    // ============================================
    /// Fee rate above MAX_FEE_BPS
    FeeTooHigh = 40,

    // ============================================
    // OPERATIONAL ERRORS (50-59)
    // ============================================
    /// Platform is paused
    PlatformPaused = 50,
    /// Arithmetic overflow
    Overflow = 51,
}
