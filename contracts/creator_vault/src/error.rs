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
    // AUTHORIZATION ERRORS (10-15)
    // ============================================
    /// Registry has deactivated this creator
    CreatorInactive = 11,

    // ============================================
    // TIER ERRORS (20-29)
    // ============================================
    /// Tier not found
    TierNotFound = 20,
    /// Tier is deactivated
    TierInactive = 21,
    /// Tier reached its subscriber cap
    TierFull = 22,
    /// Price must be positive
    InvalidPrice = 23,
    /// Empty or malformed argument
    InvalidInput = 24,

    // ============================================
    // SUBSCRIPTION ERRORS (30-39)
    // ============================================
    /// Caller already holds an active subscription on this tier
    AlreadySubscribed = 30,
    /// No active subscription for (subscriber, tier)
    SubscriptionNotFound = 31,
    /// Next billing cycle has not started
    PaymentNotDue = 32,
    /// Payment window closed; the subscription has lapsed
    GracePeriodExpired = 33,
    /// Subscription is still inside its payment window
    SubscriptionNotLapsed = 34,

    // ============================================
    // PAYMENT ERRORS (40-49)
    // ============================================
    /// Asset not accepted by this creator or no longer supported
    UnsupportedAsset = 40,
    /// Asset transfer was refused
    PaymentFailed = 41,
    /// Nothing to withdraw
    NoFundsAvailable = 42,
    /// Arithmetic overflow
    Overflow = 43,

    // ============================================
    // OPERATIONAL ERRORS (60-69)
    // ============================================
    /// Platform is paused
    PlatformPaused = 60,
    /// Nested call into a guarded operation
    Reentrancy = 61,
}
