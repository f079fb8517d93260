use thiserror::Error;

#[derive(Debug, Error)]
pub enum BursarError {
    // ── Authorization ────────────────────────────────────────────────────────
    #[error("caller is not the admin")]
    NotAdmin,

    #[error("caller is not the pending admin")]
    NotPendingAdmin,

    #[error("caller does not own {unit}")]
    NotUnitOwner { unit: u64 },

    // ── Bounds ───────────────────────────────────────────────────────────────
    #[error("delay out of bounds: need {min_secs}..={max_secs} seconds, got {got_secs}")]
    DelayOutOfBounds {
        min_secs: i64,
        max_secs: i64,
        got_secs: i64,
    },

    // ── Timelock preconditions ───────────────────────────────────────────────
    #[error("eta must satisfy the delay: earliest {earliest}, got {got}")]
    EtaBeforeDelay { earliest: i64, got: i64 },

    #[error("action not queued: {0}")]
    NotQueued(String),

    #[error("action not yet matured (eta {eta})")]
    NotMatured { eta: i64 },

    #[error("action is stale (grace period ended at {deadline})")]
    ActionStale { deadline: i64 },

    #[error("self-targeted payload did not decode to an admin operation: {0}")]
    InvalidSelfCall(String),

    // ── External calls ───────────────────────────────────────────────────────
    #[error("invocation of {target} reported failure")]
    InvokeFailed { target: String },

    #[error("membership registry failed to burn {unit}")]
    BurnFailed { unit: u64 },

    // ── Treasury arithmetic ──────────────────────────────────────────────────
    #[error("no outstanding membership units; nothing to redeem against")]
    NoOutstandingUnits,

    #[error("allocated value {allocated} exceeds held value {held}")]
    AllocatedExceedsHoldings { allocated: u128, held: u128 },

    #[error("insufficient holdings: need {need}, have {have}")]
    InsufficientHoldings { need: u128, have: u128 },

    #[error("arithmetic result exceeds the representable value range")]
    ValueOverflow,

    // ── Serialization / storage ──────────────────────────────────────────────
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage error: {0}")]
    Storage(String),
}
