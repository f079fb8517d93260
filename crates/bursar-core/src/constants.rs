/// ─── Bursar Protocol Constants ──────────────────────────────────────────────
///
/// Every administrative action waits at least the configured delay and must
/// be exercised before its grace period lapses. Redemption rates are
/// expressed in basis points of the non-allocated pool.

// ── Timelock window ──────────────────────────────────────────────────────────

/// Smallest admissible delay between queueing and execution: 2 days.
pub const MINIMUM_DELAY_SECS: i64 = 2 * 24 * 3600;

/// Largest admissible delay: 30 days.
pub const MAXIMUM_DELAY_SECS: i64 = 30 * 24 * 3600;

/// Window after eta during which execution remains valid: 14 days.
/// Beyond it the queued action is stale and can never run.
pub const GRACE_PERIOD_SECS: i64 = 14 * 24 * 3600;

// ── Redemption ───────────────────────────────────────────────────────────────

/// Full pass-through redemption rate (100% in basis points).
pub const MAX_REDEMPTION_RATE_BPS: u64 = 10_000;

// ── Call encoding ────────────────────────────────────────────────────────────

/// Length of the selector prefix derived from a non-empty signature string.
pub const SELECTOR_LEN: usize = 4;
