use bursar_core::action::Action;
use bursar_core::constants::GRACE_PERIOD_SECS;
use bursar_core::types::Timestamp;
use bursar_state::StateDb;
use chrono::DateTime;

/// Where an action sits relative to its execution window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionPhase {
    /// Not yet matured; executable in `ready_in_secs`.
    Waiting { ready_in_secs: i64 },
    /// Inside the execution window; goes stale in `stale_in_secs`.
    Ready { stale_in_secs: i64 },
    /// Grace period lapsed `since_secs` ago; can never run.
    Stale { since_secs: i64 },
}

/// Query helpers over queued actions.
pub struct TimelockQuery<'a> {
    db: &'a StateDb,
}

impl<'a> TimelockQuery<'a> {
    pub fn new(db: &'a StateDb) -> Self {
        Self { db }
    }

    /// Whether the action's fingerprint is currently queued.
    pub fn is_queued(&self, action: &Action) -> bool {
        self.db.is_queued(&action.fingerprint())
    }

    /// Classify the action against its execution window.
    pub fn phase(&self, action: &Action, now: Timestamp) -> ActionPhase {
        let deadline = action.eta + GRACE_PERIOD_SECS;
        if now < action.eta {
            ActionPhase::Waiting {
                ready_in_secs: action.eta - now,
            }
        } else if now <= deadline {
            ActionPhase::Ready {
                stale_in_secs: deadline - now,
            }
        } else {
            ActionPhase::Stale {
                since_secs: now - deadline,
            }
        }
    }

    /// Human-readable one-line summary of an action's state.
    pub fn describe(&self, action: &Action, now: Timestamp) -> String {
        let phase_str = match self.phase(action, now) {
            ActionPhase::Waiting { ready_in_secs } => {
                format!(
                    "waiting — executable at {} (in {} hours)",
                    fmt_utc(action.eta),
                    ready_in_secs / 3600
                )
            }
            ActionPhase::Ready { stale_in_secs } => {
                format!("ready — stale in {} hours", stale_in_secs / 3600)
            }
            ActionPhase::Stale { since_secs } => {
                format!("stale — window closed {} hours ago", since_secs / 3600)
            }
        };

        let queued_str = if self.is_queued(action) { "queued" } else { "not queued" };

        format!(
            "Action {} | target {} | value {} | {} | {}",
            &action.fingerprint().to_hex()[..16],
            action.target,
            action.value,
            queued_str,
            phase_str
        )
    }
}

fn fmt_utc(ts: Timestamp) -> String {
    match DateTime::from_timestamp(ts, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("unix {}", ts),
    }
}
