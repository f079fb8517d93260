use bursar_core::action::{Action, AdminOp};
use bursar_core::constants::GRACE_PERIOD_SECS;
use bursar_core::error::BursarError;
use bursar_core::event::Notification;
use bursar_core::invoke::Invoker;
use bursar_core::types::{Fingerprint, Identity, Timestamp};
use std::sync::Arc;
use tracing::{info, warn};

use crate::authority::{self, AdminState, SelfCall};
use crate::db::StateDb;

// ── TimelockEngine ───────────────────────────────────────────────────────────

/// The timelock state machine.
///
/// Every administrative call moves through Unqueued → Queued →
/// {Executed | Cancelled}, correlated purely by fingerprint. The execute
/// path clears the queued flag and debits any forwarded value before the
/// external invocation runs, and restores both if the invocation reports
/// failure.
pub struct TimelockEngine {
    pub db: Arc<StateDb>,
    identity: Identity,
}

impl TimelockEngine {
    /// Open the engine over `db`. On the first open this persists the
    /// initial admin and delay; later opens load the stored state and the
    /// `initial_*` parameters are ignored.
    pub fn open(
        db: Arc<StateDb>,
        identity: Identity,
        initial_admin: Identity,
        initial_delay_secs: i64,
    ) -> Result<Self, BursarError> {
        authority::load_or_init(&db, initial_admin, initial_delay_secs)?;
        Ok(Self { db, identity })
    }

    /// The system's own identity. Actions targeting it dispatch to the
    /// admin operations instead of the invoke primitive.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn admin_state(&self) -> Result<AdminState, BursarError> {
        self.db
            .get_admin_state()?
            .ok_or_else(|| BursarError::Storage("admin state not initialized".to_string()))
    }

    // ── Queue ────────────────────────────────────────────────────────────────

    /// Queue an action. The eta must lie at least the currently effective
    /// delay in the future; the delay in force at submission time governs,
    /// not the one at execution time.
    pub fn queue(
        &self,
        action: &Action,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<Fingerprint, BursarError> {
        let state = authority::require_admin(&self.db, caller)?;
        let earliest = now + state.delay_secs;
        if action.eta < earliest {
            return Err(BursarError::EtaBeforeDelay {
                earliest,
                got: action.eta,
            });
        }

        let fingerprint = action.fingerprint();
        self.db.set_queued(&fingerprint)?;
        self.db.append_event(&Notification::queued(action, fingerprint))?;
        info!(fingerprint = %fingerprint, target = %action.target, eta = action.eta, "action queued");
        Ok(fingerprint)
    }

    // ── Cancel ───────────────────────────────────────────────────────────────

    /// Cancel an action. Clears the queued flag unconditionally: cancelling
    /// an action that was never queued is a silent no-op that still leaves
    /// an audit record.
    pub fn cancel(&self, action: &Action, caller: &Identity) -> Result<Fingerprint, BursarError> {
        authority::require_admin(&self.db, caller)?;

        let fingerprint = action.fingerprint();
        self.db.clear_queued(&fingerprint)?;
        self.db.append_event(&Notification::cancelled(action, fingerprint))?;
        info!(fingerprint = %fingerprint, "action cancelled");
        Ok(fingerprint)
    }

    // ── Execute ──────────────────────────────────────────────────────────────

    /// Execute a queued, matured, non-stale action. Returns the raw return
    /// payload of the invocation.
    pub fn execute(
        &self,
        invoker: &mut dyn Invoker,
        action: &Action,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<Vec<u8>, BursarError> {
        authority::require_admin(&self.db, caller)?;

        let fingerprint = action.fingerprint();
        if !self.db.is_queued(&fingerprint) {
            return Err(BursarError::NotQueued(fingerprint.to_hex()));
        }
        if now < action.eta {
            return Err(BursarError::NotMatured { eta: action.eta });
        }
        let deadline = action.eta + GRACE_PERIOD_SECS;
        if now > deadline {
            return Err(BursarError::ActionStale { deadline });
        }

        // Value forwarded to an external target leaves the treasury; a
        // self-targeted call keeps it in place.
        let is_self_call = action.target == self.identity;
        let held = self.db.holdings()?;
        let forwarded = if is_self_call { 0 } else { action.value };
        if forwarded > held {
            return Err(BursarError::InsufficientHoldings {
                need: forwarded,
                have: held,
            });
        }

        // The queued flag falls before the invocation runs, so the same
        // entry can never execute twice even if the target reenters.
        self.db.clear_queued(&fingerprint)?;
        if forwarded > 0 {
            self.db.put_holdings(held - forwarded)?;
        }

        let result = if is_self_call {
            self.dispatch_self(&action.data)
        } else {
            let payload = action.call_payload();
            let outcome = invoker.invoke(&action.target, forwarded, &payload);
            if outcome.success {
                Ok(outcome.return_data)
            } else {
                Err(BursarError::InvokeFailed {
                    target: action.target.to_string(),
                })
            }
        };

        match result {
            Ok(return_data) => {
                self.db.append_event(&Notification::executed(action, fingerprint))?;
                info!(fingerprint = %fingerprint, target = %action.target, "action executed");
                Ok(return_data)
            }
            Err(e) => {
                // Compensating rollback: the flag and the debit come back.
                self.db.set_queued(&fingerprint)?;
                if forwarded > 0 {
                    self.db.put_holdings(held)?;
                }
                warn!(fingerprint = %fingerprint, error = %e, "execution failed; state restored");
                Err(e)
            }
        }
    }

    /// Apply a self-targeted payload to the admin authority. The `SelfCall`
    /// witness minted here is what makes these operations reachable only
    /// from the execute pipeline.
    fn dispatch_self(&self, payload: &[u8]) -> Result<Vec<u8>, BursarError> {
        match AdminOp::decode(payload)? {
            AdminOp::SetDelay { delay_secs } => {
                authority::set_delay(&self.db, SelfCall(()), delay_secs)?;
            }
            AdminOp::SetPendingAdmin { candidate } => {
                authority::set_pending_admin(&self.db, SelfCall(()), candidate)?;
            }
        }
        Ok(Vec::new())
    }

    // ── Admin claim ──────────────────────────────────────────────────────────

    /// Claim the admin role; the caller must be the designated pending
    /// admin.
    pub fn accept_admin(&self, caller: &Identity) -> Result<(), BursarError> {
        authority::accept_admin(&self.db, caller)
    }

    /// Flush pending writes to disk.
    pub fn flush(&self) -> Result<(), BursarError> {
        self.db.flush()
    }
}
