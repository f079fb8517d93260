use bursar_core::constants::{MAXIMUM_DELAY_SECS, MINIMUM_DELAY_SECS};
use bursar_core::error::BursarError;
use bursar_core::event::Notification;
use bursar_core::types::Identity;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::StateDb;

/// Capability witness that an admin parameter change arrived through the
/// queued execution pipeline. Only the engine's execute path can construct
/// one, so `set_delay` and `set_pending_admin` are unreachable from outside
/// that pipeline.
pub struct SelfCall(pub(crate) ());

/// Admin identity, pending-admin designation, and the currently effective
/// delay. Exactly one admin exists at all times; the zero identity in
/// `pending_admin` means no designation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AdminState {
    pub admin: Identity,
    pub pending_admin: Identity,
    pub delay_secs: i64,
}

impl AdminState {
    pub fn pending_admin(&self) -> Option<Identity> {
        if self.pending_admin.is_zero() {
            None
        } else {
            Some(self.pending_admin)
        }
    }
}

fn check_delay_bounds(delay_secs: i64) -> Result<(), BursarError> {
    if !(MINIMUM_DELAY_SECS..=MAXIMUM_DELAY_SECS).contains(&delay_secs) {
        return Err(BursarError::DelayOutOfBounds {
            min_secs: MINIMUM_DELAY_SECS,
            max_secs: MAXIMUM_DELAY_SECS,
            got_secs: delay_secs,
        });
    }
    Ok(())
}

/// Load the admin state, or persist the initial one on first open. The
/// initial delay passes the same bounds check as any later change.
pub fn load_or_init(
    db: &StateDb,
    initial_admin: Identity,
    initial_delay_secs: i64,
) -> Result<AdminState, BursarError> {
    if let Some(state) = db.get_admin_state()? {
        return Ok(state);
    }
    check_delay_bounds(initial_delay_secs)?;
    let state = AdminState {
        admin: initial_admin,
        pending_admin: Identity::ZERO,
        delay_secs: initial_delay_secs,
    };
    db.put_admin_state(&state)?;
    info!(admin = %state.admin, delay_secs = state.delay_secs, "admin state initialized");
    Ok(state)
}

/// Load the admin state and verify `caller` is the current admin.
pub fn require_admin(db: &StateDb, caller: &Identity) -> Result<AdminState, BursarError> {
    let state = db
        .get_admin_state()?
        .ok_or_else(|| BursarError::Storage("admin state not initialized".to_string()))?;
    if *caller != state.admin {
        return Err(BursarError::NotAdmin);
    }
    Ok(state)
}

/// Replace the effective delay. Reachable only through the execute pipeline.
pub fn set_delay(db: &StateDb, _grant: SelfCall, new_delay_secs: i64) -> Result<(), BursarError> {
    check_delay_bounds(new_delay_secs)?;
    let mut state = db
        .get_admin_state()?
        .ok_or_else(|| BursarError::Storage("admin state not initialized".to_string()))?;
    state.delay_secs = new_delay_secs;
    db.put_admin_state(&state)?;
    db.append_event(&Notification::NewDelay {
        delay_secs: new_delay_secs,
    })?;
    info!(delay_secs = new_delay_secs, "delay replaced");
    Ok(())
}

/// Replace the pending admin. Any identity is accepted, including the zero
/// identity. Reachable only through the execute pipeline.
pub fn set_pending_admin(
    db: &StateDb,
    _grant: SelfCall,
    candidate: Identity,
) -> Result<(), BursarError> {
    let mut state = db
        .get_admin_state()?
        .ok_or_else(|| BursarError::Storage("admin state not initialized".to_string()))?;
    state.pending_admin = candidate;
    db.put_admin_state(&state)?;
    db.append_event(&Notification::NewPendingAdmin {
        pending_admin: candidate,
    })?;
    info!(pending_admin = %candidate, "pending admin designated");
    Ok(())
}

/// Claim the admin role. The caller must be the designated pending admin;
/// a designation takes effect only once the designee acts on it.
pub fn accept_admin(db: &StateDb, caller: &Identity) -> Result<(), BursarError> {
    let mut state = db
        .get_admin_state()?
        .ok_or_else(|| BursarError::Storage("admin state not initialized".to_string()))?;
    if state.pending_admin.is_zero() || *caller != state.pending_admin {
        return Err(BursarError::NotPendingAdmin);
    }
    state.admin = *caller;
    state.pending_admin = Identity::ZERO;
    db.put_admin_state(&state)?;
    db.append_event(&Notification::NewAdmin { admin: *caller })?;
    info!(admin = %caller, "admin role claimed");
    Ok(())
}
