use serde::{Deserialize, Serialize};

use crate::constants::SELECTOR_LEN;
use crate::error::BursarError;
use crate::types::{Balance, Fingerprint, Identity, Timestamp};

// ── Action ───────────────────────────────────────────────────────────────────

/// A proposed administrative call.
///
/// Actions are never stored as structured records; only their fingerprint is
/// persisted. The fingerprint is BLAKE3 of the canonical bincode
/// serialization of all five fields, so any field difference produces a
/// different identity.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Action {
    /// The identity this call is directed at. The system's own identity
    /// routes to the internal admin operations.
    pub target: Identity,

    /// Native value forwarded with the call.
    pub value: Balance,

    /// Optional textual function signature. Empty means `data` is the
    /// complete call payload.
    pub signature: String,

    /// Opaque byte payload.
    pub data: Vec<u8>,

    /// Earliest admissible execution time (Unix seconds, UTC).
    pub eta: Timestamp,
}

impl Action {
    /// Build an action directed at an external target.
    pub fn invoke(
        target: Identity,
        value: Balance,
        signature: impl Into<String>,
        data: Vec<u8>,
        eta: Timestamp,
    ) -> Self {
        Self {
            target,
            value,
            signature: signature.into(),
            data,
            eta,
        }
    }

    /// Build a self-targeted action that replaces the effective delay once
    /// executed. `system` is the timelock engine's own identity.
    pub fn set_delay(system: Identity, new_delay_secs: i64, eta: Timestamp) -> Self {
        Self {
            target: system,
            value: 0,
            signature: String::new(),
            data: AdminOp::SetDelay {
                delay_secs: new_delay_secs,
            }
            .encode(),
            eta,
        }
    }

    /// Build a self-targeted action that designates a pending admin once
    /// executed.
    pub fn set_pending_admin(system: Identity, candidate: Identity, eta: Timestamp) -> Self {
        Self {
            target: system,
            value: 0,
            signature: String::new(),
            data: AdminOp::SetPendingAdmin { candidate }.encode(),
            eta,
        }
    }

    /// Canonical serialized form covered by the fingerprint.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        bincode::serialize(self).expect("action serialization is infallible")
    }

    /// Deterministic content address over (target, value, signature, data, eta).
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::from_bytes(*blake3::hash(&self.canonical_bytes()).as_bytes())
    }

    /// The byte payload handed to the invoke primitive: raw `data` when the
    /// signature is empty, otherwise the 4-byte selector of the signature
    /// followed by `data`.
    pub fn call_payload(&self) -> Vec<u8> {
        if self.signature.is_empty() {
            return self.data.clone();
        }
        let mut payload = Vec::with_capacity(SELECTOR_LEN + self.data.len());
        payload.extend_from_slice(&selector(&self.signature));
        payload.extend_from_slice(&self.data);
        payload
    }
}

/// 4-byte call selector: the leading bytes of BLAKE3 over the signature
/// string.
pub fn selector(signature: &str) -> [u8; SELECTOR_LEN] {
    let digest = blake3::hash(signature.as_bytes());
    let mut sel = [0u8; SELECTOR_LEN];
    sel.copy_from_slice(&digest.as_bytes()[..SELECTOR_LEN]);
    sel
}

// ── AdminOp ──────────────────────────────────────────────────────────────────

/// Operations the system performs on itself. Only reachable by executing a
/// queued action whose target is the system's own identity, so every
/// parameter change waits out the same delay window it configures.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AdminOp {
    /// Replace the effective delay, bounds-checked on apply.
    SetDelay { delay_secs: i64 },
    /// Replace the pending admin. Any identity is accepted, including the
    /// zero identity (clears the designation).
    SetPendingAdmin { candidate: Identity },
}

impl AdminOp {
    /// Canonical payload bytes for a self-targeted action.
    pub fn encode(&self) -> Vec<u8> {
        bincode::serialize(self).expect("admin op serialization is infallible")
    }

    /// Decode a self-targeted action payload.
    pub fn decode(payload: &[u8]) -> Result<Self, BursarError> {
        bincode::deserialize(payload).map_err(|e| BursarError::InvalidSelfCall(e.to_string()))
    }
}
