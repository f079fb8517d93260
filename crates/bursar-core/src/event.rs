use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::types::{Balance, Fingerprint, Identity, Timestamp};

/// Append-only audit notification. Emitted on every observable state
/// transition; never read back by the core itself.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Notification {
    NewAdmin {
        admin: Identity,
    },
    NewPendingAdmin {
        pending_admin: Identity,
    },
    NewDelay {
        delay_secs: i64,
    },
    QueueTransaction {
        fingerprint: Fingerprint,
        target: Identity,
        value: Balance,
        signature: String,
        data: Vec<u8>,
        eta: Timestamp,
    },
    CancelTransaction {
        fingerprint: Fingerprint,
        target: Identity,
        value: Balance,
        signature: String,
        data: Vec<u8>,
        eta: Timestamp,
    },
    ExecuteTransaction {
        fingerprint: Fingerprint,
        target: Identity,
        value: Balance,
        signature: String,
        data: Vec<u8>,
        eta: Timestamp,
    },
}

impl Notification {
    pub fn queued(action: &Action, fingerprint: Fingerprint) -> Self {
        Notification::QueueTransaction {
            fingerprint,
            target: action.target,
            value: action.value,
            signature: action.signature.clone(),
            data: action.data.clone(),
            eta: action.eta,
        }
    }

    pub fn cancelled(action: &Action, fingerprint: Fingerprint) -> Self {
        Notification::CancelTransaction {
            fingerprint,
            target: action.target,
            value: action.value,
            signature: action.signature.clone(),
            data: action.data.clone(),
            eta: action.eta,
        }
    }

    pub fn executed(action: &Action, fingerprint: Fingerprint) -> Self {
        Notification::ExecuteTransaction {
            fingerprint,
            target: action.target,
            value: action.value,
            signature: action.signature.clone(),
            data: action.data.clone(),
            eta: action.eta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Identity;

    #[test]
    fn notifications_serialize_for_external_consumers() {
        let action = Action::invoke(
            Identity::from_bytes([3u8; 32]),
            10,
            "pay()",
            vec![0xAB],
            777,
        );
        let note = Notification::queued(&action, action.fingerprint());
        let json = serde_json::to_string(&note).unwrap();
        let back: Notification = serde_json::from_str(&json).unwrap();
        assert_eq!(back, note);
    }
}
