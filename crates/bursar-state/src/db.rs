use bursar_core::error::BursarError;
use bursar_core::event::Notification;
use bursar_core::types::{Balance, Fingerprint};
use std::path::Path;

use crate::authority::AdminState;

const META_ADMIN_STATE: &str = "admin_state";
const META_REDEMPTION_RATE: &str = "redemption_rate_bps";
const META_HOLDINGS: &str = "holdings";

/// Persistent state database backed by sled (pure-Rust, no C dependencies).
///
/// Named trees (analogous to column families):
///   queued  — fingerprint bytes → [] (membership set of pending actions)
///   meta    — utf8 key bytes    → bincode value
///   events  — u64 BE sequence   → bincode(Notification), append-only
pub struct StateDb {
    _db: sled::Db,
    queued: sled::Tree,
    meta: sled::Tree,
    events: sled::Tree,
}

impl StateDb {
    /// Open or create the state database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BursarError> {
        let db = sled::open(path).map_err(|e| BursarError::Storage(e.to_string()))?;
        let queued = db.open_tree("queued").map_err(|e| BursarError::Storage(e.to_string()))?;
        let meta   = db.open_tree("meta").map_err(|e| BursarError::Storage(e.to_string()))?;
        let events = db.open_tree("events").map_err(|e| BursarError::Storage(e.to_string()))?;
        Ok(Self { _db: db, queued, meta, events })
    }

    // ── Queued-action registry ───────────────────────────────────────────────

    /// Whether the fingerprint is currently queued. Absent entries read as
    /// not queued; the registry does not distinguish "never queued" from
    /// "already executed".
    pub fn is_queued(&self, fingerprint: &Fingerprint) -> bool {
        self.queued.contains_key(fingerprint.as_bytes()).unwrap_or(false)
    }

    pub fn set_queued(&self, fingerprint: &Fingerprint) -> Result<(), BursarError> {
        self.queued
            .insert(fingerprint.as_bytes(), b"".as_ref())
            .map_err(|e| BursarError::Storage(e.to_string()))?;
        Ok(())
    }

    pub fn clear_queued(&self, fingerprint: &Fingerprint) -> Result<(), BursarError> {
        self.queued
            .remove(fingerprint.as_bytes())
            .map_err(|e| BursarError::Storage(e.to_string()))?;
        Ok(())
    }

    // ── Admin state ──────────────────────────────────────────────────────────

    pub fn get_admin_state(&self) -> Result<Option<AdminState>, BursarError> {
        match self
            .meta
            .get(META_ADMIN_STATE.as_bytes())
            .map_err(|e| BursarError::Storage(e.to_string()))?
        {
            Some(bytes) => {
                let state = bincode::deserialize(&bytes)
                    .map_err(|e| BursarError::Serialization(e.to_string()))?;
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    pub fn put_admin_state(&self, state: &AdminState) -> Result<(), BursarError> {
        let bytes =
            bincode::serialize(state).map_err(|e| BursarError::Serialization(e.to_string()))?;
        self.meta
            .insert(META_ADMIN_STATE.as_bytes(), bytes)
            .map_err(|e| BursarError::Storage(e.to_string()))?;
        Ok(())
    }

    // ── Redemption config ────────────────────────────────────────────────────

    /// Current redemption rate in basis points. Zero until first set.
    pub fn redemption_rate(&self) -> Result<u64, BursarError> {
        match self
            .meta
            .get(META_REDEMPTION_RATE.as_bytes())
            .map_err(|e| BursarError::Storage(e.to_string()))?
        {
            Some(bytes) => bincode::deserialize(&bytes)
                .map_err(|e| BursarError::Serialization(e.to_string())),
            None => Ok(0),
        }
    }

    pub fn put_redemption_rate(&self, rate_bps: u64) -> Result<(), BursarError> {
        let bytes =
            bincode::serialize(&rate_bps).map_err(|e| BursarError::Serialization(e.to_string()))?;
        self.meta
            .insert(META_REDEMPTION_RATE.as_bytes(), bytes)
            .map_err(|e| BursarError::Storage(e.to_string()))?;
        Ok(())
    }

    // ── Held value ───────────────────────────────────────────────────────────

    /// Total native value currently held. Zero until the first deposit.
    pub fn holdings(&self) -> Result<Balance, BursarError> {
        match self
            .meta
            .get(META_HOLDINGS.as_bytes())
            .map_err(|e| BursarError::Storage(e.to_string()))?
        {
            Some(bytes) => bincode::deserialize(&bytes)
                .map_err(|e| BursarError::Serialization(e.to_string())),
            None => Ok(0),
        }
    }

    pub fn put_holdings(&self, holdings: Balance) -> Result<(), BursarError> {
        let bytes =
            bincode::serialize(&holdings).map_err(|e| BursarError::Serialization(e.to_string()))?;
        self.meta
            .insert(META_HOLDINGS.as_bytes(), bytes)
            .map_err(|e| BursarError::Storage(e.to_string()))?;
        Ok(())
    }

    // ── Audit log ────────────────────────────────────────────────────────────

    /// Append a notification to the audit log. Returns its sequence number.
    pub fn append_event(&self, note: &Notification) -> Result<u64, BursarError> {
        let seq = match self
            .events
            .last()
            .map_err(|e| BursarError::Storage(e.to_string()))?
        {
            Some((key, _)) => {
                let mut arr = [0u8; 8];
                arr.copy_from_slice(&key);
                u64::from_be_bytes(arr) + 1
            }
            None => 0,
        };
        let bytes =
            bincode::serialize(note).map_err(|e| BursarError::Serialization(e.to_string()))?;
        self.events
            .insert(seq.to_be_bytes(), bytes)
            .map_err(|e| BursarError::Storage(e.to_string()))?;
        Ok(seq)
    }

    /// Read audit events with sequence numbers >= `from_seq`, in order.
    pub fn events_after(&self, from_seq: u64) -> Result<Vec<(u64, Notification)>, BursarError> {
        let mut out = Vec::new();
        for item in self.events.range(from_seq.to_be_bytes()..) {
            let (key, value) = item.map_err(|e| BursarError::Storage(e.to_string()))?;
            let mut arr = [0u8; 8];
            arr.copy_from_slice(&key);
            let note = bincode::deserialize(&value)
                .map_err(|e| BursarError::Serialization(e.to_string()))?;
            out.push((u64::from_be_bytes(arr), note));
        }
        Ok(out)
    }

    /// Flush all pending writes to disk.
    pub fn flush(&self) -> Result<(), BursarError> {
        self._db.flush().map_err(|e| BursarError::Storage(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bursar_core::action::Action;
    use bursar_core::types::Identity;

    fn temp_db(name: &str) -> StateDb {
        let dir = std::env::temp_dir().join(format!("bursar_db_test_{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        StateDb::open(&dir).expect("open temp db")
    }

    #[test]
    fn queued_flag_lifecycle() {
        let db = temp_db("queued");
        let fp = Fingerprint::from_bytes([5u8; 32]);
        assert!(!db.is_queued(&fp));
        db.set_queued(&fp).unwrap();
        assert!(db.is_queued(&fp));
        db.clear_queued(&fp).unwrap();
        assert!(!db.is_queued(&fp));
        // Clearing an absent entry is a no-op.
        db.clear_queued(&fp).unwrap();
        assert!(!db.is_queued(&fp));
    }

    #[test]
    fn holdings_default_zero_and_round_trip() {
        let db = temp_db("holdings");
        assert_eq!(db.holdings().unwrap(), 0);
        db.put_holdings(12_345).unwrap();
        assert_eq!(db.holdings().unwrap(), 12_345);
    }

    #[test]
    fn event_sequences_are_gap_free() {
        let db = temp_db("events");
        let action = Action::invoke(Identity::from_bytes([1u8; 32]), 0, "", vec![], 50);
        let fp = action.fingerprint();
        for _ in 0..3 {
            db.append_event(&Notification::queued(&action, fp)).unwrap();
        }
        let events = db.events_after(0).unwrap();
        let seqs: Vec<u64> = events.iter().map(|(s, _)| *s).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
        assert_eq!(db.events_after(2).unwrap().len(), 1);
    }
}
