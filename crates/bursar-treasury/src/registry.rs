use bursar_core::error::BursarError;
use bursar_core::types::{Identity, UnitId};

/// The external membership registry: tracks how many redeemable units are
/// outstanding and who owns each one, and retires a unit on redemption.
///
/// Implementations report failure with an error; any error aborts the
/// requesting operation. The registry's own state lives outside this
/// system's rollback boundary and belongs to the embedding transaction.
pub trait MembershipRegistry {
    /// Total outstanding membership units.
    fn total_supply(&self) -> Result<u64, BursarError>;

    /// Current owner of `unit`.
    fn owner_of(&self, unit: UnitId) -> Result<Identity, BursarError>;

    /// Retire `unit` permanently. Called while a redemption is in flight;
    /// a failed burn aborts the redemption.
    fn burn(&mut self, unit: UnitId) -> Result<(), BursarError>;
}
