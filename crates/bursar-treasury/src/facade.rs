use bursar_core::error::BursarError;
use bursar_core::invoke::Invoker;
use bursar_core::types::{Balance, Identity, RateBps, UnitId};
use bursar_state::{authority, StateDb};
use std::sync::Arc;
use tracing::info;

use crate::aggregator::allocated_treasury;
use crate::proposals::ProposalSource;
use crate::redemption::redemption_curve;
use crate::registry::MembershipRegistry;

/// Treasury facade over the shared state database: held value, deposits,
/// the redemption rate, and unit redemption.
pub struct Treasury {
    pub db: Arc<StateDb>,
}

impl Treasury {
    pub fn new(db: Arc<StateDb>) -> Self {
        Self { db }
    }

    // ── Held value ───────────────────────────────────────────────────────────

    /// Total native value currently held.
    pub fn total_treasury(&self) -> Result<Balance, BursarError> {
        self.db.holdings()
    }

    /// Accept unsolicited incoming value. No checks, no notifications.
    /// Returns the new holdings total.
    pub fn deposit(&self, amount: Balance) -> Result<Balance, BursarError> {
        let holdings = self.db.holdings()?.saturating_add(amount);
        self.db.put_holdings(holdings)?;
        Ok(holdings)
    }

    // ── Redemption config ────────────────────────────────────────────────────

    pub fn redemption_rate(&self) -> Result<RateBps, BursarError> {
        self.db.redemption_rate()
    }

    /// Overwrite the redemption rate. Admin-gated; the new rate is stored
    /// as given, without an upper-bound check. A rate above 10000 basis
    /// points makes redemption fail until corrected.
    pub fn set_redemption_rate(
        &self,
        caller: &Identity,
        new_rate_bps: RateBps,
    ) -> Result<(), BursarError> {
        authority::require_admin(&self.db, caller)?;
        self.db.put_redemption_rate(new_rate_bps)?;
        info!(rate_bps = new_rate_bps, "redemption rate replaced");
        Ok(())
    }

    // ── Redemption accounting ────────────────────────────────────────────────

    /// Value earmarked by still-live proposals.
    pub fn allocated_treasury(
        &self,
        source: &dyn ProposalSource,
    ) -> Result<Balance, BursarError> {
        allocated_treasury(source)
    }

    /// Value claimable by surrendering one membership unit right now: the
    /// rate curve applied to the non-allocated pool and the outstanding
    /// supply. A per-call snapshot of the aggregate rate, identical for
    /// every unit redeemed in the same call.
    pub fn calculate_redemption(
        &self,
        registry: &dyn MembershipRegistry,
        source: &dyn ProposalSource,
    ) -> Result<Balance, BursarError> {
        let held = self.db.holdings()?;
        let allocated = allocated_treasury(source)?;
        let non_allocated = held
            .checked_sub(allocated)
            .ok_or(BursarError::AllocatedExceedsHoldings {
                allocated,
                held,
            })?;
        let supply = registry.total_supply()?;
        redemption_curve(self.db.redemption_rate()?, supply, non_allocated)
    }

    /// Redeem one membership unit for native value: verify ownership,
    /// price the unit, burn it, and pay the caller through the invoke
    /// primitive. Returns the amount paid out.
    pub fn redeem_for_native(
        &self,
        registry: &mut dyn MembershipRegistry,
        source: &dyn ProposalSource,
        invoker: &mut dyn Invoker,
        caller: &Identity,
        unit: UnitId,
    ) -> Result<Balance, BursarError> {
        let owner = registry.owner_of(unit)?;
        if owner != *caller {
            return Err(BursarError::NotUnitOwner { unit: unit.0 });
        }

        // Priced before the burn, so the surrendered unit still counts
        // toward the supply it is priced against.
        let value = self.calculate_redemption(registry, source)?;

        let held = self.db.holdings()?;
        if value > held {
            return Err(BursarError::InsufficientHoldings {
                need: value,
                have: held,
            });
        }

        registry.burn(unit)?;

        self.db.put_holdings(held - value)?;
        let outcome = invoker.invoke(caller, value, &[]);
        if !outcome.success {
            self.db.put_holdings(held)?;
            return Err(BursarError::InvokeFailed {
                target: caller.to_string(),
            });
        }

        info!(unit = %unit, holder = %caller, value, "unit redeemed");
        Ok(value)
    }

    /// Flush pending writes to disk.
    pub fn flush(&self) -> Result<(), BursarError> {
        self.db.flush()
    }
}
