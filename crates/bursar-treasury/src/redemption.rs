use bursar_core::constants::MAX_REDEMPTION_RATE_BPS;
use bursar_core::error::BursarError;
use bursar_core::types::{Balance, RateBps};
use primitive_types::U256;

/// Full-precision `a * b / divisor` with a 256-bit intermediate. The
/// product of two u128 values always fits in 256 bits, so only the final
/// quotient can overflow the return type.
pub fn mul_div(a: Balance, b: Balance, divisor: Balance) -> Result<Balance, BursarError> {
    assert!(divisor != 0, "divisor must be nonzero");
    let quotient = U256::from(a) * U256::from(b) / U256::from(divisor);
    if quotient > U256::from(u128::MAX) {
        return Err(BursarError::ValueOverflow);
    }
    Ok(quotient.as_u128())
}

/// Value claimable per redeemed unit.
///
/// Two-term curve over the non-allocated pool: a linear component scaled
/// by `rate / 10000`, plus a supply-dependent correction that vanishes as
/// supply grows. Degenerates to zero at rate 0 and to the plain pro-rata
/// base at rate 10000.
pub fn redemption_curve(
    rate_bps: RateBps,
    supply: u64,
    pool: Balance,
) -> Result<Balance, BursarError> {
    if rate_bps == 0 {
        return Ok(0);
    }
    if supply == 0 {
        return Err(BursarError::NoOutstandingUnits);
    }

    let base = pool / supply as Balance;
    if rate_bps == MAX_REDEMPTION_RATE_BPS {
        return Ok(base);
    }

    // Rates above the maximum underflow the residual term; such a
    // configuration is unredeemable until corrected.
    let residual = MAX_REDEMPTION_RATE_BPS
        .checked_sub(rate_bps)
        .ok_or(BursarError::ValueOverflow)?;
    let scaled_rate = rate_bps as Balance + residual as Balance / supply as Balance;
    mul_div(base, scaled_rate, MAX_REDEMPTION_RATE_BPS as Balance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_claims_nothing() {
        assert_eq!(redemption_curve(0, 100, 1_000_000).unwrap(), 0);
        assert_eq!(redemption_curve(0, 0, 1_000_000).unwrap(), 0);
    }

    #[test]
    fn zero_supply_is_a_defined_error() {
        let err = redemption_curve(5_000, 0, 1_000_000).unwrap_err();
        assert!(matches!(err, BursarError::NoOutstandingUnits));
    }

    #[test]
    fn max_rate_is_plain_pro_rata() {
        assert_eq!(
            redemption_curve(MAX_REDEMPTION_RATE_BPS, 100, 1_000_000).unwrap(),
            10_000
        );
        // Integer division semantics on the base.
        assert_eq!(redemption_curve(MAX_REDEMPTION_RATE_BPS, 3, 10).unwrap(), 3);
    }

    #[test]
    fn mid_rate_worked_example() {
        // supply 100, pool 1,000,000: base 10,000; correction 5000/100 = 50;
        // 10,000 * (5000 + 50) / 10000 = 5,050.
        assert_eq!(redemption_curve(5_000, 100, 1_000_000).unwrap(), 5_050);
    }

    #[test]
    fn monotonic_in_rate() {
        let mut last = 0;
        for rate in (0..=MAX_REDEMPTION_RATE_BPS).step_by(250) {
            let v = redemption_curve(rate, 100, 1_000_000).unwrap();
            assert!(v >= last, "rate {} gave {} < {}", rate, v, last);
            last = v;
        }
    }

    #[test]
    fn rate_above_max_is_unredeemable() {
        let err = redemption_curve(MAX_REDEMPTION_RATE_BPS + 1, 100, 1_000_000).unwrap_err();
        assert!(matches!(err, BursarError::ValueOverflow));
    }

    #[test]
    fn huge_pool_needs_the_wide_intermediate() {
        // base * scaled_rate overflows u128 here; the 256-bit path must not.
        let pool = u128::MAX - 1;
        let v = redemption_curve(9_999, 1, pool).unwrap();
        assert!(v <= pool);
        assert!(v > 0);
    }

    #[test]
    fn mul_div_matches_narrow_arithmetic_when_it_fits() {
        assert_eq!(mul_div(6, 7, 2).unwrap(), 21);
        assert_eq!(mul_div(10, 10, 3).unwrap(), 33);
    }

    #[test]
    fn mul_div_overflow_is_reported() {
        let err = mul_div(u128::MAX, u128::MAX, 1).unwrap_err();
        assert!(matches!(err, BursarError::ValueOverflow));
    }
}
