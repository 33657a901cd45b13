//! # Solvency Classifier
//!
//! Maps `(total_reserves, total_liabilities)` onto a public [`ReserveBand`]
//! using integer arithmetic only:
//!
//! ```text
//! ratio_pct = floor(reserves * 100 / liabilities)
//!   < 110  -> Band 1
//!   < 120  -> Band 2
//!   else   -> Band 3
//! ```
//!
//! Reserves below liabilities is [`InsolvencyError`]; no band is produced.
//! Zero liabilities is the maximal band.

use zkr_core::{InsolvencyError, ReserveBand};

/// Lowest percentage that earns [`ReserveBand::Comfortable`].
pub const COMFORTABLE_MIN_PCT: u128 = 110;

/// Lowest percentage that earns [`ReserveBand::Overcollateralized`].
pub const OVERCOLLATERALIZED_MIN_PCT: u128 = 120;

/// Classify solvency into a band.
pub fn classify_solvency(
    total_reserves: u64,
    total_liabilities: u64,
) -> Result<ReserveBand, InsolvencyError> {
    if total_reserves < total_liabilities {
        return Err(InsolvencyError {
            total_reserves,
            total_liabilities,
        });
    }
    if total_liabilities == 0 {
        return Ok(ReserveBand::Overcollateralized);
    }

    let ratio_pct = u128::from(total_reserves) * 100 / u128::from(total_liabilities);
    let band = if ratio_pct < COMFORTABLE_MIN_PCT {
        ReserveBand::Covered
    } else if ratio_pct < OVERCOLLATERALIZED_MIN_PCT {
        ReserveBand::Comfortable
    } else {
        ReserveBand::Overcollateralized
    };
    Ok(band)
}

/// Exact reserve ratio in basis points, floored. For operator diagnostics
/// only; it is never part of the published inputs. `None` when there are
/// no liabilities.
pub fn reserve_ratio_bps(total_reserves: u64, total_liabilities: u64) -> Option<u64> {
    if total_liabilities == 0 {
        return None;
    }
    let bps = u128::from(total_reserves) * 10_000 / u128::from(total_liabilities);
    Some(u64::try_from(bps).unwrap_or(u64::MAX))
}

/// Checked sum of reserve balances. `None` on overflow.
pub fn sum_reserves(balances: &[u64]) -> Option<u64> {
    balances
        .iter()
        .try_fold(0u64, |acc, balance| acc.checked_add(*balance))
}
