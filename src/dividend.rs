//! Universal dividend computation
//!
//! The period dividend is a fixed fraction of the rounded average money
//! supply per active wallet. The supply sums every tracked wallet, dead and
//! not-yet-born included; crediting is the runner's job, not this module's.

use crate::error::{Result, SimError};
use crate::Wallet;

/// Compute the period dividend over the full wallet collection.
///
/// `DU = round(M / active_count) * rate`, where `M` is the global money
/// supply. Errors when no wallet is active: the dividend is undefined and
/// must never silently become a bogus value.
pub fn universal_dividend(wallets: &[Wallet], active_count: usize, rate: f64) -> Result<f64> {
    if active_count == 0 {
        return Err(SimError::ZeroActivePopulation);
    }

    let supply: f64 = wallets.iter().map(|wallet| wallet.balance).sum();
    let per_capita = (supply / active_count as f64).round();
    Ok(per_capita * rate)
}
