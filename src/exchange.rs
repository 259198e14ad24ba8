//! Scheduled wealth transfers between wallets
//!
//! One fixed transfer rule: on a configured year, half of the last active
//! wallet's balance moves to the first active wallet. There is no general
//! ledger and at most one transfer per year.

use std::collections::BTreeSet;

use tracing::debug;

use crate::Wallet;

/// Apply the scheduled transfer for `year`, if any.
///
/// `active` holds indices into `wallets` for this year's active subset, in
/// simulation order; the endpoints are taken from that subset, not from the
/// full collection. Returns the amount moved, `None` when nothing fired.
pub fn apply_exchange(
    wallets: &mut [Wallet],
    active: &[usize],
    year: usize,
    exchange_years: &BTreeSet<usize>,
) -> Option<f64> {
    if !exchange_years.contains(&year) || active.len() < 2 {
        return None;
    }

    let from = active[active.len() - 1];
    let to = active[0];
    let amount = wallets[from].balance / 2.0;
    wallets[from].balance -= amount;
    wallets[to].balance += amount;

    debug!(
        year,
        from = %wallets[from].label,
        to = %wallets[to].label,
        amount,
        "exchange applied"
    );
    Some(amount)
}
