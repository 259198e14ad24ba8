//! Initial cohort construction and the demographic replacement schedule
//!
//! The whole schedule is precomputed here: when replacement is enabled, the
//! wallets that will die during the run get their ages rewritten so they
//! reach end-of-life exactly on their scheduled year, and one newborn is
//! appended per death. The year loop itself never changes the cohort size.

use tracing::warn;

use crate::config::ChartConfig;
use crate::{Wallet, WALLET_NAMES};

/// Display name for the wallet at `index`: the fixed pool first, generated
/// labels (`I4`, `I5`, …) beyond it
pub fn wallet_label(index: usize) -> String {
    WALLET_NAMES
        .get(index)
        .map(|name| (*name).to_string())
        .unwrap_or_else(|| format!("I{}", index + 1))
}

/// Derive the replacement interval from life expectancy and cohort size.
///
/// Starts at `round(ev / n)` and searches downward for a period `p >= 2`
/// with `(ev % p) % n == 0`, settling on 2 when no such period exists. The
/// result can be 0 when `n` far exceeds `ev`; a zero period disables the
/// schedule.
pub fn derive_deaths_period(life_expectancy: usize, actor_count: usize) -> usize {
    let mut period = (life_expectancy as f64 / actor_count as f64).round() as usize;
    while period > 2 && (life_expectancy % period) % actor_count > 0 {
        period -= 1;
    }
    period
}

/// Build the wallet cohort for a run: `actor_count` wallets born at year
/// zero, plus the precomputed death/birth schedule when replacement is
/// enabled.
pub fn build_wallets(config: &ChartConfig) -> Vec<Wallet> {
    let mut wallets: Vec<Wallet> = (0..config.actor_count)
        .map(|index| Wallet::new(wallet_label(index)))
        .collect();

    let period = match config.deaths_period {
        Some(period) if period > 0 => period,
        _ => return wallets,
    };

    let life_expectancy = config.life_expectancy as i64;
    let mut death_cursor = 0;
    for year in 1..config.duration {
        if year % period != 0 {
            continue;
        }

        if wallets[death_cursor].age < 0 {
            // The scheduled wallet is not born yet; the schedule stalls on
            // it rather than erroring.
            warn!(
                year,
                wallet = death_cursor,
                "replacement event skipped: wallet not yet born"
            );
            continue;
        }

        // Rewrite the initial age so this wallet reaches end-of-life
        // exactly on its scheduled year.
        let year = year as i64;
        wallets[death_cursor].age = life_expectancy - year;
        wallets[death_cursor].birthday = -(life_expectancy - year);

        let newborn_index = wallets.len();
        wallets.push(Wallet {
            label: wallet_label(newborn_index),
            age: -year,
            birthday: year,
            balance: 0.0,
        });
        death_cursor += 1;
    }

    wallets
}
