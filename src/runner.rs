//! Year-by-year simulation loop
//!
//! The runner owns its wallet vector exclusively for the run and mutates it
//! in place across exactly `duration` steps. Per-year order is load-bearing:
//!
//! 1. compute the active subset
//! 2. compute the dividend over the full supply and the active count
//! 3. apply the scheduled exchange, if any
//! 4. record every wallet's balance (post-exchange, pre-credit)
//! 5. credit the dividend to every active wallet
//! 6. age every wallet by one year
//!
//! Recorded samples therefore reflect the current year's exchange but never
//! that year's not-yet-credited dividend.

use tracing::debug;

use crate::config::ChartConfig;
use crate::dividend::universal_dividend;
use crate::error::Result;
use crate::exchange::apply_exchange;
use crate::population::build_wallets;
use crate::Wallet;

/// Opening balance step between consecutive initially active wallets
const SEED_BALANCE_STEP: f64 = 100.0;

/// Per-wallet, per-year balance samples from a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceMatrix {
    /// Wallets in simulation order, in their end-of-run state
    pub wallets: Vec<Wallet>,
    /// One row per wallet, `duration` samples each
    pub by_wallet: Vec<Vec<f64>>,
}

/// A single simulation run over a wallet cohort
pub struct Simulation {
    config: ChartConfig,
    wallets: Vec<Wallet>,
}

impl Simulation {
    /// Build the cohort from the configuration and seed opening balances:
    /// the i-th initially active wallet starts with `100 * i` units (a lone
    /// wallet gets a floor of 100 so relative mode has a supply to divide).
    pub fn new(config: ChartConfig) -> Self {
        let mut wallets = build_wallets(&config);
        seed_balances(&mut wallets, config.life_expectancy);
        Simulation { config, wallets }
    }

    /// Start from an explicit cohort instead of the built-and-seeded one
    pub fn from_wallets(config: ChartConfig, wallets: Vec<Wallet>) -> Self {
        Simulation { config, wallets }
    }

    /// Run all `duration` steps. Any engine error aborts the run and yields
    /// no series at all.
    pub fn run(mut self) -> Result<BalanceMatrix> {
        let duration = self.config.duration;
        let mut by_wallet: Vec<Vec<f64>> = self
            .wallets
            .iter()
            .map(|_| Vec::with_capacity(duration))
            .collect();

        for year in 0..duration {
            let active = self.active_indices();
            let dividend =
                universal_dividend(&self.wallets, active.len(), self.config.dividend_rate)?;

            apply_exchange(
                &mut self.wallets,
                &active,
                year,
                &self.config.exchange_years,
            );

            for (index, wallet) in self.wallets.iter().enumerate() {
                let sample = if self.config.relative {
                    wallet.balance / dividend
                } else {
                    wallet.balance
                };
                by_wallet[index].push(sample);
            }

            for &index in &active {
                self.wallets[index].balance += dividend;
            }
            for wallet in &mut self.wallets {
                wallet.age += 1;
            }

            debug!(year, active = active.len(), dividend, "year complete");
        }

        Ok(BalanceMatrix {
            wallets: self.wallets,
            by_wallet,
        })
    }

    fn active_indices(&self) -> Vec<usize> {
        self.wallets
            .iter()
            .enumerate()
            .filter(|(_, wallet)| wallet.is_active(self.config.life_expectancy))
            .map(|(index, _)| index)
            .collect()
    }
}

fn seed_balances(wallets: &mut [Wallet], life_expectancy: usize) {
    let active: Vec<usize> = wallets
        .iter()
        .enumerate()
        .filter(|(_, wallet)| wallet.is_active(life_expectancy))
        .map(|(index, _)| index)
        .collect();

    let floor = if active.len() > 1 {
        0.0
    } else {
        SEED_BALANCE_STEP
    };
    for (rank, &index) in active.iter().enumerate() {
        wallets[index].balance = (SEED_BALANCE_STEP * rank as f64).max(floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartOptions;
    use crate::error::SimError;
    use approx::assert_relative_eq;
    use std::collections::BTreeSet;

    fn cohort(balances: &[f64]) -> Vec<Wallet> {
        balances
            .iter()
            .enumerate()
            .map(|(index, &balance)| {
                let mut wallet = Wallet::new(format!("W{index}"));
                wallet.balance = balance;
                wallet
            })
            .collect()
    }

    #[test]
    fn samples_are_recorded_before_the_dividend_is_credited() {
        let options = ChartOptions {
            duration: Some(1),
            relative: Some(false),
            ..Default::default()
        };
        let config = options.resolve().unwrap();

        let matrix = Simulation::from_wallets(config, cohort(&[50.0, 210.0, 370.0]))
            .run()
            .unwrap();

        // Year-0 samples equal the opening balances; the 21-unit dividend
        // lands only on the post-run state.
        assert_eq!(matrix.by_wallet[0], vec![50.0]);
        assert_eq!(matrix.by_wallet[1], vec![210.0]);
        assert_eq!(matrix.by_wallet[2], vec![370.0]);

        assert_relative_eq!(matrix.wallets[0].balance, 71.0);
        assert_relative_eq!(matrix.wallets[1].balance, 231.0);
        assert_relative_eq!(matrix.wallets[2].balance, 391.0);
    }

    #[test]
    fn relative_samples_are_multiples_of_the_dividend() {
        let options = ChartOptions {
            duration: Some(1),
            ..Default::default()
        };
        let config = options.resolve().unwrap();

        let matrix = Simulation::from_wallets(config, cohort(&[50.0, 210.0, 370.0]))
            .run()
            .unwrap();

        assert_relative_eq!(matrix.by_wallet[0][0], 50.0 / 21.0, max_relative = 1e-12);
        assert_relative_eq!(matrix.by_wallet[1][0], 10.0, max_relative = 1e-12);
        assert_relative_eq!(matrix.by_wallet[2][0], 370.0 / 21.0, max_relative = 1e-12);
    }

    #[test]
    fn exchange_shows_in_the_same_years_sample() {
        let options = ChartOptions {
            duration: Some(1),
            relative: Some(false),
            exchange_years: Some(BTreeSet::from([0])),
            ..Default::default()
        };
        let config = options.resolve().unwrap();

        let matrix = Simulation::from_wallets(config, cohort(&[100.0, 300.0]))
            .run()
            .unwrap();

        assert_eq!(matrix.by_wallet[0], vec![250.0]);
        assert_eq!(matrix.by_wallet[1], vec![150.0]);
    }

    #[test]
    fn default_cohort_is_seeded_with_stepped_balances() {
        let config = ChartOptions {
            duration: Some(1),
            relative: Some(false),
            ..Default::default()
        }
        .resolve()
        .unwrap();

        let matrix = Simulation::new(config).run().unwrap();

        assert_eq!(matrix.by_wallet[0][0], 0.0);
        assert_eq!(matrix.by_wallet[1][0], 100.0);
        assert_eq!(matrix.by_wallet[2][0], 200.0);
    }

    #[test]
    fn a_lone_wallet_is_seeded_with_the_floor_balance() {
        let config = ChartOptions {
            n: Some(1),
            duration: Some(1),
            relative: Some(false),
            ..Default::default()
        }
        .resolve()
        .unwrap();

        let matrix = Simulation::new(config).run().unwrap();

        assert_eq!(matrix.by_wallet[0][0], 100.0);
    }

    #[test]
    fn balances_grow_by_the_dividend_each_year() {
        let options = ChartOptions {
            n: Some(2),
            duration: Some(3),
            relative: Some(false),
            ..Default::default()
        };
        let config = options.resolve().unwrap();

        let matrix = Simulation::from_wallets(config, cohort(&[0.0, 100.0]))
            .run()
            .unwrap();

        // Year 0: M=100, DU=5; year 1: M=110, DU=5.5;
        // year 2: M=121, round(60.5)=61, DU=6.1
        assert_eq!(matrix.by_wallet[0], vec![0.0, 5.0, 10.5]);
        assert_eq!(matrix.by_wallet[1], vec![100.0, 105.0, 110.5]);
        assert_relative_eq!(matrix.wallets[0].balance, 16.6, max_relative = 1e-12);
        assert_relative_eq!(matrix.wallets[1].balance, 116.6, max_relative = 1e-12);
    }

    #[test]
    fn every_wallet_ages_each_year_active_or_not() {
        let config = ChartOptions {
            duration: Some(10),
            deaths: Some(true),
            deaths_period: Some(4),
            relative: Some(false),
            ..Default::default()
        }
        .resolve()
        .unwrap();

        let cohort = build_wallets(&config);
        let initial_ages: Vec<i64> = cohort.iter().map(|wallet| wallet.age).collect();

        let matrix = Simulation::from_wallets(config, cohort).run().unwrap();

        for (wallet, initial_age) in matrix.wallets.iter().zip(initial_ages) {
            assert_eq!(wallet.age, initial_age + 10);
        }
    }

    #[test]
    fn run_fails_once_the_whole_cohort_has_died() {
        // ev=5 with duration 6 and no replacement: year 5 has no active
        // wallet left, so the engine refuses to price the dividend.
        let config = ChartOptions {
            ev: Some(5),
            duration: Some(6),
            relative: Some(false),
            ..Default::default()
        }
        .resolve()
        .unwrap();

        let result = Simulation::new(config).run();
        assert_eq!(result.unwrap_err(), SimError::ZeroActivePopulation);
    }

    #[test]
    fn series_rows_cover_every_wallet_for_the_full_duration() {
        let config = ChartOptions {
            duration: Some(40),
            deaths: Some(true),
            ..Default::default()
        }
        .resolve()
        .unwrap();

        let matrix = Simulation::new(config).run().unwrap();

        assert!(matrix.wallets.len() > 3);
        assert_eq!(matrix.by_wallet.len(), matrix.wallets.len());
        for row in &matrix.by_wallet {
            assert_eq!(row.len(), 40);
        }
    }
}
