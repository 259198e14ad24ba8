//! Universal Dividend Economy Simulator
//!
//! Models a monetary scheme in which every active wallet is credited a
//! periodic dividend sized as a fixed fraction of the average per-capita
//! money supply. Optional demographic replacement retires one wallet per
//! period and appends a newborn in its place; scheduled exchanges move half
//! of one wallet's balance to another on configured years.
//!
//! The simulation is a pure function of its resolved configuration: no
//! randomness, no I/O, identical output for identical input. Results are
//! projected into chart payloads for an external renderer.
//!
//! Key components:
//! - config: sparse caller options resolved into a complete configuration
//! - population: initial cohort and the precomputed death/birth schedule
//! - runner: the year-by-year loop producing the balance matrix
//! - series/chart: projection of the matrix into renderer series

pub mod chart;
pub mod config;
pub mod dividend;
pub mod error;
pub mod exchange;
pub mod output;
pub mod population;
pub mod runner;
pub mod scenarios;
pub mod series;

pub use chart::{generate, ChartData, ChartPayload};
pub use config::{ChartConfig, ChartKind, ChartOptions};
pub use error::SimError;
pub use runner::{BalanceMatrix, Simulation};

/// Default life expectancy in years
pub const DEFAULT_LIFE_EXPECTANCY: usize = 80;

/// Default fraction of per-capita money supply issued as dividend each year
pub const DEFAULT_DIVIDEND_RATE: f64 = 0.1;

/// Display names for the first wallets; later wallets get generated labels
pub const WALLET_NAMES: [&str; 3] = ["Marcel", "Sophie", "Fanny"];

/// A single monetary actor, tracked for the whole run whether or not it is
/// currently alive
#[derive(Debug, Clone, PartialEq)]
pub struct Wallet {
    /// Display name used as the series label
    pub label: String,
    /// Years since birth; negative while not yet born
    pub age: i64,
    /// Year offset at which age reaches zero
    pub birthday: i64,
    /// Monetary units held, non-negative
    pub balance: f64,
}

impl Wallet {
    /// Create a wallet born at year zero with an empty balance
    pub fn new(label: impl Into<String>) -> Self {
        Wallet {
            label: label.into(),
            age: 0,
            birthday: 0,
            balance: 0.0,
        }
    }

    /// A wallet is active while its age lies in `[0, life_expectancy)`.
    /// Only active wallets receive dividends and take part in exchanges.
    pub fn is_active(&self, life_expectancy: usize) -> bool {
        self.age >= 0 && self.age < life_expectancy as i64
    }
}
