//! Option resolution: sparse caller options into a complete configuration
//!
//! Callers hand over whatever subset of options their markup carried; every
//! unset field takes a resolver default. The resolved [`ChartConfig`] is
//! immutable for the rest of the run.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::population;
use crate::{DEFAULT_DIVIDEND_RATE, DEFAULT_LIFE_EXPECTANCY, WALLET_NAMES};

/// Kind of chart the series feed; carries the projection policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Pie,
}

impl ChartKind {
    /// Snapshot kinds default to one series per year instead of per wallet
    pub fn is_snapshot(self) -> bool {
        matches!(self, ChartKind::Pie)
    }

    /// Snapshot series are handed to the renderer most recent year first
    pub fn reverses_series(self) -> bool {
        matches!(self, ChartKind::Pie)
    }
}

/// Sparse options as handed over by the external option parser.
///
/// Field names follow the external option contract (camelCase, `N`, `type`);
/// malformed fragments are the parser's concern and never reach this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartOptions {
    /// Chart kind, `line` when unset
    #[serde(rename = "type")]
    pub kind: Option<ChartKind>,
    /// Number of initial wallets
    #[serde(rename = "N")]
    pub n: Option<usize>,
    /// Life expectancy in years
    pub ev: Option<usize>,
    /// Number of simulated years
    pub duration: Option<usize>,
    /// First calendar year on the time axis
    pub start_year: Option<i64>,
    /// One past the last calendar year on the time axis
    pub end_year: Option<i64>,
    /// Record balances as multiples of the period dividend
    pub relative: Option<bool>,
    /// One series per wallet over years, rather than one series per year
    pub time_indexed: Option<bool>,
    /// Years on which the scheduled transfer fires
    pub exchange_years: Option<BTreeSet<usize>>,
    /// Enable demographic replacement
    pub deaths: Option<bool>,
    /// Years between replacement events; derived when unset
    pub deaths_period: Option<usize>,
    /// Fraction of per-capita supply issued per period
    pub dividend_rate: Option<f64>,
    /// Ask the renderer for stacked x/y scales (ignored for snapshot kinds)
    pub stacked: Option<bool>,
    /// Renderer options forwarded verbatim into the payload
    pub options: Option<serde_json::Value>,
}

/// Fully resolved, immutable configuration for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub actor_count: usize,
    pub life_expectancy: usize,
    pub duration: usize,
    pub start_year: i64,
    pub end_year: i64,
    pub relative: bool,
    pub time_indexed: bool,
    pub exchange_years: BTreeSet<usize>,
    /// `Some` iff demographic replacement is enabled
    pub deaths_period: Option<usize>,
    pub dividend_rate: f64,
    pub stacked: bool,
}

impl ChartOptions {
    /// Resolve into a complete configuration, filling defaults and
    /// validating the population and horizon.
    pub fn resolve(&self) -> Result<ChartConfig> {
        let kind = self.kind.unwrap_or_default();
        let actor_count = self.n.unwrap_or(WALLET_NAMES.len());
        let life_expectancy = self.ev.unwrap_or(DEFAULT_LIFE_EXPECTANCY);
        let duration = self.duration.unwrap_or(life_expectancy);

        if actor_count == 0 {
            return Err(SimError::Configuration(
                "actor count must be positive".to_string(),
            ));
        }
        if duration == 0 {
            return Err(SimError::Configuration(
                "duration must be positive".to_string(),
            ));
        }

        let start_year = self.start_year.unwrap_or(0);
        let end_year = self.end_year.unwrap_or(start_year + duration as i64);

        let deaths_period = if self.deaths.unwrap_or(false) {
            Some(match self.deaths_period {
                Some(period) if period > 0 => period,
                _ => population::derive_deaths_period(life_expectancy, actor_count),
            })
        } else {
            None
        };

        Ok(ChartConfig {
            kind,
            actor_count,
            life_expectancy,
            duration,
            start_year,
            end_year,
            relative: self.relative.unwrap_or(true),
            time_indexed: self.time_indexed.unwrap_or(!kind.is_snapshot()),
            exchange_years: self.exchange_years.clone().unwrap_or_default(),
            deaths_period,
            dividend_rate: self.dividend_rate.unwrap_or(DEFAULT_DIVIDEND_RATE),
            stacked: self.stacked.unwrap_or(false) && !kind.is_snapshot(),
        })
    }
}
