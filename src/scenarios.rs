//! Named chart presets from the presentation catalog
//!
//! Each preset is a sparse option bundle; everything unset falls to the
//! resolver defaults (three wallets, 80-year life expectancy, one lifetime
//! of simulated years).

use std::collections::BTreeSet;

use crate::config::{ChartKind, ChartOptions};

/// A named chart configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPreset {
    pub name: String,
    pub options: ChartOptions,
}

impl ChartPreset {
    fn new(name: &str, options: ChartOptions) -> Self {
        ChartPreset {
            name: name.to_string(),
            options,
        }
    }

    /// Absolute balances over one lifetime
    pub fn absolute() -> Self {
        Self::new(
            "absolute",
            ChartOptions {
                relative: Some(false),
                ..Default::default()
            },
        )
    }

    /// Absolute balances over the first decade
    pub fn absolute_decade() -> Self {
        Self::new(
            "absolute_decade",
            ChartOptions {
                relative: Some(false),
                duration: Some(10),
                ..Default::default()
            },
        )
    }

    /// Dividend-relative balances over one lifetime
    pub fn relative() -> Self {
        Self::new("relative", ChartOptions::default())
    }

    /// Dividend-relative balances across generations: demographic
    /// replacement keeps the cohort alive past the first lifetime
    pub fn relative_generations() -> Self {
        Self::new(
            "relative_generations",
            ChartOptions {
                duration: Some(120),
                deaths: Some(true),
                ..Default::default()
            },
        )
    }

    /// Share-of-supply snapshot over the first decade
    pub fn snapshot_decade() -> Self {
        Self::new(
            "snapshot_decade",
            ChartOptions {
                kind: Some(ChartKind::Pie),
                duration: Some(10),
                ..Default::default()
            },
        )
    }

    /// Share-of-supply snapshot over one lifetime
    pub fn snapshot_lifetime() -> Self {
        Self::new(
            "snapshot_lifetime",
            ChartOptions {
                kind: Some(ChartKind::Pie),
                ..Default::default()
            },
        )
    }

    /// Absolute balances with transfers on years 20 and 60
    pub fn exchanges_absolute() -> Self {
        Self::new(
            "exchanges_absolute",
            ChartOptions {
                relative: Some(false),
                exchange_years: Some(BTreeSet::from([20, 60])),
                ..Default::default()
            },
        )
    }

    /// Dividend-relative balances with transfers on years 20 and 60
    pub fn exchanges_relative() -> Self {
        Self::new(
            "exchanges_relative",
            ChartOptions {
                exchange_years: Some(BTreeSet::from([20, 60])),
                ..Default::default()
            },
        )
    }

    /// Absolute balances for a twenty-wallet cohort
    pub fn crowd_absolute() -> Self {
        Self::new(
            "crowd_absolute",
            ChartOptions {
                relative: Some(false),
                n: Some(20),
                ..Default::default()
            },
        )
    }

    /// Dividend-relative balances for a twenty-wallet cohort
    pub fn crowd_relative() -> Self {
        Self::new(
            "crowd_relative",
            ChartOptions {
                n: Some(20),
                ..Default::default()
            },
        )
    }
}

/// The full preset catalog, in presentation order
pub fn catalog() -> Vec<ChartPreset> {
    vec![
        ChartPreset::absolute(),
        ChartPreset::absolute_decade(),
        ChartPreset::relative(),
        ChartPreset::relative_generations(),
        ChartPreset::snapshot_decade(),
        ChartPreset::snapshot_lifetime(),
        ChartPreset::exchanges_absolute(),
        ChartPreset::exchanges_relative(),
        ChartPreset::crowd_absolute(),
        ChartPreset::crowd_relative(),
    ]
}
