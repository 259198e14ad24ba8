//! Projection of the balance matrix into renderer series
//!
//! Two orientations: time-indexed (one series per wallet, years on the
//! x-axis) and actor-indexed (one series per year, wallets on the x-axis,
//! used for snapshot kinds). The projector guarantees ordering and the
//! numeric data arrays; visual-encoding attributes are attached downstream
//! keyed by series index and chart kind.

use std::fmt;

use serde::Serialize;

use crate::config::ChartConfig;
use crate::runner::BalanceMatrix;

/// An axis or series label: a calendar year or a wallet display name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesLabel {
    Year(i64),
    Name(String),
}

impl fmt::Display for SeriesLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesLabel::Year(year) => write!(f, "{year}"),
            SeriesLabel::Name(name) => write!(f, "{name}"),
        }
    }
}

/// A single renderer series. The open style map stays empty here and is
/// filled by the styling collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub data: Vec<f64>,
    pub label: SeriesLabel,
    #[serde(flatten)]
    pub style: serde_json::Map<String, serde_json::Value>,
}

impl Dataset {
    fn new(data: Vec<f64>, label: SeriesLabel) -> Self {
        Dataset {
            data,
            label,
            style: serde_json::Map::new(),
        }
    }
}

/// X-axis labels for the configured orientation: calendar years
/// `[start_year, end_year)` when time-indexed, wallet names otherwise
pub fn axis_labels(config: &ChartConfig, matrix: &BalanceMatrix) -> Vec<SeriesLabel> {
    if config.time_indexed {
        (config.start_year..config.end_year)
            .map(SeriesLabel::Year)
            .collect()
    } else {
        matrix
            .wallets
            .iter()
            .map(|wallet| SeriesLabel::Name(wallet.label.clone()))
            .collect()
    }
}

/// Reshape the balance matrix into renderer datasets for the configured
/// orientation. Snapshot kinds get their year-series reversed so the most
/// recent year comes first.
pub fn project(config: &ChartConfig, matrix: &BalanceMatrix) -> Vec<Dataset> {
    if config.time_indexed {
        matrix
            .wallets
            .iter()
            .zip(&matrix.by_wallet)
            .map(|(wallet, samples)| {
                Dataset::new(samples.clone(), SeriesLabel::Name(wallet.label.clone()))
            })
            .collect()
    } else {
        let mut datasets: Vec<Dataset> = (0..config.duration)
            .map(|year| {
                let data = matrix.by_wallet.iter().map(|row| row[year]).collect();
                Dataset::new(data, SeriesLabel::Year(config.start_year + year as i64))
            })
            .collect();

        if config.kind.reverses_series() {
            datasets.reverse();
        }
        datasets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChartKind, ChartOptions};
    use crate::runner::Simulation;

    fn run(options: ChartOptions) -> (ChartConfig, BalanceMatrix) {
        let config = options.resolve().unwrap();
        let matrix = Simulation::new(config.clone()).run().unwrap();
        (config, matrix)
    }

    #[test]
    fn time_indexed_projection_yields_one_series_per_wallet() {
        let (config, matrix) = run(ChartOptions {
            duration: Some(10),
            ..Default::default()
        });

        let labels = axis_labels(&config, &matrix);
        let datasets = project(&config, &matrix);

        assert_eq!(labels, (0..10).map(SeriesLabel::Year).collect::<Vec<_>>());
        assert_eq!(datasets.len(), 3);
        assert_eq!(datasets[0].label, SeriesLabel::Name("Marcel".to_string()));
        for dataset in &datasets {
            assert_eq!(dataset.data.len(), 10);
            assert!(dataset.style.is_empty());
        }
    }

    #[test]
    fn year_labels_honor_a_custom_start_year() {
        let (config, matrix) = run(ChartOptions {
            duration: Some(3),
            start_year: Some(2020),
            ..Default::default()
        });

        let labels = axis_labels(&config, &matrix);
        assert_eq!(
            labels,
            vec![
                SeriesLabel::Year(2020),
                SeriesLabel::Year(2021),
                SeriesLabel::Year(2022)
            ]
        );
    }

    #[test]
    fn actor_indexed_projection_yields_one_series_per_year() {
        let (config, matrix) = run(ChartOptions {
            kind: Some(ChartKind::Bar),
            time_indexed: Some(false),
            duration: Some(4),
            ..Default::default()
        });

        let labels = axis_labels(&config, &matrix);
        let datasets = project(&config, &matrix);

        assert_eq!(
            labels,
            vec![
                SeriesLabel::Name("Marcel".to_string()),
                SeriesLabel::Name("Sophie".to_string()),
                SeriesLabel::Name("Fanny".to_string())
            ]
        );
        assert_eq!(datasets.len(), 4);
        assert_eq!(datasets[0].label, SeriesLabel::Year(0));
        assert_eq!(datasets[3].label, SeriesLabel::Year(3));
        for dataset in &datasets {
            assert_eq!(dataset.data.len(), 3);
        }
    }

    #[test]
    fn pie_series_come_most_recent_year_first() {
        let (config, matrix) = run(ChartOptions {
            kind: Some(ChartKind::Pie),
            duration: Some(5),
            start_year: Some(100),
            ..Default::default()
        });

        let datasets = project(&config, &matrix);

        assert_eq!(datasets[0].label, SeriesLabel::Year(104));
        assert_eq!(datasets[4].label, SeriesLabel::Year(100));
    }

    #[test]
    fn bar_series_keep_chronological_order() {
        let (config, matrix) = run(ChartOptions {
            kind: Some(ChartKind::Bar),
            time_indexed: Some(false),
            duration: Some(5),
            ..Default::default()
        });

        let datasets = project(&config, &matrix);
        assert_eq!(datasets[0].label, SeriesLabel::Year(0));
        assert_eq!(datasets[4].label, SeriesLabel::Year(4));
    }

    #[test]
    fn actor_indexed_rows_match_time_indexed_columns() {
        let options = ChartOptions {
            duration: Some(6),
            relative: Some(false),
            ..Default::default()
        };
        let (config, matrix) = run(options);

        let mut snapshot_config = config.clone();
        snapshot_config.time_indexed = false;

        let by_wallet = project(&config, &matrix);
        let by_year = project(&snapshot_config, &matrix);

        for (year, dataset) in by_year.iter().enumerate() {
            for (wallet, value) in dataset.data.iter().enumerate() {
                assert_eq!(*value, by_wallet[wallet].data[year]);
            }
        }
    }
}
