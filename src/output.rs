//! File export of generated charts
//!
//! Bundles a payload with reproducibility metadata and writes it out as
//! renderer JSON and/or a CSV of the projected series, for embedding or
//! downstream analysis.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::chart::ChartPayload;
use crate::config::ChartConfig;

/// Metadata recorded alongside an exported chart
#[derive(Debug, Clone, Serialize)]
pub struct ChartMetadata {
    pub name: String,
    pub config: ChartConfig,
    pub generated_at: String,
}

/// A generated chart bundled with its metadata, ready to write out
#[derive(Debug, Clone, Serialize)]
pub struct ChartExport {
    pub metadata: ChartMetadata,
    pub payload: ChartPayload,
}

impl ChartExport {
    pub fn new(name: &str, config: ChartConfig, payload: ChartPayload) -> Self {
        ChartExport {
            metadata: ChartMetadata {
                name: name.to_string(),
                config,
                generated_at: chrono::Utc::now().to_rfc3339(),
            },
            payload,
        }
    }

    /// Write the renderer payload as pretty-printed JSON
    pub fn write_payload_json<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.payload)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Write metadata and payload as one JSON document
    pub fn write_summary_json<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Write the projected series as CSV: one row per axis label, one
    /// column per series
    pub fn write_series_csv<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut writer = csv::Writer::from_path(path)?;

        let axis_header = if self.metadata.config.time_indexed {
            "year"
        } else {
            "wallet"
        };
        let mut header = vec![axis_header.to_string()];
        header.extend(
            self.payload
                .data
                .datasets
                .iter()
                .map(|dataset| dataset.label.to_string()),
        );
        writer.write_record(&header)?;

        for (row_index, label) in self.payload.data.labels.iter().enumerate() {
            let mut record = vec![label.to_string()];
            for dataset in &self.payload.data.datasets {
                let value = dataset
                    .data
                    .get(row_index)
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                record.push(value);
            }
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Write everything into a directory, creating it if needed:
    /// `chart.json`, `series.csv` and `summary.json`
    pub fn write_all<P: AsRef<Path>>(&self, dir: P) -> Result<(), Box<dyn std::error::Error>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        self.write_payload_json(dir.join("chart.json"))?;
        self.write_series_csv(dir.join("series.csv"))?;
        self.write_summary_json(dir.join("summary.json"))?;

        Ok(())
    }
}
