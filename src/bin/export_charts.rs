//! Batch Chart Exporter
//!
//! Generates every chart listed in a TOML catalog file and writes renderer
//! payloads (and optionally series CSVs) under an output directory, one
//! subdirectory per chart. Charts are independent runs and are generated in
//! parallel.
//!
//! Usage:
//!   cargo run --release --bin export_charts -- demos/charts.toml

use std::path::{Path, PathBuf};
use std::time::Instant;
use std::{env, fs, process};

use rayon::prelude::*;
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use universal_dividend::chart::generate;
use universal_dividend::config::ChartOptions;
use universal_dividend::output::ChartExport;
use universal_dividend::scenarios;

/// Top-level catalog configuration
#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    catalog: CatalogMetadata,
    #[serde(default)]
    charts: Vec<ChartEntry>,
    output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogMetadata {
    name: String,
    description: String,
    /// Also export the built-in preset catalog
    #[serde(default)]
    include_presets: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartEntry {
    name: String,
    #[serde(default)]
    options: ChartOptions,
}

#[derive(Debug, Clone, Deserialize)]
struct OutputSettings {
    directory: String,
    save_payload_json: bool,
    save_series_csv: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "universal_dividend=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <catalog.toml>", args[0]);
        eprintln!("Example: {} demos/charts.toml", args[0]);
        process::exit(1);
    }

    let catalog_path = &args[1];
    println!("=== Universal Dividend Chart Exporter ===\n");
    println!("Loading catalog: {}\n", catalog_path);

    let catalog_str = fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        eprintln!("Error reading catalog file: {}", e);
        process::exit(1);
    });

    let catalog: CatalogFile = toml::from_str(&catalog_str).unwrap_or_else(|e| {
        eprintln!("Error parsing TOML catalog: {}", e);
        process::exit(1);
    });

    println!("Catalog: {}", catalog.catalog.name);
    println!("Description: {}", catalog.catalog.description);

    let mut entries = catalog.charts.clone();
    if catalog.catalog.include_presets {
        entries.extend(scenarios::catalog().into_iter().map(|preset| ChartEntry {
            name: preset.name,
            options: preset.options,
        }));
    }
    println!("Charts to export: {}\n", entries.len());

    let output_dir = PathBuf::from(&catalog.output.directory);
    fs::create_dir_all(&output_dir).unwrap_or_else(|e| {
        eprintln!("Error creating output directory: {}", e);
        process::exit(1);
    });

    let start_time = Instant::now();

    let results: Vec<(String, Result<(), String>)> = entries
        .par_iter()
        .map(|entry| {
            let outcome = export_chart(entry, &output_dir, &catalog.output);
            match &outcome {
                Ok(()) => println!("  {} OK", entry.name),
                Err(err) => println!("  {} FAILED: {}", entry.name, err),
            }
            (entry.name.clone(), outcome)
        })
        .collect();

    let failures: Vec<&String> = results
        .iter()
        .filter(|(_, outcome)| outcome.is_err())
        .map(|(name, _)| name)
        .collect();

    let elapsed = start_time.elapsed();
    println!(
        "\nExported {}/{} charts in {:.2}s",
        results.len() - failures.len(),
        results.len(),
        elapsed.as_secs_f64()
    );
    println!("Results saved to: {}", output_dir.display());

    if !failures.is_empty() {
        eprintln!("Failed charts: {:?}", failures);
        process::exit(1);
    }
}

/// Generate one chart and write the requested outputs under its own
/// subdirectory
fn export_chart(
    entry: &ChartEntry,
    output_dir: &Path,
    settings: &OutputSettings,
) -> Result<(), String> {
    let config = entry.options.resolve().map_err(|e| e.to_string())?;
    let payload = generate(&entry.options).map_err(|e| e.to_string())?;
    let export = ChartExport::new(&entry.name, config, payload);

    let chart_dir = output_dir.join(&entry.name);
    fs::create_dir_all(&chart_dir).map_err(|e| e.to_string())?;

    if settings.save_payload_json {
        export
            .write_payload_json(chart_dir.join("chart.json"))
            .map_err(|e| e.to_string())?;
    }
    if settings.save_series_csv {
        export
            .write_series_csv(chart_dir.join("series.csv"))
            .map_err(|e| e.to_string())?;
    }
    export
        .write_summary_json(chart_dir.join("summary.json"))
        .map_err(|e| e.to_string())?;

    Ok(())
}
