//! Universal Dividend Economy - Chart Catalog Run
//!
//! Generates every preset chart and prints a short report per chart.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use universal_dividend::chart::generate;
use universal_dividend::scenarios;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "universal_dividend=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Universal Dividend Economy - Chart Catalog ===\n");

    let presets = scenarios::catalog();
    println!("Presets to generate: {}\n", presets.len());

    let mut failures = 0;
    for preset in &presets {
        match generate(&preset.options) {
            Ok(payload) => {
                let series_count = payload.data.datasets.len();
                let sample_count = payload
                    .data
                    .datasets
                    .first()
                    .map(|dataset| dataset.data.len())
                    .unwrap_or(0);

                println!("{}:", preset.name);
                println!("  Kind: {:?}", payload.kind);
                println!("  Series: {}", series_count);
                println!("  Samples per series: {}", sample_count);

                if let Some(first) = payload.data.datasets.first() {
                    if let (Some(&start), Some(&end)) = (first.data.first(), first.data.last()) {
                        println!(
                            "  First series '{}': {:.2} -> {:.2}",
                            first.label, start, end
                        );
                    }
                }
                println!();
            }
            Err(err) => {
                failures += 1;
                println!("{}: FAILED ({err})\n", preset.name);
            }
        }
    }

    if failures > 0 {
        println!("=== {} of {} presets failed ===", failures, presets.len());
        std::process::exit(1);
    }
    println!("=== All presets generated ===");
}
