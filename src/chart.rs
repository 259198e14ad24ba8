//! Chart payload assembly: the output contract handed to the renderer
//!
//! A payload carries the chart kind, the projected series with their axis
//! labels, and the renderer options (baseline defaults, stacked scales when
//! requested, caller passthrough merged last).

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::config::{ChartConfig, ChartKind, ChartOptions};
use crate::error::Result;
use crate::runner::Simulation;
use crate::series::{axis_labels, project, Dataset, SeriesLabel};

/// Axis labels plus the projected series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<SeriesLabel>,
    pub datasets: Vec<Dataset>,
}

/// Renderer-facing chart description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: Value,
}

/// Generate the chart payload for the given options.
///
/// Composes option resolution, cohort construction, the year loop and the
/// series projection. Any failure surfaces here and yields no payload.
pub fn generate(options: &ChartOptions) -> Result<ChartPayload> {
    let config = options.resolve()?;
    let matrix = Simulation::new(config.clone()).run()?;

    Ok(ChartPayload {
        kind: config.kind,
        data: ChartData {
            labels: axis_labels(&config, &matrix),
            datasets: project(&config, &matrix),
        },
        options: renderer_options(&config, options.options.as_ref()),
    })
}

/// Baseline renderer options, stacked x/y scales when the configuration
/// asks for them, then the caller's passthrough merged over the top.
fn renderer_options(config: &ChartConfig, passthrough: Option<&Value>) -> Value {
    let mut merged = Map::new();
    merged.insert("responsive".to_string(), Value::Bool(true));
    merged.insert("tooltips".to_string(), json!({ "enabled": false }));
    merged.insert("color".to_string(), Value::String("white".to_string()));

    if config.stacked {
        merged.insert(
            "scales".to_string(),
            json!({ "x": { "stacked": true }, "y": { "stacked": true } }),
        );
    }

    if let Some(Value::Object(extra)) = passthrough {
        for (key, value) in extra {
            merged.insert(key.clone(), value.clone());
        }
    }

    Value::Object(merged)
}
