use linked_hash_map::LinkedHashMap;
use serde::Serialize;

/// `(distance, elevation)` pairs; a missing elevation is a gap in the line.
pub type ElevationSeries = Vec<(f64, Option<f64>)>;

/// Named series in insertion order, e.g. `{"orig": [...], "srtm": [...]}`.
pub type ElevationData = LinkedHashMap<String, ElevationSeries>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(rename = "type")]
    pub axis_type: &'static str,
    pub position: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scales {
    pub x_axes: Vec<Axis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub scales: Scales,
}

/// Line chart configuration with a continuous numeric x axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

/// One dataset per series, skipping series whose elevations sum to zero.
pub fn elevation_chart(elevations: &ElevationData) -> ChartConfig {
    let datasets = elevations
        .iter()
        .filter(|(name, series)| {
            let keep = elevation_sum(series) != 0.0;
            if !keep {
                log::debug!("hiding empty elevation series '{name}'");
            }
            keep
        })
        .map(|(name, series)| Dataset {
            label: name.clone(),
            data: series.iter().map(|&(x, y)| ChartPoint { x, y }).collect(),
        })
        .collect();

    ChartConfig {
        chart_type: "line",
        data: ChartData { datasets },
        options: ChartOptions {
            scales: Scales {
                x_axes: vec![Axis {
                    axis_type: "linear",
                    position: "bottom",
                }],
            },
        },
    }
}

fn elevation_sum(series: &ElevationSeries) -> f64 {
    series.iter().map(|(_, y)| y.unwrap_or(0.0)).sum()
}
