use serde::{Deserialize, Serialize};

use crate::chart::{ChartConfig, ElevationData, elevation_chart};
use crate::extent::DefaultView;
use crate::options::ViewerOptions;

/// One tracked item on the page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDescriptor {
    /// URL of the GPX file.
    pub gpx: String,
    #[serde(default)]
    pub elevations: ElevationData,
    #[serde(default)]
    pub mounts: MountPoints,
}

/// Selectors of the widget containers, relative to the item's element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MountPoints {
    pub tile_map: String,
    pub overlay_map: String,
    pub chart: String,
}

impl Default for MountPoints {
    fn default() -> Self {
        Self {
            tile_map: ".maps .osm-map".to_string(),
            overlay_map: ".maps .google-map".to_string(),
            chart: ".maps .elevation-chart .chart".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileMapMount {
    pub target: String,
    pub view: DefaultView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayMapMount {
    pub target: String,
    pub zoom: u8,
    pub map_type_id: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMount {
    pub target: String,
    pub config: ChartConfig,
}

/// What the page sets up for one item before its GPX file arrives.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPlan {
    pub gpx: String,
    pub tile_map: TileMapMount,
    pub overlay_map: OverlayMapMount,
    pub chart: ChartMount,
}

/// Plan every tracked item independently: two map mounts and a chart each.
pub fn init_page(tracks: &[TrackDescriptor], opts: &ViewerOptions) -> Vec<TrackPlan> {
    log::info!("initializing {} tracked items", tracks.len());
    tracks.iter().map(|track| plan_track(track, opts)).collect()
}

fn plan_track(track: &TrackDescriptor, opts: &ViewerOptions) -> TrackPlan {
    TrackPlan {
        gpx: track.gpx.clone(),
        tile_map: TileMapMount {
            target: track.mounts.tile_map.clone(),
            view: opts.tile_map.view.clone(),
        },
        overlay_map: OverlayMapMount {
            target: track.mounts.overlay_map.clone(),
            zoom: opts.overlay.initial_zoom,
            map_type_id: "roadmap",
        },
        chart: ChartMount {
            target: track.mounts.chart.clone(),
            config: elevation_chart(&track.elevations),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plan_per_item() {
        let tracks: Vec<TrackDescriptor> = serde_json::from_value(json!([
            {
                "gpx": "tracks/route/eiger.gpx",
                "elevations": {"orig": [[0, 0]], "srtm": [[0, 1200], [50, 1210]]}
            },
            {"gpx": "tracks/route/flat.gpx"}
        ]))
        .unwrap();

        let plans = init_page(&tracks, &ViewerOptions::default());
        assert_eq!(plans.len(), 2);

        let first = &plans[0];
        assert_eq!(first.gpx, "tracks/route/eiger.gpx");
        assert_eq!(first.tile_map.target, ".maps .osm-map");
        assert_eq!(first.tile_map.view, DefaultView::tile_map());
        assert_eq!(first.overlay_map.target, ".maps .google-map");
        assert_eq!(first.overlay_map.zoom, 8);
        assert_eq!(first.chart.target, ".maps .elevation-chart .chart");
        assert_eq!(first.chart.config.data.datasets.len(), 1);
        assert_eq!(first.chart.config.data.datasets[0].label, "srtm");

        assert!(plans[1].chart.config.data.datasets.is_empty());
    }

    #[test]
    fn test_custom_mounts() {
        let track: TrackDescriptor = serde_json::from_value(json!({
            "gpx": "a.gpx",
            "mounts": {"chart": "#profile"}
        }))
        .unwrap();
        assert_eq!(track.mounts.chart, "#profile");
        assert_eq!(track.mounts.tile_map, ".maps .osm-map");
    }

    #[test]
    fn test_plan_json_shape() {
        let track: TrackDescriptor = serde_json::from_value(json!({"gpx": "a.gpx"})).unwrap();
        let plans = init_page(&[track], &ViewerOptions::default());
        let plan = serde_json::to_value(&plans[0]).unwrap();
        assert_eq!(
            plan["overlayMap"],
            json!({"target": ".maps .google-map", "zoom": 8, "mapTypeId": "roadmap"})
        );
        assert_eq!(
            plan["tileMap"]["view"],
            json!({"lat": 8.82, "lon": 37.41, "zoom": 4})
        );
    }

    #[test]
    fn test_no_items() {
        assert!(init_page(&[], &ViewerOptions::default()).is_empty());
    }
}
