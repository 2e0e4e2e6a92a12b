use serde::{Deserialize, Deserializer};

use crate::extent::DefaultView;
use crate::style::StyleTable;

/// Options for every render on a page. Any field may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerOptions {
    pub tile_map: TileMapOptions,
    pub overlay: OverlayOptions,
}

/// Options for the tile map and its GPX vector layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileMapOptions {
    /// View shown until the layer fits itself to the data (default: 8.82N 37.41E, zoom 4)
    #[serde(default = "DefaultView::tile_map", deserialize_with = "tile_map_view")]
    pub view: DefaultView,

    /// Style per geometry type
    #[serde(default)]
    pub styles: StyleTable,
}

impl Default for TileMapOptions {
    fn default() -> Self {
        Self {
            view: DefaultView::tile_map(),
            styles: StyleTable::default(),
        }
    }
}

/// Options for the polyline map widget.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayOptions {
    /// Line colour of tracks and routes (default: "#ff0000")
    #[serde(default = "default_track_colour")]
    pub track_colour: String,

    /// Line width in pixels (default: 5)
    #[serde(default = "default_track_width")]
    pub track_width: f64,

    /// Minimum distance in degrees between drawn points (default: 0.001)
    #[serde(default = "default_min_track_point_delta")]
    pub min_track_point_delta: f64,

    /// Zoom the widget is created with, before any data arrives (default: 8)
    #[serde(default = "default_initial_zoom")]
    pub initial_zoom: u8,

    /// View used when a file has no points at all
    #[serde(default, deserialize_with = "empty_track_view")]
    pub default_view: DefaultView,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            track_colour: default_track_colour(),
            track_width: default_track_width(),
            min_track_point_delta: default_min_track_point_delta(),
            initial_zoom: default_initial_zoom(),
            default_view: DefaultView::default(),
        }
    }
}

fn default_track_colour() -> String {
    "#ff0000".to_string()
}

fn default_track_width() -> f64 {
    5.0
}

fn default_min_track_point_delta() -> f64 {
    0.001
}

fn default_initial_zoom() -> u8 {
    8
}

fn tile_map_view<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DefaultView, D::Error> {
    DefaultView::deserialize_onto(DefaultView::tile_map(), deserializer)
}

fn empty_track_view<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DefaultView, D::Error> {
    DefaultView::deserialize_onto(DefaultView::empty_track(), deserializer)
}
