pub mod chart;
pub mod converter;
pub mod error;
pub mod extent;
pub mod gpx_types;
pub mod options;
pub mod overlay;
pub mod page;
pub mod parser;
pub mod path;
pub mod profile;
pub mod style;
pub mod tile_map;

use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use crate::chart::ElevationData;
use crate::error::TrackViewError;
use crate::options::ViewerOptions;
use crate::overlay::PolylineOverlay;
use crate::page::TrackDescriptor;
use crate::profile::TrackStats;
use crate::tile_map::TileLayer;

/// Plan the widgets of every tracked item on the page.
///
/// `tracks` is an array of `{gpx, elevations?, mounts?}` descriptors.
#[wasm_bindgen(js_name = initPage)]
pub fn init_page(tracks: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    init_hooks();

    let tracks: Vec<TrackDescriptor> = serde_wasm_bindgen::from_value(tracks)
        .map_err(|e| TrackViewError::Options(e.to_string()))?;
    let opts: ViewerOptions = parse_options(options)?;
    to_js(&page::init_page(&tracks, &opts))
}

/// Vector layer and view fit for the tile map. Pass `undefined` when the
/// GPX fetch failed.
#[wasm_bindgen(js_name = tileLayer)]
pub fn tile_layer(gpx_string: Option<String>, options: JsValue) -> Result<JsValue, JsValue> {
    init_hooks();

    let opts: ViewerOptions = parse_options(options)?;
    to_js(&TileLayer::from_source(gpx_string.as_deref(), &opts.tile_map))
}

/// Polylines and viewport for the polyline map widget. Pass `undefined` when
/// the GPX fetch failed.
#[wasm_bindgen(js_name = polylineOverlay)]
pub fn polyline_overlay(gpx_string: Option<String>, options: JsValue) -> Result<JsValue, JsValue> {
    init_hooks();

    let opts: ViewerOptions = parse_options(options)?;
    to_js(&PolylineOverlay::from_source(gpx_string.as_deref(), &opts.overlay))
}

/// Line chart configuration from named `[distance, elevation]` series.
#[wasm_bindgen(js_name = elevationChart)]
pub fn elevation_chart(elevations: JsValue) -> Result<JsValue, JsValue> {
    init_hooks();

    let elevations: ElevationData = parse_options(elevations)?;
    to_js(&chart::elevation_chart(&elevations))
}

#[derive(Serialize)]
struct Profile {
    series: chart::ElevationSeries,
    stats: TrackStats,
}

/// Elevation series and length/climb statistics of a GPX document.
#[wasm_bindgen(js_name = elevationProfile)]
pub fn elevation_profile(gpx_string: &str) -> Result<JsValue, JsValue> {
    init_hooks();

    let data = parser::parse_gpx(gpx_string)?;
    to_js(&Profile {
        series: profile::elevation_profile(&data),
        stats: TrackStats::from_data(&data),
    })
}

fn init_hooks() {
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    {
        // a second init only reports that the logger is already set
        let _ = console_log::init_with_level(log::Level::Info);
    }
}

fn parse_options<T: DeserializeOwned + Default>(options: JsValue) -> Result<T, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(T::default())
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| TrackViewError::Options(e.to_string()).into())
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| TrackViewError::Serialize(e.to_string()).into())
}
