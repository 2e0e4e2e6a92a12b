use geojson::{Bbox, FeatureCollection};
use serde::Serialize;

use crate::converter::to_feature_collection;
use crate::extent::{DefaultView, data_extent};
use crate::options::TileMapOptions;
use crate::parser::parse_gpx;
use crate::style::StyleTable;

/// Everything the tile map's vector layer needs once the GPX has loaded.
#[derive(Debug, Clone, Serialize)]
pub struct TileLayer {
    pub features: FeatureCollection,
    pub styles: StyleTable,
    pub view: DefaultView,
    /// Extent to fit the view to; absent when there is nothing to fit.
    pub fit: Option<Bbox>,
}

impl TileLayer {
    /// Build the layer from the fetched GPX text, or `None` if the fetch failed.
    ///
    /// Never fails: a missing or unparseable file and a file without
    /// geometries all leave `fit` empty so the map keeps its initial view.
    pub fn from_source(gpx: Option<&str>, opts: &TileMapOptions) -> Self {
        let mut layer = Self {
            features: FeatureCollection {
                bbox: None,
                features: Vec::new(),
                foreign_members: None,
            },
            styles: opts.styles.clone(),
            view: opts.view.clone(),
            fit: None,
        };

        let Some(xml) = gpx else {
            log::warn!("GPX source unavailable, keeping the initial tile map view");
            return layer;
        };

        let data = match parse_gpx(xml) {
            Ok(data) => data,
            Err(err) => {
                log::warn!("failed to parse GPX for the tile map: {err}");
                return layer;
            }
        };

        if data.is_empty() {
            log::info!("GPX has no geometries, skipping view fit");
            return layer;
        }

        layer.features = to_feature_collection(&data, &layer.styles);

        layer.fit = data_extent(&data).map(|extent| extent.to_bbox());
        layer.features.bbox = layer.fit.clone();
        log::debug!(
            "tile layer with {} features, fit {:?}",
            layer.features.features.len(),
            layer.fit
        );
        layer
    }
}
