//! GeoJSON Boundary Loader
//! Reads state boundaries into named multipolygon records.

use crate::config::{ABBREVIATION_PROPERTY, NAME_PROPERTY};
use geo::{Centroid, MultiPolygon, Point};
use geojson::{Feature, GeoJson};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("Expected a FeatureCollection or Feature")]
    NotFeatures,
    #[error("Feature {index} has no geometry")]
    MissingGeometry { index: usize },
    #[error("Feature {index} has unsupported geometry (expected Polygon or MultiPolygon)")]
    UnsupportedGeometry { index: usize },
    #[error("Feature {index} is missing the '{property}' property")]
    MissingProperty { index: usize, property: String },
}

/// One boundary feature.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryRecord {
    /// `None` when the feature has no usable `name`; such a record never joins.
    pub name: Option<String>,
    pub abbreviation: String,
    pub geometry: MultiPolygon<f64>,
}

impl GeometryRecord {
    pub fn centroid(&self) -> Option<Point<f64>> {
        self.geometry.centroid()
    }
}

/// Loads boundary records from GeoJSON. Nothing is cached.
pub struct GeometryLoader;

impl GeometryLoader {
    pub fn load(path: &Path) -> Result<Vec<GeometryRecord>, GeometryError> {
        let text = fs::read_to_string(path).map_err(|source| GeometryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records = Self::parse(&text)?;
        log::info!("Loaded {} features from {}", records.len(), path.display());
        Ok(records)
    }

    /// Parse a FeatureCollection (or a lone Feature) into records, in file order.
    pub fn parse(text: &str) -> Result<Vec<GeometryRecord>, GeometryError> {
        let features = match text.parse::<GeoJson>()? {
            GeoJson::FeatureCollection(collection) => collection.features,
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::Geometry(_) => return Err(GeometryError::NotFeatures),
        };

        features
            .into_iter()
            .enumerate()
            .map(|(index, feature)| Self::record_from_feature(index, feature))
            .collect()
    }

    fn record_from_feature(index: usize, feature: Feature) -> Result<GeometryRecord, GeometryError> {
        let name = feature
            .property(NAME_PROPERTY)
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        if name.is_none() {
            log::warn!("Feature {} has no '{}' property", index, NAME_PROPERTY);
        }
        let abbreviation = Self::string_property(&feature, index, ABBREVIATION_PROPERTY)?;

        let geometry = feature
            .geometry
            .ok_or(GeometryError::MissingGeometry { index })?;
        let geometry = match geo::Geometry::<f64>::try_from(geometry)? {
            geo::Geometry::MultiPolygon(mp) => mp,
            geo::Geometry::Polygon(p) => MultiPolygon(vec![p]),
            _ => return Err(GeometryError::UnsupportedGeometry { index }),
        };

        Ok(GeometryRecord {
            name,
            abbreviation,
            geometry,
        })
    }

    fn string_property(
        feature: &Feature,
        index: usize,
        property: &str,
    ) -> Result<String, GeometryError> {
        feature
            .property(property)
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| GeometryError::MissingProperty {
                index,
                property: property.to_string(),
            })
    }
}
