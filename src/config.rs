//! Report Configuration
//! Dataset locations and the column/property names the report reads.

use std::path::PathBuf;

/// Default tabular dataset, relative to the working directory.
pub const DEFAULT_CSV_PATH: &str = "sustentabilidade_agricola_brasil_ISA_2023.csv";
/// Default boundary dataset, relative to the working directory.
pub const DEFAULT_GEOJSON_PATH: &str = "brasil_estados.geojson";

// Tabular columns
pub const STATE_COLUMN: &str = "Estado";
pub const ISA_COLUMN: &str = "ISA";
pub const REGION_COLUMN: &str = "Regiao";
pub const ABBREVIATION_COLUMN: &str = "Sigla";
pub const NATIVE_VEGETATION_COLUMN: &str = "Vegetacao_Nativa";
pub const AGROCHEMICAL_USE_COLUMN: &str = "Uso_Agrotoxicos";
pub const PRODUCTIVITY_COLUMN: &str = "Produtividade";
pub const IRRIGATION_EFFICIENCY_COLUMN: &str = "Eficiencia_Irrigacao";

// GeoJSON feature properties
pub const NAME_PROPERTY: &str = "name";
pub const ABBREVIATION_PROPERTY: &str = "sigla";

/// Paths of the two input datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub csv_path: PathBuf,
    pub geojson_path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            geojson_path: PathBuf::from(DEFAULT_GEOJSON_PATH),
        }
    }
}

impl ReportConfig {
    pub fn new(csv_path: impl Into<PathBuf>, geojson_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            geojson_path: geojson_path.into(),
        }
    }
}
