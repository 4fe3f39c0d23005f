//! State records extracted from the ISA table.

use super::columns::{self, ColumnError};
use crate::config::{
    ABBREVIATION_COLUMN, AGROCHEMICAL_USE_COLUMN, IRRIGATION_EFFICIENCY_COLUMN, ISA_COLUMN,
    NATIVE_VEGETATION_COLUMN, PRODUCTIVITY_COLUMN, REGION_COLUMN, STATE_COLUMN,
};
use polars::prelude::DataFrame;

/// Indicators the ISA is composed from. Read when present, never validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorMetrics {
    pub native_vegetation: Option<f64>,
    pub agrochemical_use: Option<f64>,
    pub productivity: Option<f64>,
    pub irrigation_efficiency: Option<f64>,
}

/// One row of the ISA table.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRecord {
    pub name: String,
    pub abbreviation: Option<String>,
    pub region: Option<String>,
    pub isa: Option<f64>,
    pub metrics: IndicatorMetrics,
}

impl StateRecord {
    pub fn new(name: impl Into<String>, isa: Option<f64>) -> Self {
        Self {
            name: name.into(),
            abbreviation: None,
            region: None,
            isa,
            metrics: IndicatorMetrics::default(),
        }
    }

    /// Build one record per row. `Estado` and a numeric `ISA` are required;
    /// every other column is optional. Rows without a state name are skipped.
    pub fn from_dataframe(df: &DataFrame) -> Result<Vec<StateRecord>, ColumnError> {
        let names = columns::string_column(df, STATE_COLUMN)?;
        let isa = columns::numeric_column(df, ISA_COLUMN)?;

        let optional_text = |name: &str| {
            if columns::has_column(df, name) {
                columns::string_column(df, name).ok()
            } else {
                None
            }
        };
        let abbreviations = optional_text(ABBREVIATION_COLUMN);
        let regions = optional_text(REGION_COLUMN);

        let vegetation = columns::optional_numeric_column(df, NATIVE_VEGETATION_COLUMN);
        let agrochemicals = columns::optional_numeric_column(df, AGROCHEMICAL_USE_COLUMN);
        let productivity = columns::optional_numeric_column(df, PRODUCTIVITY_COLUMN);
        let irrigation = columns::optional_numeric_column(df, IRRIGATION_EFFICIENCY_COLUMN);

        let text_at = |col: &Option<Vec<Option<String>>>, i: usize| {
            col.as_ref().and_then(|values| values[i].clone())
        };
        let number_at =
            |col: &Option<Vec<Option<f64>>>, i: usize| col.as_ref().and_then(|values| values[i]);

        let records = names
            .into_iter()
            .enumerate()
            .filter_map(|(i, name)| {
                Some(StateRecord {
                    name: name?,
                    abbreviation: text_at(&abbreviations, i),
                    region: text_at(&regions, i),
                    isa: isa[i],
                    metrics: IndicatorMetrics {
                        native_vegetation: number_at(&vegetation, i),
                        agrochemical_use: number_at(&agrochemicals, i),
                        productivity: number_at(&productivity, i),
                        irrigation_efficiency: number_at(&irrigation, i),
                    },
                })
            })
            .collect();

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn reads_required_and_optional_columns() {
        let df = df![
            "Estado" => ["Paraná", "Amazonas"],
            "Sigla" => ["PR", "AM"],
            "Regiao" => ["Sul", "Norte"],
            "ISA" => [0.71, 0.48],
            "Vegetacao_Nativa" => [0.3, 0.9],
        ]
        .unwrap();

        let records = StateRecord::from_dataframe(&df).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Paraná");
        assert_eq!(records[0].abbreviation.as_deref(), Some("PR"));
        assert_eq!(records[1].region.as_deref(), Some("Norte"));
        assert_eq!(records[1].isa, Some(0.48));
        assert_eq!(records[1].metrics.native_vegetation, Some(0.9));
        assert_eq!(records[1].metrics.productivity, None);
    }

    #[test]
    fn out_of_range_isa_passes_through() {
        let df = df!["Estado" => ["Acre"], "ISA" => [1.7]].unwrap();
        let records = StateRecord::from_dataframe(&df).unwrap();
        assert_eq!(records[0].isa, Some(1.7));
    }

    #[test]
    fn missing_isa_column_is_an_error() {
        let df = df!["Estado" => ["Acre"]].unwrap();
        assert!(matches!(
            StateRecord::from_dataframe(&df),
            Err(ColumnError::Missing(_))
        ));
    }
}
