//! Summary Statistics Module
//! Mean, maximum and minimum of the ISA column.

use crate::config::ISA_COLUMN;
use crate::data::columns::{self, ColumnError};
use polars::prelude::DataFrame;
use statrs::statistics::Statistics;

/// Headline numbers shown above the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

impl SummaryStats {
    /// Unweighted statistics over all values. An empty input yields NaN.
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            count: values.len(),
            mean: values.iter().mean(),
            max: Statistics::max(values.iter()),
            min: Statistics::min(values.iter()),
        }
    }

    /// Statistics over the non-null ISA values of the table.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self, ColumnError> {
        let values: Vec<f64> = columns::numeric_column(df, ISA_COLUMN)?
            .into_iter()
            .flatten()
            .collect();
        Ok(Self::from_values(&values))
    }

    /// Labeled values in display order.
    pub fn metrics(&self) -> [(&'static str, String); 3] {
        [
            ("ISA Médio", format!("{:.2}", self.mean)),
            ("ISA Máximo", format!("{:.2}", self.max)),
            ("ISA Mínimo", format!("{:.2}", self.min)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn three_value_example() {
        let stats = SummaryStats::from_values(&[0.2, 0.5, 0.9]);

        assert!((stats.mean - 0.533_333).abs() < 1e-4);
        assert_eq!(stats.max, 0.9);
        assert_eq!(stats.min, 0.2);

        let labels = stats.metrics();
        assert_eq!(labels[0], ("ISA Médio", "0.53".to_string()));
        assert_eq!(labels[1], ("ISA Máximo", "0.90".to_string()));
        assert_eq!(labels[2], ("ISA Mínimo", "0.20".to_string()));
    }

    #[test]
    fn mean_lies_between_min_and_max() {
        let stats = SummaryStats::from_values(&[0.61, 0.12, 0.98, 0.45, 0.45]);
        assert!(stats.min <= stats.mean && stats.mean <= stats.max);
    }

    #[test]
    fn nulls_are_skipped() {
        let df = df!["ISA" => [Some(0.2), None, Some(0.4)]].unwrap();
        let stats = SummaryStats::from_dataframe(&df).unwrap();
        assert_eq!(stats.count, 2);
        assert!((stats.mean - 0.3).abs() < 1e-12);
    }

    #[test]
    fn text_column_is_an_error() {
        let df = df!["ISA" => ["alto", "baixo"]].unwrap();
        assert!(matches!(
            SummaryStats::from_dataframe(&df),
            Err(ColumnError::NotNumeric { .. })
        ));
    }
}
