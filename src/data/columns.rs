//! Typed column access over Polars DataFrames.

use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColumnError {
    #[error("Column '{0}' not found")]
    Missing(String),
    #[error("Column '{column}' is not numeric (found {dtype})")]
    NotNumeric { column: String, dtype: DataType },
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Check whether the DataFrame has a column with this name.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, ColumnError> {
    if !has_column(df, name) {
        return Err(ColumnError::Missing(name.to_string()));
    }
    Ok(df.column(name)?)
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Read a numeric column as `f64` values, keeping nulls.
pub fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, ColumnError> {
    let col = column(df, name)?;
    if !is_numeric(col.dtype()) {
        return Err(ColumnError::NotNumeric {
            column: name.to_string(),
            dtype: col.dtype().clone(),
        });
    }

    let values = col.cast(&DataType::Float64)?;
    Ok(values.f64()?.into_iter().collect())
}

/// Read a numeric column if present; absent or non-numeric columns give `None`.
pub fn optional_numeric_column(df: &DataFrame, name: &str) -> Option<Vec<Option<f64>>> {
    numeric_column(df, name).ok()
}

/// Read any column as strings, keeping nulls.
pub fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, ColumnError> {
    let col = column(df, name)?;
    let values = col.cast(&DataType::String)?;
    Ok(values
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Render a single cell for display.
pub fn format_cell(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Float64(v) => format!("{:.4}", v),
        AnyValue::Float32(v) => format!("{:.4}", v),
        other => other.to_string().trim_matches('"').to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df![
            "Estado" => ["Paraná", "Bahia"],
            "ISA" => [Some(0.7), None],
            "Anos" => [2023i64, 2023],
        ]
        .unwrap()
    }

    #[test]
    fn numeric_column_keeps_nulls_and_casts_integers() {
        let df = sample();
        assert_eq!(numeric_column(&df, "ISA").unwrap(), vec![Some(0.7), None]);
        assert_eq!(
            numeric_column(&df, "Anos").unwrap(),
            vec![Some(2023.0), Some(2023.0)]
        );
    }

    #[test]
    fn numeric_column_rejects_text_and_missing_columns() {
        let df = sample();
        assert!(matches!(
            numeric_column(&df, "Estado"),
            Err(ColumnError::NotNumeric { .. })
        ));
        assert!(matches!(
            numeric_column(&df, "Regiao"),
            Err(ColumnError::Missing(_))
        ));
        assert!(optional_numeric_column(&df, "Regiao").is_none());
    }

    #[test]
    fn string_column_reads_text() {
        let df = sample();
        assert_eq!(
            string_column(&df, "Estado").unwrap(),
            vec![Some("Paraná".to_string()), Some("Bahia".to_string())]
        );
    }

    #[test]
    fn format_cell_trims_quotes_and_blanks_nulls() {
        assert_eq!(format_cell(&AnyValue::String("Acre")), "Acre");
        assert_eq!(format_cell(&AnyValue::Float64(0.5)), "0.5000");
        assert_eq!(format_cell(&AnyValue::Null), "");
        assert_eq!(format_cell(&AnyValue::Int64(7)), "7");
    }
}
