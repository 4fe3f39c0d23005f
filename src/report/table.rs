//! Table view of the raw ISA dataset, highest ISA first.
//! Rows can be re-sorted by any column from the page header.

use crate::config::ISA_COLUMN;
use crate::data::columns::{self, ColumnError};
use polars::prelude::*;
use std::cmp::Ordering;

/// Current ordering of the table rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableSort {
    pub column: usize,
    pub descending: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub sort: Option<TableSort>,
}

/// Numbers compare numerically, anything else as text.
fn compare_cells(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y),
        _ => a.cmp(b),
    }
}

impl TableView {
    /// Every column and row, sorted descending by ISA with nulls last.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self, ColumnError> {
        if !columns::has_column(df, ISA_COLUMN) {
            return Err(ColumnError::Missing(ISA_COLUMN.to_string()));
        }

        let sorted = df.sort(
            [ISA_COLUMN],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_nulls_last(true)
                .with_maintain_order(true),
        )?;

        let columns: Vec<String> = sorted
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut rows = Vec::with_capacity(sorted.height());
        for i in 0..sorted.height() {
            let row = sorted
                .get_columns()
                .iter()
                .map(|col| {
                    col.get(i)
                        .map(|v| columns::format_cell(&v))
                        .unwrap_or_default()
                })
                .collect();
            rows.push(row);
        }

        let sort = columns
            .iter()
            .position(|c| c == ISA_COLUMN)
            .map(|column| TableSort {
                column,
                descending: true,
            });

        Ok(Self {
            columns,
            rows,
            sort,
        })
    }

    /// Stable sort on one column. Empty (null) cells stay last in both directions.
    pub fn sort_by(&mut self, column: &str, descending: bool) -> Result<(), ColumnError> {
        let index = self
            .columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| ColumnError::Missing(column.to_string()))?;
        self.sort_by_index(index, descending);
        Ok(())
    }

    /// Header click: flip the direction on the current column, else sort ascending.
    pub fn toggle_sort(&mut self, index: usize) {
        let descending = match self.sort {
            Some(sort) if sort.column == index => !sort.descending,
            _ => false,
        };
        self.sort_by_index(index, descending);
    }

    fn sort_by_index(&mut self, index: usize, descending: bool) {
        if index >= self.columns.len() {
            return;
        }

        self.rows.sort_by(|a, b| {
            let (x, y) = (&a[index], &b[index]);
            match (x.is_empty(), y.is_empty()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) if descending => compare_cells(x, y).reverse(),
                (false, false) => compare_cells(x, y),
            }
        });
        self.sort = Some(TableSort {
            column: index,
            descending,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_sorted_by_isa_descending() {
        let df = df![
            "Estado" => ["Acre", "Bahia", "Ceará"],
            "ISA" => [Some(0.4), None, Some(0.8)],
        ]
        .unwrap();

        let table = TableView::from_dataframe(&df).unwrap();

        assert_eq!(table.columns, ["Estado", "ISA"]);
        let states: Vec<_> = table.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(states, ["Ceará", "Acre", "Bahia"]);
        assert_eq!(table.rows[0][1], "0.8000");
        assert_eq!(table.rows[2][1], "");
        assert_eq!(
            table.sort,
            Some(TableSort {
                column: 1,
                descending: true
            })
        );
    }

    fn states(table: &TableView) -> Vec<&str> {
        table.rows.iter().map(|r| r[0].as_str()).collect()
    }

    #[test]
    fn sort_by_state_both_directions_keeps_nulls_last() {
        let df = df![
            "Estado" => [Some("Bahia"), None, Some("Acre"), Some("Ceará")],
            "ISA" => [0.4, 0.9, 0.8, 0.1],
        ]
        .unwrap();
        let mut table = TableView::from_dataframe(&df).unwrap();

        table.sort_by("Estado", false).unwrap();
        assert_eq!(states(&table), ["Acre", "Bahia", "Ceará", ""]);

        table.sort_by("Estado", true).unwrap();
        assert_eq!(states(&table), ["Ceará", "Bahia", "Acre", ""]);
    }

    #[test]
    fn numeric_columns_sort_by_value() {
        let df = df![
            "Estado" => ["Acre", "Bahia", "Ceará"],
            "Produtividade" => [Some(9i64), Some(10), None],
            "ISA" => [0.1, 0.2, 0.3],
        ]
        .unwrap();
        let mut table = TableView::from_dataframe(&df).unwrap();

        table.sort_by("Produtividade", false).unwrap();
        assert_eq!(states(&table), ["Acre", "Bahia", "Ceará"]);
        table.sort_by("Produtividade", true).unwrap();
        assert_eq!(states(&table), ["Bahia", "Acre", "Ceará"]);
    }

    #[test]
    fn toggle_flips_direction_on_the_same_column() {
        let df = df![
            "Estado" => ["Bahia", "Acre"],
            "ISA" => [0.4, 0.8],
        ]
        .unwrap();
        let mut table = TableView::from_dataframe(&df).unwrap();

        table.toggle_sort(1);
        assert_eq!(states(&table), ["Bahia", "Acre"]);
        table.toggle_sort(0);
        assert_eq!(states(&table), ["Acre", "Bahia"]);
        table.toggle_sort(0);
        assert_eq!(states(&table), ["Bahia", "Acre"]);
    }

    #[test]
    fn unknown_sort_column_is_an_error() {
        let df = df!["Estado" => ["Acre"], "ISA" => [0.5]].unwrap();
        let mut table = TableView::from_dataframe(&df).unwrap();
        assert!(matches!(
            table.sort_by("Regiao", false),
            Err(ColumnError::Missing(_))
        ));
    }

    #[test]
    fn missing_isa_column_is_an_error() {
        let df = df!["Estado" => ["Acre"]].unwrap();
        assert!(matches!(
            TableView::from_dataframe(&df),
            Err(ColumnError::Missing(_))
        ));
    }
}
