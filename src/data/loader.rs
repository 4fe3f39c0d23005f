//! CSV Data Loader Module
//! Handles CSV file loading using Polars, with a per-process memo cache.

use polars::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV '{path}': {source}")]
    CsvError {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("No data loaded")]
    NoData,
}

/// Loads CSV files with Polars and memoizes the result by path.
///
/// A cached frame is returned as-is until [`DataLoader::clear`] is called,
/// even if the file changes on disk.
pub struct DataLoader {
    cache: HashMap<PathBuf, DataFrame>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Load a CSV file, reusing the cached frame when the path was seen before.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        if self.cache.contains_key(file_path) {
            log::debug!("CSV cache hit for {}", file_path.display());
        } else {
            let df = Self::read_csv(file_path)?;
            self.cache.insert(file_path.to_path_buf(), df);
        }

        self.cache.get(file_path).ok_or(LoaderError::NoData)
    }

    /// Read a CSV file from disk, bypassing the cache.
    pub fn read_csv(file_path: &Path) -> Result<DataFrame, LoaderError> {
        let to_error = |source| LoaderError::CsvError {
            path: file_path.to_path_buf(),
            source,
        };

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()
            .map_err(to_error)?
            .collect()
            .map_err(to_error)?;

        log::info!(
            "Loaded {} rows, {} columns from {}",
            df.height(),
            df.width(),
            file_path.display()
        );

        Ok(df)
    }

    /// Number of memoized frames.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop every memoized frame so the next load re-reads from disk.
    pub fn clear(&mut self) {
        log::debug!("Clearing {} cached CSV frame(s)", self.cache.len());
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_csv_reads_rows_and_columns() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "isa.csv", "Estado,ISA\nParaná,0.7\nBahia,0.4\n");

        let mut loader = DataLoader::new();
        let df = loader.load_csv(&path).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);
        assert_eq!(loader.cached_len(), 1);
    }

    #[test]
    fn second_load_returns_cached_frame_even_if_file_changes() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "isa.csv", "Estado,ISA\nParaná,0.7\n");

        let mut loader = DataLoader::new();
        let first = loader.load_csv(&path).unwrap().clone();

        fs::write(&path, "Estado,ISA\nParaná,0.7\nBahia,0.4\nAcre,0.9\n").unwrap();
        let second = loader.load_csv(&path).unwrap();

        assert_eq!(second.height(), 1);
        assert!(first.equals(second));
    }

    #[test]
    fn clear_forces_a_fresh_read() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "isa.csv", "Estado,ISA\nParaná,0.7\n");

        let mut loader = DataLoader::new();
        loader.load_csv(&path).unwrap();

        fs::write(&path, "Estado,ISA\nParaná,0.7\nBahia,0.4\n").unwrap();
        loader.clear();

        assert_eq!(loader.cached_len(), 0);
        assert_eq!(loader.load_csv(&path).unwrap().height(), 2);
    }

    #[test]
    fn missing_file_is_an_error_and_is_not_cached() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.csv");

        let mut loader = DataLoader::new();
        let err = loader.load_csv(&path).unwrap_err();

        assert!(matches!(err, LoaderError::CsvError { .. }));
        assert_eq!(loader.cached_len(), 0);
    }
}
