//! Data module - CSV and GeoJSON loading, column access, join

pub mod columns;
mod geometry;
mod join;
mod loader;
mod records;

pub use columns::ColumnError;
pub use geometry::{GeometryError, GeometryLoader, GeometryRecord};
pub use join::{left_join, JoinedRecord};
pub use loader::{DataLoader, LoaderError};
pub use records::StateRecord;
