//! GUI module - Window and report page

mod app;
mod page;

pub use app::IsaApp;
