//! Charts module - Chart models, window drawing and PNG export

mod choropleth;
mod palette;
mod ranking;
mod renderer;

pub use choropleth::{ChoroplethMap, MAP_TITLE};
pub use ranking::{RankingChart, RANKING_TITLE};
pub use renderer::StaticChartRenderer;
