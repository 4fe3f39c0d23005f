//! Ranking Chart Module
//! Horizontal ISA bars per state, highest first, grouped by region when known.

use super::palette::{self, Rgb};
use crate::config::{ISA_COLUMN, REGION_COLUMN, STATE_COLUMN};
use crate::data::columns::{self, ColumnError};
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Plot};
use polars::prelude::DataFrame;
use std::cmp::Ordering;

pub const RANKING_TITLE: &str = "Ranking de Sustentabilidade Agrícola - 2023";
pub const RANKING_X_LABEL: &str = "Índice de Sustentabilidade Agrícola (ISA)";
pub const RANKING_Y_LABEL: &str = "Estado";

#[derive(Debug, Clone, PartialEq)]
pub struct RankingBar {
    pub state: String,
    pub isa: Option<f64>,
    pub region: Option<String>,
}

/// A region and its color, in order of first appearance in the ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGroup {
    pub name: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingChart {
    pub bars: Vec<RankingBar>,
    /// Empty when the table has no region column.
    pub regions: Vec<RegionGroup>,
}

/// Descending by ISA, nulls last. Ties keep their input order.
fn descending(a: &Option<f64>, b: &Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl RankingChart {
    pub fn from_dataframe(df: &DataFrame) -> Result<Self, ColumnError> {
        let states = columns::string_column(df, STATE_COLUMN)?;
        let isa = columns::numeric_column(df, ISA_COLUMN)?;
        let regions = if columns::has_column(df, REGION_COLUMN) {
            Some(columns::string_column(df, REGION_COLUMN)?)
        } else {
            None
        };

        let bars = states
            .into_iter()
            .zip(isa)
            .enumerate()
            .map(|(i, (state, isa))| RankingBar {
                state: state.unwrap_or_default(),
                isa,
                region: regions.as_ref().and_then(|r| r[i].clone()),
            })
            .collect();

        Ok(Self::from_bars(bars, regions.is_some()))
    }

    /// Sort bars and assign region colors.
    pub fn from_bars(mut bars: Vec<RankingBar>, grouped: bool) -> Self {
        bars.sort_by(|a, b| descending(&a.isa, &b.isa));

        let mut names: Vec<String> = Vec::new();
        if grouped {
            for bar in &bars {
                if let Some(region) = &bar.region {
                    if !names.contains(region) {
                        names.push(region.clone());
                    }
                }
            }
        }

        let colors = palette::group_colors(names.len());
        let regions = names
            .into_iter()
            .zip(colors)
            .map(|(name, color)| RegionGroup { name, color })
            .collect();

        Self { bars, regions }
    }

    pub fn is_grouped(&self) -> bool {
        !self.regions.is_empty()
    }

    /// Color for a bar: its region color, or the single-series color.
    pub fn bar_color(&self, bar: &RankingBar) -> Rgb {
        bar.region
            .as_ref()
            .and_then(|r| self.regions.iter().find(|g| &g.name == r))
            .map(|g| g.color)
            .unwrap_or(palette::SINGLE_BAR)
    }

    /// Draw the chart; the highest bar is at the top.
    pub fn show(&self, ui: &mut egui::Ui) {
        let n = self.bars.len();
        let labels: Vec<String> = self.bars.iter().map(|b| b.state.clone()).collect();
        let position = move |rank: usize| (n - 1 - rank) as f64;

        // One series per region, plus a trailing one for bars without a region.
        let mut series: Vec<(String, Rgb, Vec<Bar>)> = self
            .regions
            .iter()
            .map(|g| (g.name.clone(), g.color, Vec::new()))
            .collect();
        series.push((ISA_COLUMN.to_string(), palette::SINGLE_BAR, Vec::new()));
        let ungrouped = series.len() - 1;

        for (rank, bar) in self.bars.iter().enumerate() {
            let Some(value) = bar.isa else { continue };
            let bucket = bar
                .region
                .as_ref()
                .and_then(|r| self.regions.iter().position(|g| &g.name == r))
                .unwrap_or(ungrouped);
            series[bucket].2.push(
                Bar::new(position(rank), value)
                    .name(format!("{}: {:.2}", bar.state, value))
                    .width(0.8),
            );
        }

        let mut plot = Plot::new("isa_ranking")
            .height((n as f32 * 22.0).max(200.0))
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(RANKING_X_LABEL)
            .y_axis_label(RANKING_Y_LABEL)
            .y_axis_formatter(move |mark, _range| {
                let value = mark.value.round();
                if (mark.value - value).abs() > 1e-6 || value < 0.0 {
                    return String::new();
                }
                let idx = value as usize;
                if idx < labels.len() {
                    labels[labels.len() - 1 - idx].clone()
                } else {
                    String::new()
                }
            });

        if self.is_grouped() {
            plot = plot.legend(Legend::default());
        }

        plot.show(ui, |plot_ui| {
            for (name, color, bars) in series {
                if bars.is_empty() {
                    continue;
                }
                let [r, g, b] = color;
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .horizontal()
                        .color(Color32::from_rgb(r, g, b))
                        .name(name),
                );
            }
        });
    }
}
