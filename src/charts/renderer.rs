//! Static Chart Renderer
//! Writes the ranking chart and the choropleth map to PNG files with plotters.
//!
//! Layout of the map image:
//! 1. Title centered on top
//! 2. States filled by ISA, black outlines, centroid labels
//! 3. Horizontal color legend along the bottom

use super::choropleth::{ChoroplethMap, LEGEND_LABEL, MAP_TITLE};
use super::palette::{ColorScale, Rgb, OUTLINE, SINGLE_BAR};
use super::ranking::{RankingChart, RANKING_TITLE, RANKING_X_LABEL, RANKING_Y_LABEL};
use crate::report::{MapSection, Report, Section};
use anyhow::{Context, Result};
use geo::Coord;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};

pub const RANKING_FILE: &str = "ranking_isa.png";
pub const MAP_FILE: &str = "mapa_isa.png";
const LEGEND_HEIGHT: u32 = 90;
const LEGEND_STEPS: usize = 120;

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color[0], color[1], color[2])
}

/// Expand the bounding box so one data unit is equally long on both axes.
pub fn fit_aspect(lo: Coord<f64>, hi: Coord<f64>, width: u32, height: u32) -> (Coord<f64>, Coord<f64>) {
    let data_w = (hi.x - lo.x).max(f64::EPSILON);
    let data_h = (hi.y - lo.y).max(f64::EPSILON);
    let pixel_ratio = width.max(1) as f64 / height.max(1) as f64;

    let (w, h) = if data_w / data_h < pixel_ratio {
        (data_h * pixel_ratio, data_h)
    } else {
        (data_w, data_w / pixel_ratio)
    };
    let cx = (lo.x + hi.x) / 2.0;
    let cy = (lo.y + hi.y) / 2.0;

    (
        Coord {
            x: cx - w / 2.0,
            y: cy - h / 2.0,
        },
        Coord {
            x: cx + w / 2.0,
            y: cy + h / 2.0,
        },
    )
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render every exportable section of the report into `dir`.
    ///
    /// Returns the written files. A failed map section is skipped.
    pub fn export_report(report: &Report, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for section in &report.sections {
            match section {
                Section::Ranking(chart) => {
                    let path = dir.join(RANKING_FILE);
                    Self::render_ranking_png(chart, &path, (1000, 800))
                        .with_context(|| format!("Failed to render {}", path.display()))?;
                    written.push(path);
                }
                Section::Map(MapSection::Ready(map)) => {
                    let path = dir.join(MAP_FILE);
                    Self::render_map_png(map, &path, (1600, 1200))
                        .with_context(|| format!("Failed to render {}", path.display()))?;
                    written.push(path);
                }
                _ => {}
            }
        }

        log::info!("Exported {} chart(s) to {}", written.len(), dir.display());
        Ok(written)
    }

    pub fn render_ranking_png(chart: &RankingChart, path: &Path, size: (u32, u32)) -> Result<()> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let n = chart.bars.len().max(1);
        let values: Vec<f64> = chart.bars.iter().filter_map(|b| b.isa).collect();
        let x_min = values.iter().copied().fold(0.0, f64::min);
        let x_max = values.iter().copied().fold(0.0, f64::max);
        let x_max = if x_max > x_min { x_max * 1.05 } else { 1.0 };

        let labels: Vec<String> = chart.bars.iter().map(|b| b.state.clone()).collect();
        let label_for = |v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(i) if *i < labels.len() => labels[labels.len() - 1 - i].clone(),
            _ => String::new(),
        };

        let mut ctx = ChartBuilder::on(&root)
            .caption(RANKING_TITLE, ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(170)
            .build_cartesian_2d(x_min..x_max, (0..n).into_segmented())?;

        ctx.configure_mesh()
            .disable_y_mesh()
            .y_labels(n)
            .y_label_formatter(&label_for)
            .x_desc(RANKING_X_LABEL)
            .y_desc(RANKING_Y_LABEL)
            .draw()?;

        // Same grouping as the window: one series per region, then the rest.
        let mut groups: Vec<(String, Rgb)> = chart
            .regions
            .iter()
            .map(|g| (g.name.clone(), g.color))
            .collect();
        groups.push((String::new(), SINGLE_BAR));

        let last = chart.bars.len().saturating_sub(1);
        for (group_idx, (name, color)) in groups.iter().enumerate() {
            let is_rest = group_idx == groups.len() - 1;
            let style = rgb(*color).filled();
            let bars = chart.bars.iter().enumerate().filter(|(_, bar)| {
                let in_group = bar.region.as_deref() == Some(name.as_str());
                let grouped = bar
                    .region
                    .as_ref()
                    .is_some_and(|r| chart.regions.iter().any(|g| &g.name == r));
                if is_rest { !grouped } else { in_group }
            });

            let rects: Vec<_> = bars
                .filter_map(|(rank, bar)| {
                    let value = bar.isa?;
                    let y = last - rank;
                    Some(Rectangle::new(
                        [
                            (0.0, SegmentValue::Exact(y)),
                            (value, SegmentValue::Exact(y + 1)),
                        ],
                        style,
                    ))
                })
                .collect();
            if rects.is_empty() {
                continue;
            }

            let series = ctx.draw_series(rects)?;
            if !is_rest {
                let legend_color = rgb(*color);
                series.label(name.as_str()).legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 12, y + 5)], legend_color.filled())
                });
            }
        }

        if chart.is_grouped() {
            ctx.configure_series_labels()
                .position(SeriesLabelPosition::LowerRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }

    pub fn render_map_png(map: &ChoroplethMap, path: &Path, size: (u32, u32)) -> Result<()> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let (map_area, legend_area) = root.split_vertically(size.1.saturating_sub(LEGEND_HEIGHT) as i32);

        let (lo, hi) = map
            .bounds()
            .context("Map has no geometry to draw")?;
        let (lo, hi) = fit_aspect(lo, hi, size.0, size.1.saturating_sub(LEGEND_HEIGHT + 60));

        let mut ctx = ChartBuilder::on(&map_area)
            .caption(MAP_TITLE, ("sans-serif", 22).into_font().style(FontStyle::Bold))
            .margin(20)
            .build_cartesian_2d(lo.x..hi.x, lo.y..hi.y)?;

        let outline = rgb(OUTLINE).stroke_width(1);

        for region in &map.regions {
            for polygon in &region.geometry.0 {
                let exterior: Vec<(f64, f64)> =
                    polygon.exterior().coords().map(|c| (c.x, c.y)).collect();
                if let Some(fill) = region.fill {
                    ctx.draw_series(std::iter::once(Polygon::new(
                        exterior.clone(),
                        rgb(fill).filled(),
                    )))?;
                    for hole in polygon.interiors() {
                        let hole: Vec<(f64, f64)> = hole.coords().map(|c| (c.x, c.y)).collect();
                        ctx.draw_series(std::iter::once(Polygon::new(hole, WHITE.filled())))?;
                    }
                }
                ctx.draw_series(std::iter::once(PathElement::new(exterior, outline)))?;
                for hole in polygon.interiors() {
                    let hole: Vec<(f64, f64)> = hole.coords().map(|c| (c.x, c.y)).collect();
                    ctx.draw_series(std::iter::once(PathElement::new(hole, outline)))?;
                }
            }
        }

        let label_style = ("sans-serif", 13)
            .into_font()
            .style(FontStyle::Bold)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));

        ctx.draw_series(map.regions.iter().filter_map(|region| {
            let c = region.centroid?;
            let label = region.label();
            let mut lines = label.lines();
            let first = lines.next().unwrap_or_default().to_string();
            let second = lines.next().unwrap_or_default().to_string();
            Some(
                EmptyElement::at((c.x(), c.y()))
                    + Rectangle::new([(-22, -16), (22, 16)], WHITE.mix(0.7).filled())
                    + Text::new(first, (0, -7), label_style.clone())
                    + Text::new(second, (0, 7), label_style.clone()),
            )
        }))?;

        if let Some(scale) = map.scale {
            Self::draw_legend(&legend_area, scale)?;
        }

        root.present()?;
        Ok(())
    }

    fn draw_legend(
        area: &DrawingArea<BitMapBackend, Shift>,
        scale: ColorScale,
    ) -> Result<()> {
        let (w, _) = area.dim_in_pixel();
        let strip_w = (w as f64 * 0.8) as i32;
        let left = (w as i32 - strip_w) / 2;
        let step = strip_w as f64 / LEGEND_STEPS as f64;

        for (i, (_, color)) in scale.stops(LEGEND_STEPS).into_iter().enumerate() {
            let x0 = left + (i as f64 * step) as i32;
            let x1 = left + ((i + 1) as f64 * step).ceil() as i32;
            area.draw(&Rectangle::new([(x0, 10), (x1, 32)], rgb(color).filled()))?;
        }
        area.draw(&Rectangle::new(
            [(left, 10), (left + strip_w, 32)],
            BLACK.stroke_width(1),
        ))?;

        let tick_style = ("sans-serif", 14).into_font().color(&BLACK);
        area.draw(&Text::new(
            format!("{:.2}", scale.min),
            (left, 38),
            tick_style.clone(),
        ))?;
        area.draw(&Text::new(
            format!("{:.2}", scale.max),
            (left + strip_w - 30, 38),
            tick_style.clone(),
        ))?;
        area.draw(&Text::new(
            LEGEND_LABEL,
            (left + strip_w / 2, 62),
            tick_style.pos(Pos::new(HPos::Center, VPos::Top)),
        ))?;

        Ok(())
    }
}
