//! Choropleth Map Module
//! States filled by ISA, labeled at their centroids, with a shared legend.

use super::palette::{ColorScale, Rgb, OUTLINE};
use crate::data::JoinedRecord;
use egui::{Color32, RichText, Stroke};
use egui_plot::{Line, Plot, PlotPoint, PlotPoints, Polygon, Text};
use geo::{Coord, MultiPolygon, Point, TriangulateEarcut};

pub const MAP_TITLE: &str =
    "Mapa de Calor - Índice de Sustentabilidade Agropecuária (ISA) - Brasil 2023";
pub const LEGEND_LABEL: &str = "Índice de Sustentabilidade Agropecuária (ISA)";
pub const OUTLINE_WIDTH: f32 = 1.0;
const LEGEND_STEPS: usize = 64;

/// One state as drawn on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapRegion {
    pub name: String,
    pub abbreviation: String,
    pub isa: Option<f64>,
    pub geometry: MultiPolygon<f64>,
    pub centroid: Option<Point<f64>>,
    /// `None` leaves the state unfilled (no ISA).
    pub fill: Option<Rgb>,
}

impl MapRegion {
    /// Two-line annotation: abbreviation, then ISA with two decimals.
    pub fn label(&self) -> String {
        match self.isa {
            Some(value) => format!("{}\n{:.2}", self.abbreviation, value),
            None => format!("{}\nN/A", self.abbreviation),
        }
    }

    fn rings(&self) -> impl Iterator<Item = Vec<[f64; 2]>> + '_ {
        self.geometry.0.iter().flat_map(|polygon| {
            std::iter::once(polygon.exterior())
                .chain(polygon.interiors())
                .map(|ring| ring.coords().map(|c| [c.x, c.y]).collect())
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethMap {
    pub regions: Vec<MapRegion>,
    /// `None` when no state has an ISA value.
    pub scale: Option<ColorScale>,
}

impl ChoroplethMap {
    pub fn from_joined(records: Vec<JoinedRecord>) -> Self {
        let scale = ColorScale::spanning(records.iter().filter_map(JoinedRecord::isa));

        let regions = records
            .into_iter()
            .map(|record| {
                let isa = record.isa();
                let centroid = record.geometry.centroid();
                let fill = match (isa, scale) {
                    (Some(v), Some(s)) => Some(s.color(v)),
                    _ => None,
                };
                MapRegion {
                    name: record.geometry.name.unwrap_or_default(),
                    abbreviation: record.geometry.abbreviation,
                    isa,
                    geometry: record.geometry.geometry,
                    centroid,
                    fill,
                }
            })
            .collect();

        Self { regions, scale }
    }

    /// Bounding box over every ring, as (min, max) corners.
    pub fn bounds(&self) -> Option<(Coord<f64>, Coord<f64>)> {
        self.regions
            .iter()
            .flat_map(|r| r.geometry.0.iter())
            .flat_map(|p| p.exterior().coords())
            .fold(None, |acc, c| match acc {
                None => Some((*c, *c)),
                Some((lo, hi)) => Some((
                    Coord {
                        x: lo.x.min(c.x),
                        y: lo.y.min(c.y),
                    },
                    Coord {
                        x: hi.x.max(c.x),
                        y: hi.y.max(c.y),
                    },
                )),
            })
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let outline = Color32::from_rgb(OUTLINE[0], OUTLINE[1], OUTLINE[2]);

        Plot::new("isa_choropleth")
            .height(600.0)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for region in &self.regions {
                    // egui only fills convex shapes, so fill triangle by triangle.
                    if let Some([r, g, b]) = region.fill {
                        let color = Color32::from_rgb(r, g, b);
                        for polygon in &region.geometry.0 {
                            for triangle in polygon.earcut_triangles_iter() {
                                let points: Vec<[f64; 2]> = triangle
                                    .to_array()
                                    .iter()
                                    .map(|c| [c.x, c.y])
                                    .collect();
                                plot_ui.polygon(
                                    Polygon::new(PlotPoints::from(points))
                                        .fill_color(color)
                                        .stroke(Stroke::NONE),
                                );
                            }
                        }
                    }

                    for ring in region.rings() {
                        plot_ui.line(
                            Line::new(PlotPoints::from(ring))
                                .color(outline)
                                .width(OUTLINE_WIDTH)
                                .name(&region.name),
                        );
                    }
                }

                for region in &self.regions {
                    if let Some(c) = region.centroid {
                        plot_ui.text(Text::new(
                            PlotPoint::new(c.x(), c.y()),
                            RichText::new(region.label())
                                .size(10.0)
                                .strong()
                                .color(Color32::BLACK)
                                .background_color(Color32::from_white_alpha(180)),
                        ));
                    }
                }
            });

        if let Some(scale) = self.scale {
            Self::show_legend(ui, scale);
        }
    }

    fn show_legend(ui: &mut egui::Ui, scale: ColorScale) {
        ui.vertical_centered(|ui| {
            let width = (ui.available_width() * 0.8).max(100.0);
            let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 16.0), egui::Sense::hover());
            let step = rect.width() / LEGEND_STEPS as f32;

            for (i, (_, [r, g, b])) in scale.stops(LEGEND_STEPS).into_iter().enumerate() {
                let x = rect.left() + i as f32 * step;
                let cell = egui::Rect::from_min_size(
                    egui::pos2(x, rect.top()),
                    egui::vec2(step + 0.5, rect.height()),
                );
                ui.painter().rect_filled(cell, 0.0, Color32::from_rgb(r, g, b));
            }
            ui.painter()
                .rect_stroke(rect, 0.0, Stroke::new(OUTLINE_WIDTH, Color32::BLACK));

            ui.horizontal(|ui| {
                ui.set_width(width);
                ui.label(format!("{:.2}", scale.min));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{:.2}", scale.max));
                });
            });
            ui.label(RichText::new(LEGEND_LABEL).size(12.0));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{GeometryRecord, StateRecord};
    use geo::polygon;

    fn joined(name: &str, abbreviation: &str, x: f64, isa: Option<f64>) -> JoinedRecord {
        JoinedRecord {
            geometry: GeometryRecord {
                name: Some(name.to_string()),
                abbreviation: abbreviation.to_string(),
                geometry: MultiPolygon(vec![polygon![
                    (x: x, y: 0.0),
                    (x: x + 2.0, y: 0.0),
                    (x: x + 2.0, y: 2.0),
                    (x: x, y: 2.0),
                    (x: x, y: 0.0),
                ]]),
            },
            state: isa.map(|v| StateRecord::new(name, Some(v))),
        }
    }

    #[test]
    fn labels_use_two_decimals() {
        let map = ChoroplethMap::from_joined(vec![joined("Paraná", "PR", 0.0, Some(0.714))]);
        assert_eq!(map.regions[0].label(), "PR\n0.71");
    }

    #[test]
    fn unmatched_region_gets_null_label_and_no_fill() {
        let map = ChoroplethMap::from_joined(vec![
            joined("Paraná", "PR", 0.0, Some(0.7)),
            joined("Acre", "AC", 5.0, None),
        ]);

        let acre = &map.regions[1];
        assert_eq!(acre.label(), "AC\nN/A");
        assert!(acre.fill.is_none());
        assert!(acre.centroid.is_some());
        assert!(map.regions[0].fill.is_some());
    }

    #[test]
    fn scale_spans_present_values() {
        let map = ChoroplethMap::from_joined(vec![
            joined("A", "AA", 0.0, Some(0.3)),
            joined("B", "BB", 3.0, Some(0.9)),
            joined("C", "CC", 6.0, None),
        ]);
        assert_eq!(map.scale, Some(ColorScale { min: 0.3, max: 0.9 }));
        assert_ne!(map.regions[0].fill, map.regions[1].fill);
    }

    #[test]
    fn centroid_sits_inside_the_square() {
        let map = ChoroplethMap::from_joined(vec![joined("A", "AA", 4.0, Some(0.5))]);
        let c = map.regions[0].centroid.unwrap();
        assert!((c.x() - 5.0).abs() < 1e-9);
        assert!((c.y() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn bounds_cover_all_regions() {
        let map = ChoroplethMap::from_joined(vec![
            joined("A", "AA", 0.0, Some(0.3)),
            joined("B", "BB", 3.0, Some(0.9)),
        ]);
        let (lo, hi) = map.bounds().unwrap();
        assert_eq!((lo.x, lo.y, hi.x, hi.y), (0.0, 0.0, 5.0, 2.0));
    }
}
