//! Report Page
//! Draws a built report top to bottom in its fixed section order.

use crate::charts::{ChoroplethMap, RankingChart, MAP_TITLE, RANKING_TITLE};
use crate::report::{
    MapSection, Report, Section, TableView, CONCLUSIONS, CONCLUSIONS_HEADING, FOOTER, INTRO,
    MAP_ERROR_PREFIX, MAP_HEADING, MAP_INTRO, PAGE_TITLE, RANKING_HEADING, REMEDIATION_HINTS,
    REMEDIATION_TITLE, SUMMARY_HEADING, TABLE_HEADING,
};
use crate::stats::SummaryStats;
use egui::{Color32, RichText, ScrollArea};

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);
const INFO_COLOR: Color32 = Color32::from_rgb(100, 149, 237);
const SECTION_SPACING: f32 = 18.0;

fn subheader(ui: &mut egui::Ui, text: &str) {
    ui.add_space(SECTION_SPACING);
    ui.label(RichText::new(text).size(20.0).strong());
    ui.add_space(6.0);
}

pub fn show_report(ui: &mut egui::Ui, report: &mut Report) {
    ui.label(RichText::new(format!("🌱 {}", PAGE_TITLE)).size(28.0).strong());
    ui.add_space(8.0);
    ui.label(INTRO);

    for section in &mut report.sections {
        match section {
            Section::Table(table) => show_table(ui, table),
            Section::Ranking(chart) => show_ranking(ui, chart),
            Section::Summary(stats) => show_summary(ui, stats),
            Section::Map(map) => show_map(ui, map),
        }
    }

    // Nothing below a fatal error is drawn.
    if let Some(err) = &report.halted {
        ui.add_space(SECTION_SPACING);
        error_box(ui, &err.to_string());
        return;
    }

    subheader(ui, CONCLUSIONS_HEADING);
    for line in CONCLUSIONS {
        ui.label(format!("• {}", line));
    }

    ui.add_space(SECTION_SPACING);
    ui.separator();
    ui.label(RichText::new(FOOTER).size(11.0).color(Color32::GRAY));
}

fn show_table(ui: &mut egui::Ui, table: &mut TableView) {
    subheader(ui, TABLE_HEADING);
    let mut clicked = None;

    egui::Frame::none()
        .fill(ui.visuals().widgets.noninteractive.bg_fill)
        .rounding(5.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ScrollArea::both()
                .id_salt("isa_table")
                .max_height(380.0)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    egui::Grid::new("isa_table_grid")
                        .striped(true)
                        .min_col_width(60.0)
                        .spacing([12.0, 4.0])
                        .show(ui, |ui| {
                            for (i, name) in table.columns.iter().enumerate() {
                                let arrow = match table.sort {
                                    Some(sort) if sort.column == i && sort.descending => " ⏷",
                                    Some(sort) if sort.column == i => " ⏶",
                                    _ => "",
                                };
                                let header = RichText::new(format!("{}{}", name, arrow))
                                    .strong()
                                    .size(12.0);
                                if ui.button(header).clicked() {
                                    clicked = Some(i);
                                }
                            }
                            ui.end_row();

                            for row in &table.rows {
                                for cell in row {
                                    ui.label(RichText::new(cell).size(12.0));
                                }
                                ui.end_row();
                            }
                        });
                });
        });

    ui.label(
        RichText::new(format!("{} estados", table.rows.len()))
            .size(11.0)
            .color(Color32::GRAY),
    );

    if let Some(index) = clicked {
        table.toggle_sort(index);
    }
}

fn show_ranking(ui: &mut egui::Ui, chart: &RankingChart) {
    subheader(ui, RANKING_HEADING);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(RANKING_TITLE).size(14.0).strong());
    });
    chart.show(ui);
}

fn show_summary(ui: &mut egui::Ui, stats: &SummaryStats) {
    subheader(ui, SUMMARY_HEADING);
    let metrics = stats.metrics();
    ui.columns(metrics.len(), |cols| {
        for (col, (label, value)) in cols.iter_mut().zip(metrics.iter()) {
            col.label(RichText::new(*label).size(13.0).color(Color32::GRAY));
            col.label(RichText::new(value).size(30.0));
        }
    });
    ui.label(
        RichText::new(format!("Calculado sobre {} estados com ISA", stats.count))
            .size(11.0)
            .color(Color32::GRAY),
    );
}

fn show_map(ui: &mut egui::Ui, section: &MapSection) {
    subheader(ui, MAP_HEADING);
    ui.label(MAP_INTRO);
    ui.add_space(8.0);

    match section {
        MapSection::Ready(map) => show_choropleth(ui, map),
        MapSection::Failed { message } => {
            error_box(ui, &format!("{}: {}", MAP_ERROR_PREFIX, message));
            ui.add_space(6.0);
            egui::Frame::none()
                .stroke(egui::Stroke::new(1.0, INFO_COLOR))
                .rounding(5.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.label(RichText::new(REMEDIATION_TITLE).strong());
                    for (i, hint) in REMEDIATION_HINTS.iter().enumerate() {
                        ui.label(format!("{}. {}", i + 1, hint));
                    }
                });
        }
    }
}

fn show_choropleth(ui: &mut egui::Ui, map: &ChoroplethMap) {
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(MAP_TITLE).size(14.0).strong());
    });
    map.show(ui);
}

fn error_box(ui: &mut egui::Ui, message: &str) {
    egui::Frame::none()
        .fill(ERROR_COLOR.gamma_multiply(0.15))
        .stroke(egui::Stroke::new(1.0, ERROR_COLOR))
        .rounding(5.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.label(RichText::new(message).color(ERROR_COLOR));
        });
}
