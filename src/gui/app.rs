//! ISA Report Main Application
//! Window with a small toolbar above the scrollable report page.

use crate::charts::StaticChartRenderer;
use crate::config::ReportConfig;
use crate::data::DataLoader;
use crate::gui::page;
use crate::report::Report;
use egui::{Color32, RichText, TopBottomPanel};

/// Main application window.
pub struct IsaApp {
    config: ReportConfig,
    loader: DataLoader,
    report: Report,
    status: String,
}

impl IsaApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: ReportConfig) -> Self {
        let mut loader = DataLoader::new();
        let report = Report::build(&mut loader, &config);
        Self {
            config,
            loader,
            report,
            status: "Ready".to_string(),
        }
    }

    /// Re-run the whole pipeline; only the primary CSV comes from the cache.
    fn handle_reload(&mut self) {
        self.report = Report::build(&mut self.loader, &self.config);
        self.status = format!("Report rebuilt ({} cached table(s))", self.loader.cached_len());
    }

    fn handle_clear_cache(&mut self) {
        self.loader.clear();
        self.handle_reload();
        self.status = "Cache cleared, report rebuilt".to_string();
    }

    fn handle_export(&mut self) {
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return; // User cancelled
        };

        match StaticChartRenderer::export_report(&self.report, &dir) {
            Ok(paths) if paths.is_empty() => {
                self.status = "No charts to export".to_string();
            }
            Ok(paths) => {
                self.status = format!("Exported {} image(s) to {}", paths.len(), dir.display());
                if let Err(e) = open::that(&dir) {
                    log::warn!("Could not open {}: {}", dir.display(), e);
                }
            }
            Err(e) => {
                log::error!("Export failed: {:#}", e);
                self.status = format!("Export error: {}", e);
            }
        }
    }
}

impl eframe::App for IsaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("🔄 Recarregar").clicked() {
                    self.handle_reload();
                }
                if ui.button("🧹 Limpar cache").clicked() {
                    self.handle_clear_cache();
                }
                if ui.button("💾 Exportar PNG").clicked() {
                    self.handle_export();
                }
                ui.separator();
                ui.label(RichText::new(&self.status).size(12.0).color(Color32::GRAY));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    page::show_report(ui, &mut self.report);
                });
        });
    }
}
