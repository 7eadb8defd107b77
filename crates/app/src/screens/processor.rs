//! Entry screen: pick a permit type and analysis modes, then upload.

use crate::router::Route;
use crate::uploader::Uploader;
use crate::widgets::drag_drop::file_type_label;
use crate::widgets::{DragDropHandler, FileFilter, FilePickerWidget};
use backend::PermitBackend;
use shared::permit::{PermitType, ANALYSIS_MODES};
use shared::SelectionState;
use std::path::PathBuf;
use std::sync::Arc;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);
const SUCCESS: egui::Color32 = egui::Color32::from_rgb(34, 197, 94);
const ERROR: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorStep {
    Options,
    Upload,
}

pub struct ProcessorScreen {
    step: ProcessorStep,
    selection: SelectionState,
    uploader: Uploader,
    drag_drop: DragDropHandler,
    picker: FilePickerWidget,
}

impl Default for ProcessorScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessorScreen {
    pub fn new() -> Self {
        Self {
            step: ProcessorStep::Options,
            selection: SelectionState::default(),
            uploader: Uploader::new(),
            drag_drop: DragDropHandler::new("permit_drop_zone"),
            picker: FilePickerWidget::new()
                .with_title("Select a permit document")
                .with_filter(FileFilter::permit_documents()),
        }
    }

    /// Move to the upload step. Refused while no mode is selected.
    pub fn continue_to_upload(&mut self) -> bool {
        if !self.selection.can_proceed() {
            return false;
        }
        self.step = ProcessorStep::Upload;
        true
    }

    pub fn back_to_options(&mut self) {
        self.step = ProcessorStep::Options;
    }

    pub fn submit_files(&mut self, paths: Vec<PathBuf>, backend: &Arc<dyn PermitBackend>) -> bool {
        self.uploader
            .start(paths, &self.selection, Arc::clone(backend))
    }

    pub fn poll(&mut self) -> bool {
        self.uploader.poll()
    }

    pub fn is_busy(&self) -> bool {
        self.uploader.is_uploading()
    }

    pub fn ui(
        &mut self,
        ctx: &egui::Context,
        ui: &mut egui::Ui,
        backend: &Arc<dyn PermitBackend>,
    ) -> Option<Route> {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match self.step {
                ProcessorStep::Options => {
                    self.options_ui(ui);
                    None
                }
                ProcessorStep::Upload => self.upload_ui(ctx, ui, backend),
            })
            .inner
    }

    fn options_ui(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(12.0);
            ui.label(egui::RichText::new("⚡ Breakthrough AI Technology").color(ACCENT));
            ui.heading(egui::RichText::new("Permit Review in Seconds, Not Days").size(34.0).strong());
            ui.label(
                "Rayfield Energy AI delivers breakthrough analysis of complex permit agreements, \
                 transforming weeks of manual legal review into seconds of intelligent extraction.",
            );
        });
        ui.add_space(20.0);

        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(16.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.heading("Select Permit Type");
                ui.add_space(8.0);
                ui.columns(PermitType::ALL.len(), |cols| {
                    for (col, permit) in cols.iter_mut().zip(PermitType::ALL) {
                        let selected = self.selection.permit_type() == permit;
                        let text = format!("{}\n{}", permit.icon(), permit.display_name());
                        if col
                            .add_sized([col.available_width(), 64.0], egui::SelectableLabel::new(selected, text))
                            .on_hover_text(permit.description())
                            .clicked()
                        {
                            self.selection.select_permit(permit);
                        }
                    }
                });
                ui.add_space(6.0);
                ui.label(egui::RichText::new(self.selection.permit_type().description()).weak());
            });

        ui.add_space(12.0);
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(16.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.heading("Analysis Modes");
                ui.label(egui::RichText::new("Choose one or more ways to analyze the permit").weak());
                ui.add_space(8.0);
                for mode in ANALYSIS_MODES {
                    let mut checked = self.selection.is_selected(mode.id);
                    if ui.checkbox(&mut checked, egui::RichText::new(mode.name).strong()).changed() {
                        self.selection.toggle_mode(mode.id);
                    }
                    ui.indent(mode.id, |ui| {
                        ui.label(egui::RichText::new(mode.description).small().weak());
                    });
                }
            });

        ui.add_space(16.0);
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(
                egui::RichText::new("Continue to Upload & Analyze Permit ➡").size(16.0),
            )
            .min_size(egui::vec2(280.0, 40.0));
            if ui.add_enabled(self.selection.can_proceed(), button).clicked() {
                self.continue_to_upload();
            }
            if !self.selection.can_proceed() {
                ui.label(egui::RichText::new("Select at least one analysis mode").small().weak());
            }
        });
    }

    fn upload_ui(
        &mut self,
        ctx: &egui::Context,
        ui: &mut egui::Ui,
        backend: &Arc<dyn PermitBackend>,
    ) -> Option<Route> {
        let mut route = None;
        let busy = self.uploader.is_uploading();

        self.drag_drop.update(ctx);
        self.drag_drop.show_drag_overlay(ctx);

        if ui
            .add_enabled(!busy, egui::Button::new("⬅ Back to Options"))
            .clicked()
        {
            self.back_to_options();
        }
        ui.add_space(8.0);
        ui.heading(egui::RichText::new("Upload Your Permit Documents").size(28.0).strong());
        ui.label(egui::RichText::new("Upload PDF or DOCX files to begin breakthrough AI analysis").weak());
        ui.add_space(12.0);

        let mut picked = Vec::new();
        if self.drag_drop.show_drop_zone(ui, busy).clicked() {
            picked = self.picker.pick_files();
        }
        if self.drag_drop.has_dropped_files() {
            picked = self.drag_drop.take_dropped_files();
        }
        if !picked.is_empty() {
            self.submit_files(picked, backend);
        }

        if !self.uploader.files().is_empty() {
            ui.add_space(12.0);
            ui.label(egui::RichText::new("Uploaded Files").strong());
            let mut remove = false;
            for file in self.uploader.files() {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new("📄").size(20.0));
                        ui.vertical(|ui| {
                            ui.label(egui::RichText::new(file.name.as_str()).strong());
                            ui.label(
                                egui::RichText::new(format!(
                                    "{} · {}",
                                    file_type_label(&file.path),
                                    file.size_label()
                                ))
                                .small()
                                .weak(),
                            );
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.add_enabled(!busy, egui::Button::new("✖")).clicked() {
                                remove = true;
                            }
                        });
                    });
                });
            }
            if remove {
                self.uploader.remove_file();
            }
        }

        if busy {
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(egui::RichText::new("Analyzing document...").color(ACCENT));
            });
        }

        if let Some(error) = self.uploader.error() {
            ui.add_space(12.0);
            ui.colored_label(ERROR, error);
        }

        if let Some(handoff) = self.uploader.completed() {
            ui.add_space(12.0);
            egui::Frame::group(ui.style())
                .inner_margin(egui::Margin::same(14.0))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(egui::RichText::new("● Analysis Complete! 🎉").color(SUCCESS).strong());
                    ui.label("Document processed and ready to review.");
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button("View Analysis").clicked() {
                            route = Some(Route::Analysis(handoff.clone()));
                        }
                        if ui.button("💬 Start Chat").clicked() {
                            route = Some(Route::Chat(handoff.clone()));
                        }
                    });
                });
        }

        route
    }
}
