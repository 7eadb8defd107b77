//! Full analysis result: info cards plus one section per analysis mode.

use crate::mode_table::ModeTable;
use crate::{badge, palette, PayloadView, ViewAction};
use shared::payload::{
    mode_title, AnalysisPayload, FieldGroup, FieldValue, CONTACT_INFO, GENERAL_INFO,
    NOT_MENTIONED, PROJECT_DETAILS,
};

#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow {
    pub key: &'static str,
    pub label: &'static str,
    pub value: FieldValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSection {
    pub title: &'static str,
    pub rows: Vec<FieldRow>,
}

impl FieldSection {
    pub fn from_group(group: FieldGroup, payload: &AnalysisPayload) -> Self {
        Self {
            title: group.title,
            rows: group
                .fields
                .iter()
                .map(|&(key, label)| FieldRow {
                    key,
                    label,
                    value: payload.field(key),
                })
                .collect(),
        }
    }

    pub fn row(&self, key: &str) -> Option<&FieldRow> {
        self.rows.iter().find(|r| r.key == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusBadge {
    pub label: String,
    pub tone: StatusTone,
}

impl StatusBadge {
    /// Green only for an issued permit; everything else, including a missing
    /// status, is a warning.
    pub fn from_payload(payload: &AnalysisPayload) -> Self {
        let tone = if payload.status() == Some("Issued") {
            StatusTone::Success
        } else {
            StatusTone::Warning
        };
        let label = match payload.field("status") {
            FieldValue::NotMentioned => NOT_MENTIONED.to_string(),
            value => value.display(),
        };
        Self { label, tone }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModeSection {
    pub key: String,
    pub title: String,
    pub summary: String,
    pub table: Option<ModeTable>,
    pub notes: Vec<String>,
}

/// View-model of the analysis screen.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisDocument {
    pub general: FieldSection,
    pub contact: FieldSection,
    pub project: FieldSection,
    pub status: StatusBadge,
    pub modes: Vec<ModeSection>,
}

impl AnalysisDocument {
    pub fn build(payload: &AnalysisPayload) -> Self {
        let modes = payload
            .analysis_modes()
            .into_iter()
            .map(|(key, mode)| ModeSection {
                title: mode_title(&key),
                summary: mode.summary.clone(),
                table: ModeTable::from_mode(&mode),
                notes: mode.notes,
                key,
            })
            .collect();

        Self {
            general: FieldSection::from_group(GENERAL_INFO, payload),
            contact: FieldSection::from_group(CONTACT_INFO, payload),
            project: FieldSection::from_group(PROJECT_DETAILS, payload),
            status: StatusBadge::from_payload(payload),
            modes,
        }
    }

    fn field_ui(ui: &mut egui::Ui, row: &FieldRow, status: Option<&StatusBadge>) {
        ui.label(egui::RichText::new(row.label).small().weak());
        match (&row.value, status) {
            (_, Some(status)) => {
                let color = match status.tone {
                    StatusTone::Success => palette::SUCCESS,
                    StatusTone::Warning => palette::WARNING,
                };
                badge(ui, &status.label, color, true);
            }
            (FieldValue::Tags(tags), None) => {
                ui.horizontal_wrapped(|ui| {
                    for tag in tags {
                        badge(ui, tag, palette::PRIMARY, false);
                    }
                });
            }
            (FieldValue::Text(text), None) => {
                ui.label(egui::RichText::new(text).strong());
            }
            (FieldValue::NotMentioned, None) => {
                ui.label(egui::RichText::new(NOT_MENTIONED).weak());
            }
        }
        ui.add_space(6.0);
    }

    fn section_ui(&self, ui: &mut egui::Ui, section: &FieldSection) {
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(14.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.heading(egui::RichText::new(section.title).color(palette::PRIMARY));
                ui.add_space(6.0);
                for row in &section.rows {
                    let status = (row.key == "status").then_some(&self.status);
                    Self::field_ui(ui, row, status);
                }
            });
    }

    fn mode_ui(ui: &mut egui::Ui, mode: &ModeSection) {
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(14.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.heading(egui::RichText::new(&mode.title).color(palette::PRIMARY));
                ui.label(mode.summary.as_str());

                if let Some(table) = &mode.table {
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new("Details Table").strong().weak());
                    table.ui(ui, &mode.key);
                }

                if !mode.notes.is_empty() {
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new("Notes").strong().weak());
                    for note in &mode.notes {
                        ui.label(format!("• {}", note));
                    }
                }
            });
    }
}

impl PayloadView for AnalysisDocument {
    fn from_payload(payload: &AnalysisPayload) -> Self {
        Self::build(payload)
    }

    fn ui(&mut self, ui: &mut egui::Ui) -> Option<ViewAction> {
        let mut action = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(egui::RichText::new("Permit Analysis").size(30.0).strong());
                    ui.label("Here's the detailed breakdown of your document");
                });
                ui.add_space(16.0);

                ui.columns(2, |cols| {
                    self.section_ui(&mut cols[0], &self.general);
                    self.section_ui(&mut cols[1], &self.contact);
                });
                ui.add_space(12.0);
                self.section_ui(ui, &self.project);

                for mode in &self.modes {
                    ui.add_space(12.0);
                    Self::mode_ui(ui, mode);
                }

                ui.add_space(16.0);
                ui.horizontal(|ui| {
                    if ui.button("Back to Dashboard").clicked() {
                        action = Some(ViewAction::GoHome);
                    }
                    if ui.button("📄 View Report").clicked() {
                        action = Some(ViewAction::ViewReport);
                    }
                    if ui.button("💬 Start Chat").clicked() {
                        action = Some(ViewAction::StartChat);
                    }
                });
            });

        action
    }
}
