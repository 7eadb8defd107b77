//! Print-oriented report: general, contact and project lines only.
//!
//! Printing is delegated to the host. The report is written out as a
//! standalone HTML page and opened with the system handler, which owns
//! pagination and "save as PDF".

use crate::analysis_view::FieldSection;
use crate::{palette, PayloadView, ViewAction};
use anyhow::{Context, Result};
use shared::payload::{AnalysisPayload, CONTACT_INFO, GENERAL_INFO, PROJECT_DETAILS};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub title: &'static str,
    /// (label, display text)
    pub lines: Vec<(&'static str, String)>,
}

impl From<FieldSection> for ReportSection {
    fn from(section: FieldSection) -> Self {
        Self {
            title: section.title,
            lines: section
                .rows
                .into_iter()
                .map(|row| (row.label, row.value.display()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub sections: Vec<ReportSection>,
    /// Last file written by the print action, shown as a hint.
    last_export: Option<PathBuf>,
    export_error: Option<String>,
}

impl ReportDocument {
    pub fn build(payload: &AnalysisPayload) -> Self {
        let sections = [GENERAL_INFO, CONTACT_INFO, PROJECT_DETAILS]
            .into_iter()
            .map(|group| FieldSection::from_group(group, payload).into())
            .collect();
        Self {
            sections,
            last_export: None,
            export_error: None,
        }
    }

    pub fn to_html(&self) -> String {
        let mut body = String::new();
        for section in &self.sections {
            body.push_str(&format!("<h2>{}</h2>\n<table>\n", escape_html(section.title)));
            for (label, value) in &section.lines {
                body.push_str(&format!(
                    "<tr><th>{}</th><td>{}</td></tr>\n",
                    escape_html(label),
                    escape_html(value)
                ));
            }
            body.push_str("</table>\n");
        }

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Permit Analysis Report</title>
<style>
body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; color: #1f2937; }}
h1 {{ text-align: center; color: #3b82f6; }}
h2 {{ color: #3b82f6; margin-top: 2rem; }}
table {{ width: 100%; border-collapse: collapse; }}
th, td {{ text-align: left; padding: 0.5rem 0; border-bottom: 1px solid #e5e7eb; }}
th {{ color: #6b7280; font-weight: 500; width: 40%; }}
</style>
</head>
<body onload="window.print()">
<h1>Permit Analysis Report</h1>
<p style="text-align:center">Generated {}</p>
{}</body>
</html>
"#,
            chrono::Local::now().format("%Y-%m-%d %H:%M"),
            body
        )
    }

    /// Write the report into `dir`, returning the file path.
    pub fn write_html(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating report folder {}", dir.display()))?;
        let name = format!(
            "permit-report-{}.html",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        );
        let path = dir.join(name);
        fs::write(&path, self.to_html())
            .with_context(|| format!("writing report to {}", path.display()))?;
        Ok(path)
    }

    /// Hand the report to the host's default handler for printing.
    pub fn print(&mut self) -> Result<PathBuf> {
        let path = self.write_html(&std::env::temp_dir())?;
        open::that(&path).with_context(|| format!("opening {}", path.display()))?;
        tracing::info!("report sent to system viewer: {}", path.display());
        self.last_export = Some(path.clone());
        Ok(path)
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

impl PayloadView for ReportDocument {
    fn from_payload(payload: &AnalysisPayload) -> Self {
        Self::build(payload)
    }

    fn ui(&mut self, ui: &mut egui::Ui) -> Option<ViewAction> {
        let mut action = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(
                        egui::RichText::new("Permit Analysis Report")
                            .size(28.0)
                            .color(palette::PRIMARY),
                    );
                    ui.label(egui::RichText::new("Clean summary of your uploaded document").weak());
                });
                ui.add_space(16.0);

                egui::Frame::group(ui.style())
                    .inner_margin(egui::Margin::same(16.0))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        for section in &self.sections {
                            ui.heading(egui::RichText::new(section.title).color(palette::PRIMARY));
                            egui::Grid::new(("report", section.title))
                                .num_columns(2)
                                .striped(true)
                                .spacing([24.0, 6.0])
                                .show(ui, |ui| {
                                    for (label, value) in &section.lines {
                                        ui.label(egui::RichText::new(*label).weak());
                                        ui.label(egui::RichText::new(value).strong());
                                        ui.end_row();
                                    }
                                });
                            ui.add_space(12.0);
                        }
                    });

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if ui.button("Back to Dashboard").clicked() {
                        action = Some(ViewAction::GoHome);
                    }
                    if ui.button("🖨 Print / Save as PDF").clicked() {
                        action = Some(ViewAction::Print);
                    }
                });

                if let Some(path) = &self.last_export {
                    ui.label(
                        egui::RichText::new(format!("Opened {}", path.display()))
                            .small()
                            .weak(),
                    );
                }
                if let Some(err) = &self.export_error {
                    ui.colored_label(egui::Color32::from_rgb(220, 38, 38), err.as_str());
                }
            });

        if action == Some(ViewAction::Print) {
            match self.print() {
                Ok(_) => self.export_error = None,
                Err(e) => {
                    tracing::warn!("print failed: {:#}", e);
                    self.export_error = Some(format!("Could not open the report: {}", e));
                }
            }
        }

        action
    }
}
