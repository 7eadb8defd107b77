//! Grid for the optional `table` of an analysis mode.

use shared::payload::ModeAnalysis;

/// Headers come from the first row; every row is shown in its own value order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ModeTable {
    /// `None` when the mode has no rows.
    pub fn from_mode(mode: &ModeAnalysis) -> Option<Self> {
        if mode.table.is_empty() {
            return None;
        }
        Some(Self {
            headers: mode.headers(),
            rows: mode.rows(),
        })
    }

    pub fn ui(&self, ui: &mut egui::Ui, id_source: &str) {
        egui::ScrollArea::horizontal()
            .id_source(("mode_table_scroll", id_source))
            .auto_shrink([false, true])
            .show(ui, |ui| {
                egui::Grid::new(("mode_table", id_source))
                    .num_columns(self.headers.len())
                    .striped(true)
                    .min_col_width(80.0)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        for header in &self.headers {
                            ui.label(egui::RichText::new(header).strong().weak());
                        }
                        ui.end_row();

                        for row in &self.rows {
                            for cell in row {
                                ui.label(cell.as_str());
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
