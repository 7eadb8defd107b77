//! Drop zone for permit documents.
//!
//! Uses egui's dropped_files functionality. Any file type is accepted here;
//! only the picker applies a filter.

use egui::{Context, Id, Response, Sense, Ui, Vec2};
use std::path::{Path, PathBuf};

/// Handler for dropped permit documents.
pub struct DragDropHandler {
    /// Files that have been dropped
    dropped_files: Vec<PathBuf>,
    /// Whether files are currently being dragged over
    hovering: bool,
    /// ID for the drop zone
    id: Id,
}

impl DragDropHandler {
    /// Create a new drag and drop handler.
    pub fn new(id: impl std::hash::Hash) -> Self {
        Self {
            dropped_files: Vec::new(),
            hovering: false,
            id: Id::new(id),
        }
    }

    /// Capture hover state and dropped files for this frame.
    pub fn update(&mut self, ctx: &Context) {
        ctx.input(|i| {
            self.hovering = !i.raw.hovered_files.is_empty();

            for file in &i.raw.dropped_files {
                if let Some(path) = &file.path {
                    self.dropped_files.push(path.clone());
                }
            }
        });
    }

    /// Take and clear dropped files.
    pub fn take_dropped_files(&mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.dropped_files)
    }

    /// Check if there are any dropped files waiting to be processed.
    pub fn has_dropped_files(&self) -> bool {
        !self.dropped_files.is_empty()
    }

    /// Dashed-looking drop area. Clicking it is reported through the
    /// returned response so the caller can open the picker.
    pub fn show_drop_zone(&mut self, ui: &mut Ui, busy: bool) -> Response {
        let size = Vec2::new(ui.available_width(), 180.0);
        let sense = if busy { Sense::hover() } else { Sense::click() };
        let (rect, response) = ui.allocate_exact_size(size, sense);

        let accent = ui.visuals().selection.bg_fill;
        let visuals = if self.hovering || response.hovered() {
            ui.visuals().widgets.hovered
        } else {
            ui.visuals().widgets.inactive
        };

        ui.painter().rect(
            rect,
            8.0,
            if self.hovering {
                accent.gamma_multiply(0.15)
            } else {
                visuals.weak_bg_fill
            },
            egui::Stroke::new(2.0, if self.hovering { accent } else { visuals.bg_stroke.color }),
        );

        let (title, subtitle) = if busy {
            ("⏳ Uploading...", "")
        } else if self.hovering {
            ("📥 Drop to upload", "")
        } else {
            ("⬆ Drag & drop PDF/DOCX", "or click to browse")
        };

        ui.painter().text(
            rect.center() - Vec2::new(0.0, 10.0),
            egui::Align2::CENTER_CENTER,
            title,
            egui::FontId::proportional(18.0),
            if busy { accent } else { ui.visuals().strong_text_color() },
        );
        if !subtitle.is_empty() {
            ui.painter().text(
                rect.center() + Vec2::new(0.0, 16.0),
                egui::Align2::CENTER_CENTER,
                subtitle,
                egui::FontId::proportional(13.0),
                ui.visuals().weak_text_color(),
            );
        }

        if busy {
            response
        } else {
            response.on_hover_cursor(egui::CursorIcon::PointingHand)
        }
    }

    /// Full-window hint while files are dragged over the app.
    pub fn show_drag_overlay(&self, ctx: &Context) {
        if !self.hovering {
            return;
        }

        egui::Area::new(self.id.with("overlay"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_BOTTOM, Vec2::new(0.0, -24.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(egui::RichText::new("📥 Drop a permit document to analyze").strong());
                });
            });
    }
}

/// Short label for the file list.
pub fn file_type_label(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "pdf" => "PDF",
        "doc" | "docx" => "Document",
        _ => "File",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_starts_empty() {
        let mut handler = DragDropHandler::new("test");
        assert!(!handler.hovering);
        assert!(!handler.has_dropped_files());
        assert!(handler.take_dropped_files().is_empty());
    }

    #[test]
    fn test_dropped_files_are_collected_once() {
        let ctx = Context::default();
        let mut handler = DragDropHandler::new("drop");
        let input = egui::RawInput {
            dropped_files: vec![egui::DroppedFile {
                path: Some(PathBuf::from("/tmp/permit.pdf")),
                ..Default::default()
            }],
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| handler.update(ctx));

        assert!(handler.has_dropped_files());
        assert_eq!(handler.take_dropped_files(), [PathBuf::from("/tmp/permit.pdf")]);
        assert!(!handler.has_dropped_files());
    }

    #[test]
    fn test_file_type_label() {
        assert_eq!(file_type_label(Path::new("permit.PDF")), "PDF");
        assert_eq!(file_type_label(Path::new("lease.docx")), "Document");
        assert_eq!(file_type_label(Path::new("scan.png")), "File");
    }
}
