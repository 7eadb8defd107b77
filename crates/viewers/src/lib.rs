//! Renderers for Permit Desk
//!
//! This crate turns an analysis payload into something on screen:
//! - Analysis result (fixed info cards + one section per analysis mode)
//! - Printable report (general/contact/project lines only)
//! - Mode tables (grid with headers from the first row)
//! - The "no data" panel shown when a screen was reached without a payload
//!
//! Each renderer builds a plain view-model first, so the fallback rules can be
//! tested without a UI, then paints it with egui.

pub mod analysis_view;
pub mod fallback;
pub mod mode_table;
pub mod report_view;

use shared::payload::AnalysisPayload;

pub use analysis_view::AnalysisDocument;
pub use fallback::NoData;
pub use report_view::ReportDocument;

/// Something the user asked for from inside a rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    /// Back to the entry screen
    GoHome,
    StartChat,
    ViewReport,
    Print,
}

pub(crate) mod palette {
    use egui::Color32;

    pub const PRIMARY: Color32 = Color32::from_rgb(59, 130, 246);
    pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);
    pub const WARNING: Color32 = Color32::from_rgb(234, 179, 8);
}

/// Common trait for payload renderers
pub trait PayloadView {
    /// Build the view-model for a payload
    fn from_payload(payload: &AnalysisPayload) -> Self
    where
        Self: Sized;

    /// Render the view. Returns the action the user picked this frame, if any.
    fn ui(&mut self, ui: &mut egui::Ui) -> Option<ViewAction>;
}

/// Render `view`, or the fallback panel when there is nothing to show.
pub fn show_or_fallback<V: PayloadView>(
    view: Option<&mut V>,
    fallback: &NoData,
    ui: &mut egui::Ui,
) -> Option<ViewAction> {
    match view {
        Some(view) => view.ui(ui),
        None => fallback.ui(ui),
    }
}

/// Small rounded badge, used for array-valued fields and the status pill.
pub(crate) fn badge(ui: &mut egui::Ui, text: &str, color: egui::Color32, filled: bool) {
    let (fill, text_color) = if filled {
        (color, egui::Color32::WHITE)
    } else {
        (color.gamma_multiply(0.15), color)
    };
    egui::Frame::none()
        .fill(fill)
        .rounding(10.0)
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).small().color(text_color));
        });
}
