//! Terminal "no data" state for screens reached without a payload.

use crate::ViewAction;

/// A message plus one recovery action back to the entry screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoData {
    pub message: &'static str,
}

impl NoData {
    pub const ANALYSIS: NoData = NoData {
        message: "No analysis data available.",
    };
    pub const REPORT: NoData = NoData {
        message: "No report data available.",
    };
    pub const CHAT: NoData = NoData {
        message: "No permit data found for chat.",
    };

    pub const ACTION_LABEL: &'static str = "Back to Home";

    /// The only action this panel offers.
    pub fn recovery(&self) -> ViewAction {
        ViewAction::GoHome
    }

    pub fn ui(&self, ui: &mut egui::Ui) -> Option<ViewAction> {
        let mut action = None;
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.35);
            ui.label(egui::RichText::new(self.message).weak().size(16.0));
            ui.add_space(12.0);
            if ui.button(Self::ACTION_LABEL).clicked() {
                action = Some(self.recovery());
            }
        });
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::run_frame;

    #[test]
    fn test_every_fallback_goes_home() {
        for panel in [NoData::ANALYSIS, NoData::REPORT, NoData::CHAT] {
            assert_eq!(panel.recovery(), ViewAction::GoHome);
            run_frame(|ui| {
                assert_eq!(panel.ui(ui), None);
            });
        }
    }
}
