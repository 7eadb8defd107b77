//! Screen routing.
//!
//! A navigation builds the target screen from the handoff and drops the
//! current one. Dropping a screen aborts whatever request it still had
//! outstanding, so late replies never reach a screen that is gone.

use crate::screens::{ChatScreen, ProcessorScreen};
use backend::PermitBackend;
use shared::Handoff;
use std::sync::Arc;
use viewers::{show_or_fallback, AnalysisDocument, NoData, PayloadView, ReportDocument, ViewAction};

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Processor,
    Analysis(Handoff),
    Report(Handoff),
    Chat(Handoff),
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Processor => "processor",
            Route::Analysis(_) => "analysis",
            Route::Report(_) => "report",
            Route::Chat(_) => "chat",
        }
    }

    /// Where an action picked inside a rendered view leads. `Print` stays put.
    pub fn for_action(action: ViewAction, handoff: &Handoff) -> Option<Route> {
        match action {
            ViewAction::GoHome => Some(Route::Processor),
            ViewAction::StartChat => Some(Route::Chat(handoff.clone())),
            ViewAction::ViewReport => Some(Route::Report(handoff.clone())),
            ViewAction::Print => None,
        }
    }
}

/// A payload renderer plus the handoff it was built from.
pub struct PayloadScreen<V> {
    handoff: Handoff,
    view: Option<V>,
}

impl<V: PayloadView> PayloadScreen<V> {
    pub fn new(handoff: Handoff) -> Self {
        let view = handoff.payload.as_deref().map(V::from_payload);
        Self { handoff, view }
    }

    fn ui(&mut self, ui: &mut egui::Ui, fallback: &NoData) -> Option<Route> {
        let action = show_or_fallback(self.view.as_mut(), fallback, ui)?;
        Route::for_action(action, &self.handoff)
    }
}

pub enum Screen {
    Processor(ProcessorScreen),
    Analysis(PayloadScreen<AnalysisDocument>),
    Report(PayloadScreen<ReportDocument>),
    Chat(ChatScreen),
}

impl Screen {
    pub fn build(route: Route) -> Self {
        match route {
            Route::Processor => Screen::Processor(ProcessorScreen::new()),
            Route::Analysis(handoff) => Screen::Analysis(PayloadScreen::new(handoff)),
            Route::Report(handoff) => Screen::Report(PayloadScreen::new(handoff)),
            Route::Chat(handoff) => Screen::Chat(ChatScreen::new(&handoff)),
        }
    }
}

pub struct Router {
    screen: Screen,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            screen: Screen::build(Route::Processor),
        }
    }

    pub fn navigate(&mut self, route: Route) {
        tracing::info!("navigating to {}", route.name());
        self.screen = Screen::build(route);
    }

    /// Drain finished requests. Returns true while a request is still out,
    /// so the caller keeps repainting.
    pub fn poll(&mut self) -> bool {
        match &mut self.screen {
            Screen::Processor(screen) => {
                screen.poll();
                screen.is_busy()
            }
            Screen::Chat(screen) => {
                screen.poll();
                screen.is_awaiting()
            }
            Screen::Analysis(_) | Screen::Report(_) => false,
        }
    }

    pub fn ui(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, backend: &Arc<dyn PermitBackend>) {
        let next = match &mut self.screen {
            Screen::Processor(screen) => screen.ui(ctx, ui, backend),
            Screen::Analysis(screen) => screen.ui(ui, &NoData::ANALYSIS),
            Screen::Report(screen) => screen.ui(ui, &NoData::REPORT),
            Screen::Chat(screen) => screen
                .ui(ui, backend)
                .and_then(|action| Route::for_action(action, &Handoff::empty())),
        };
        if let Some(route) = next {
            self.navigate(route);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::FakeBackend;
    use shared::{AnalysisPayload, SelectionState};
    use std::time::Duration;

    fn full_handoff() -> Handoff {
        let payload = AnalysisPayload::from_value(serde_json::json!({ "project_name": "Sunfield" })).unwrap();
        Handoff::from_upload(Some(Arc::new(payload)), &SelectionState::default())
    }

    #[test]
    fn test_actions_map_to_routes() {
        let handoff = full_handoff();
        assert_eq!(Route::for_action(ViewAction::GoHome, &handoff), Some(Route::Processor));
        assert_eq!(
            Route::for_action(ViewAction::StartChat, &handoff),
            Some(Route::Chat(handoff.clone()))
        );
        assert_eq!(
            Route::for_action(ViewAction::ViewReport, &handoff),
            Some(Route::Report(handoff.clone()))
        );
        assert_eq!(Route::for_action(ViewAction::Print, &handoff), None);
    }

    #[test]
    fn test_fallback_recovery_goes_home() {
        for fallback in [NoData::ANALYSIS, NoData::REPORT, NoData::CHAT] {
            assert_eq!(
                Route::for_action(fallback.recovery(), &Handoff::empty()),
                Some(Route::Processor)
            );
        }
    }

    #[test]
    fn test_empty_handoff_builds_fallback_screens() {
        let mut router = Router::new();
        assert!(matches!(&router.screen, Screen::Processor(_)));

        router.navigate(Route::Analysis(Handoff::empty()));
        match &router.screen {
            Screen::Analysis(screen) => assert!(screen.view.is_none()),
            _ => panic!("expected analysis screen"),
        }

        router.navigate(Route::Chat(Handoff::empty()));
        match &router.screen {
            Screen::Chat(screen) => assert!(screen.session().is_none()),
            _ => panic!("expected chat screen"),
        }
        assert!(!router.poll());
    }

    #[test]
    fn test_payload_screens_are_built() {
        let mut router = Router::new();
        router.navigate(Route::Chat(full_handoff()));
        match &router.screen {
            Screen::Chat(screen) => assert!(screen.session().is_some()),
            _ => panic!("expected chat screen"),
        }

        router.navigate(Route::Report(full_handoff()));
        match &router.screen {
            Screen::Report(screen) => assert!(screen.view.is_some()),
            _ => panic!("expected report screen"),
        }
    }

    #[test]
    fn test_leaving_chat_drops_pending_reply() {
        let fake = Arc::new(FakeBackend::new().with_delay(Duration::from_millis(200)));
        let backend: Arc<dyn PermitBackend> = fake.clone();
        let mut router = Router::new();
        router.navigate(Route::Chat(full_handoff()));
        match &mut router.screen {
            Screen::Chat(screen) => {
                screen.input = "Who is the operator?".into();
                assert!(screen.send(&backend));
            }
            _ => panic!("expected chat screen"),
        }
        assert!(router.poll());

        router.navigate(Route::Processor);
        std::thread::sleep(Duration::from_millis(400));
        assert!(!router.poll());
        assert!(matches!(&router.screen, Screen::Processor(_)));
    }

    #[test]
    fn test_leaving_processor_drops_pending_upload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("permit.pdf");
        std::fs::write(&path, b"pdf").unwrap();

        let fake = Arc::new(FakeBackend::new().with_delay(Duration::from_millis(200)));
        let backend: Arc<dyn PermitBackend> = fake.clone();
        let mut router = Router::new();
        match &mut router.screen {
            Screen::Processor(screen) => assert!(screen.submit_files(vec![path], &backend)),
            _ => panic!("expected processor screen"),
        }
        assert!(router.poll());

        router.navigate(Route::Report(Handoff::empty()));
        std::thread::sleep(Duration::from_millis(400));
        assert!(!router.poll());
        assert!(matches!(&router.screen, Screen::Report(_)));
    }
}
