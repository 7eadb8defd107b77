//! Chat about one analysed permit.

use crate::state::PendingRequest;
use backend::PermitBackend;
use shared::agent_api::{ChatMessage, Role};
use shared::chat::{ChatReply, ChatSession};
use shared::Handoff;
use std::sync::Arc;
use viewers::{NoData, ViewAction};

pub struct ChatScreen {
    /// `None` when the screen was reached without a payload.
    session: Option<ChatSession>,
    pub(crate) input: String,
    pending: Option<PendingRequest<ChatReply>>,
}

impl ChatScreen {
    pub fn new(handoff: &Handoff) -> Self {
        let session = ChatSession::from_handoff(handoff);
        match &session {
            Some(s) => tracing::info!(session = %s.id(), "chat opened"),
            None => tracing::warn!("chat opened without permit data"),
        }
        Self {
            session,
            input: String::new(),
            pending: None,
        }
    }

    pub fn session(&self) -> Option<&ChatSession> {
        self.session.as_ref()
    }

    pub fn is_awaiting(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_awaiting())
    }

    /// Send the current input. Blank input or a pending turn makes this a no-op.
    pub fn send(&mut self, backend: &Arc<dyn PermitBackend>) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(request) = session.begin_send(&self.input) else {
            return false;
        };
        self.input.clear();

        tracing::info!(session = %session.id(), "sending chat question");
        let backend = Arc::clone(backend);
        self.pending = Some(PendingRequest::spawn(async move {
            backend.chat(&request).await.map_err(|e| e.to_string())
        }));
        true
    }

    /// Apply the reply if it has arrived.
    pub fn poll(&mut self) -> bool {
        let Some(result) = self.pending.as_ref().and_then(|p| p.poll()) else {
            return false;
        };
        self.pending = None;
        match self.session.as_mut() {
            Some(session) => session.complete(result),
            None => false,
        }
    }

    fn message_ui(ui: &mut egui::Ui, message: &ChatMessage) {
        let user = message.role == Role::User;
        let (fill, text_color) = if user {
            (egui::Color32::from_rgb(59, 130, 246), egui::Color32::WHITE)
        } else {
            (ui.visuals().faint_bg_color, ui.visuals().text_color())
        };
        let layout = if user {
            egui::Layout::right_to_left(egui::Align::TOP)
        } else {
            egui::Layout::left_to_right(egui::Align::TOP)
        };

        ui.with_layout(layout, |ui| {
            egui::Frame::none()
                .fill(fill)
                .rounding(8.0)
                .inner_margin(egui::Margin::same(10.0))
                .show(ui, |ui| {
                    ui.set_max_width(ui.available_width() * 0.75);
                    ui.label(egui::RichText::new(message.content.as_str()).color(text_color));
                });
        });
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, backend: &Arc<dyn PermitBackend>) -> Option<ViewAction> {
        let Some(session) = self.session() else {
            return NoData::CHAT.ui(ui);
        };

        let mut action = None;
        let awaiting = session.is_awaiting();

        ui.vertical_centered(|ui| {
            ui.heading(
                egui::RichText::new("Permit Chat")
                    .size(28.0)
                    .strong()
                    .color(egui::Color32::from_rgb(59, 130, 246)),
            );
            ui.label(egui::RichText::new("Ask questions about the uploaded permit").weak());
        });
        ui.add_space(12.0);

        let transcript_height = (ui.available_height() - 90.0).max(160.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_source(("chat_transcript", session.id()))
                .max_height(transcript_height)
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for message in session.transcript() {
                        Self::message_ui(ui, message);
                        ui.add_space(4.0);
                    }
                    if awaiting {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label(egui::RichText::new("Thinking...").italics());
                        });
                    }
                });
        });

        ui.add_space(8.0);
        let mut submit = false;
        ui.horizontal(|ui| {
            let button_label = if awaiting { "Sending..." } else { "Send" };
            let can_send = !awaiting && !self.input.trim().is_empty();

            let input = ui.add(
                egui::TextEdit::singleline(&mut self.input)
                    .hint_text("Type your question...")
                    .desired_width(ui.available_width() - 90.0),
            );
            if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
                input.request_focus();
            }
            if ui
                .add_enabled(can_send, egui::Button::new(button_label))
                .clicked()
            {
                submit = true;
            }
        });

        ui.add_space(8.0);
        if ui.button("Back to Dashboard").clicked() {
            action = Some(ViewAction::GoHome);
        }

        if submit {
            self.send(backend);
        }
        action
    }
}
