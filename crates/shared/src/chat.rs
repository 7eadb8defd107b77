//! Chat session about one analysed permit.
//!
//! The session is a two-state machine. At most one request is outstanding:
//! [`ChatSession::begin_send`] refuses to start a turn while one is pending.

use crate::agent_api::ChatMessage;
use crate::handoff::Handoff;
use crate::payload::AnalysisPayload;
use crate::permit::PermitType;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;
use uuid::Uuid;

pub const GREETING: &str = "Hi! What would you like to know about this permit?";
pub const NO_ANSWER: &str = "I'm sorry, I couldn't find an answer.";
pub const FAILED_REPLY: &str = "Failed to get a response from AI.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingResponse,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub metadata: AnalysisPayload,
    pub messages: Vec<ChatMessage>,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permit_type: Option<PermitType>,
    pub analysis_modes: Vec<String>,
}

/// Response of `POST /api/chat`. A missing `answer` is not an error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub answer: Option<String>,
}

pub struct ChatSession {
    id: Uuid,
    payload: Arc<AnalysisPayload>,
    permit_type: Option<PermitType>,
    modes: Vec<String>,
    transcript: Vec<ChatMessage>,
    state: SessionState,
}

impl ChatSession {
    pub fn new(payload: Arc<AnalysisPayload>, permit_type: Option<PermitType>, modes: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            payload,
            permit_type,
            modes,
            transcript: vec![ChatMessage::assistant(GREETING)],
            state: SessionState::Idle,
        }
    }

    /// `None` when the handoff carries no payload; the chat never starts.
    pub fn from_handoff(handoff: &Handoff) -> Option<Self> {
        let payload = handoff.payload.clone()?;
        Some(Self::new(payload, handoff.permit_type, handoff.modes.clone()))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        self.state == SessionState::AwaitingResponse
    }

    pub fn payload(&self) -> &Arc<AnalysisPayload> {
        &self.payload
    }

    /// Start a turn. Returns the request to send, or `None` if the text is
    /// blank or a reply is still pending.
    pub fn begin_send(&mut self, text: &str) -> Option<ChatRequest> {
        if text.trim().is_empty() || self.is_awaiting() {
            return None;
        }

        self.transcript.push(ChatMessage::user(text));
        self.state = SessionState::AwaitingResponse;

        Some(ChatRequest {
            metadata: (*self.payload).clone(),
            messages: self.transcript.clone(),
            question: text.to_string(),
            permit_type: self.permit_type,
            analysis_modes: self.modes.clone(),
        })
    }

    /// Finish the pending turn. Returns false if nothing was pending.
    pub fn complete<E: Display>(&mut self, outcome: Result<ChatReply, E>) -> bool {
        if !self.is_awaiting() {
            tracing::debug!(session = %self.id, "ignoring chat reply with no pending turn");
            return false;
        }

        let content = match outcome {
            Ok(reply) => reply
                .answer
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| NO_ANSWER.to_string()),
            Err(e) => {
                tracing::warn!(session = %self.id, "chat request failed: {}", e);
                FAILED_REPLY.to_string()
            }
        };

        self.transcript.push(ChatMessage::assistant(content));
        self.state = SessionState::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent_api::Role;
    use serde_json::json;

    fn session() -> ChatSession {
        let payload = AnalysisPayload::from_value(json!({ "permit_type": "Solar" })).unwrap();
        ChatSession::new(
            Arc::new(payload),
            Some(PermitType::Solar),
            vec!["legal-review".into()],
        )
    }

    #[test]
    fn test_starts_with_greeting() {
        let s = session();
        assert_eq!(s.state(), SessionState::Idle);
        assert_eq!(s.transcript(), [ChatMessage::assistant(GREETING)]);
    }

    #[test]
    fn test_blank_message_is_noop() {
        let mut s = session();
        assert!(s.begin_send("").is_none());
        assert!(s.begin_send("   \n\t").is_none());
        assert_eq!(s.transcript().len(), 1);
        assert_eq!(s.state(), SessionState::Idle);
    }

    #[test]
    fn test_send_carries_full_context() {
        let mut s = session();
        let req = s.begin_send("When does it expire?").unwrap();

        assert!(s.is_awaiting());
        assert_eq!(req.question, "When does it expire?");
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[1].role, Role::User);
        assert_eq!(req.permit_type, Some(PermitType::Solar));

        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["metadata"]["permit_type"], "Solar");
        assert_eq!(body["permitType"], "solar");
        assert_eq!(body["analysisModes"], json!(["legal-review"]));
        assert_eq!(body["messages"][0]["role"], "assistant");
    }

    #[test]
    fn test_overlapping_send_rejected() {
        let mut s = session();
        assert!(s.begin_send("first").is_some());
        assert!(s.begin_send("second").is_none());
        assert_eq!(s.transcript().len(), 2);

        assert!(s.complete::<String>(Ok(ChatReply {
            answer: Some("done".into())
        })));
        assert!(s.begin_send("second").is_some());
        assert_eq!(s.transcript().len(), 4);
    }

    #[test]
    fn test_reply_appends_answer_or_fallback() {
        let mut s = session();
        s.begin_send("q1");
        s.complete::<String>(Ok(ChatReply {
            answer: Some("Expires 2030".into()),
        }));
        assert_eq!(s.transcript().last().unwrap().content, "Expires 2030");

        s.begin_send("q2");
        s.complete::<String>(Ok(ChatReply::default()));
        assert_eq!(s.transcript().last().unwrap().content, NO_ANSWER);
        assert_eq!(s.state(), SessionState::Idle);
    }

    #[test]
    fn test_failure_appends_fixed_message() {
        let mut s = session();
        s.begin_send("q");
        s.complete(Err("connection refused"));
        let last = s.transcript().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, FAILED_REPLY);
        assert_eq!(s.state(), SessionState::Idle);
    }

    #[test]
    fn test_stale_reply_ignored() {
        let mut s = session();
        assert!(!s.complete::<String>(Ok(ChatReply::default())));
        assert_eq!(s.transcript().len(), 1);
    }

    #[test]
    fn test_no_payload_no_session() {
        assert!(ChatSession::from_handoff(&Handoff::empty()).is_none());
        let handoff = Handoff::payload_only(Arc::new(AnalysisPayload::default()));
        let s = ChatSession::from_handoff(&handoff).unwrap();
        assert!(s.modes.is_empty());
        assert!(s.permit_type.is_none());
    }

    #[test]
    fn test_reply_decoding() {
        let reply: ChatReply = serde_json::from_str("{}").unwrap();
        assert!(reply.answer.is_none());
        let reply: ChatReply = serde_json::from_str(r#"{"answer":"yes","extra":1}"#).unwrap();
        assert_eq!(reply.answer.as_deref(), Some("yes"));
    }
}
