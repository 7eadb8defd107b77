//! State carried from one screen to the next at navigation time.

use crate::payload::AnalysisPayload;
use crate::permit::{PermitType, SelectionState};
use std::sync::Arc;

/// Immutable value handed to the target screen's constructor.
///
/// The payload is shared, never mutated after the upload that produced it.
/// An empty handoff is what a screen sees when it was reached without going
/// through the upload flow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Handoff {
    pub payload: Option<Arc<AnalysisPayload>>,
    pub permit_type: Option<PermitType>,
    pub modes: Vec<String>,
}

impl Handoff {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Payload plus the selection that produced it.
    pub fn from_upload(payload: Option<Arc<AnalysisPayload>>, selection: &SelectionState) -> Self {
        Self {
            payload,
            permit_type: Some(selection.permit_type()),
            modes: selection.modes().to_vec(),
        }
    }

    /// Payload only; the selection context is not forwarded.
    pub fn payload_only(payload: Arc<AnalysisPayload>) -> Self {
        Self {
            payload: Some(payload),
            permit_type: None,
            modes: Vec::new(),
        }
    }

    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }
}
