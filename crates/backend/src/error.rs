use std::path::PathBuf;
use std::time::Duration;

/// Transport-level failures talking to the analysis backend.
///
/// Every variant renders as a message fit to show next to the action that
/// triggered it.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Please upload at least one file.")]
    NoFile,

    #[error("Could not read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Backend upload failed (status {status}): {body}")]
    UploadStatus { status: u16, body: String },

    #[error("Chat API request failed (status {status})")]
    ChatStatus { status: u16 },

    #[error("Backend did not return JSON.")]
    NotJson { content_type: Option<String> },

    #[error("Backend returned malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Backend response was not a JSON object.")]
    InvalidEnvelope,

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
}

impl BackendError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            BackendError::Timeout(timeout)
        } else {
            BackendError::Network(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = BackendError::UploadStatus {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "Backend upload failed (status 500): boom");
        assert_eq!(
            BackendError::NotJson { content_type: None }.to_string(),
            "Backend did not return JSON."
        );
        assert_eq!(
            BackendError::Timeout(Duration::from_secs(120)).to_string(),
            "Request timed out after 120s"
        );
    }
}
