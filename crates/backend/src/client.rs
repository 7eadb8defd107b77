use crate::error::BackendError;
use crate::upload::{build_form, UploadResponse, UploadedFile};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use shared::chat::{ChatReply, ChatRequest};
use shared::permit::PermitType;
use shared::settings::BackendConfig;
use std::sync::LazyLock;
use std::time::Duration;

static SHARED_HTTP: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .connect_timeout(Duration::from_secs(15))
        .pool_max_idle_per_host(2)
        .build()
        .expect("failed to build HTTP client")
});

/// The two calls the client makes against the analysis service.
#[async_trait]
pub trait PermitBackend: Send + Sync {
    async fn upload(
        &self,
        file: UploadedFile,
        permit_type: PermitType,
        modes: &[String],
    ) -> Result<UploadResponse, BackendError>;

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, BackendError>;
}

pub struct BackendClient {
    http: Client,
    config: BackendConfig,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            http: SHARED_HTTP.clone(),
            config,
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn timeout(&self) -> Duration {
        self.config.request_timeout
    }
}

#[async_trait]
impl PermitBackend for BackendClient {
    async fn upload(
        &self,
        file: UploadedFile,
        permit_type: PermitType,
        modes: &[String],
    ) -> Result<UploadResponse, BackendError> {
        let url = self.config.endpoint("api/upload");
        tracing::info!(
            file = %file.name,
            size = file.size,
            permit = %permit_type,
            ?modes,
            "uploading document"
        );

        let form = build_form(file, permit_type, modes)?;
        let resp = self
            .http
            .post(&url)
            .timeout(self.timeout())
            .multipart(form)
            .send()
            .await
            .map_err(|e| BackendError::from_reqwest(e, self.timeout()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(%status, "upload rejected by backend");
            return Err(BackendError::UploadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        if !content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
        {
            tracing::warn!(?content_type, "upload response is not JSON");
            return Err(BackendError::NotJson { content_type });
        }

        let text = resp
            .text()
            .await
            .map_err(|e| BackendError::from_reqwest(e, self.timeout()))?;
        let parsed = UploadResponse::from_json(serde_json::from_str(&text)?)?;
        tracing::debug!(
            has_metadata = parsed.metadata.is_some(),
            "parsed upload response"
        );
        Ok(parsed)
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, BackendError> {
        let url = self.config.endpoint("api/chat");
        tracing::info!(turns = request.messages.len(), "sending chat question");

        let resp = self
            .http
            .post(&url)
            .timeout(self.timeout())
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::from_reqwest(e, self.timeout()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BackendError::ChatStatus {
                status: status.as_u16(),
            });
        }

        let text = resp
            .text()
            .await
            .map_err(|e| BackendError::from_reqwest(e, self.timeout()))?;
        Ok(serde_json::from_str(&text)?)
    }
}
