//! HTTP client for the permit analysis backend.
//!
//! Two endpoints: multipart `POST /api/upload` and JSON `POST /api/chat`.

pub mod client;
pub mod error;
pub mod upload;

pub use client::{BackendClient, PermitBackend};
pub use error::BackendError;
pub use upload::{format_file_size, UploadResponse, UploadedFile};
