pub mod client;
pub mod parse;
pub mod prompt;

pub use client::HttpReasoningClient;

use std::future::Future;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReasoningError {
    /// Quota or rate-limit signal from the service. Degrade to the local
    /// matcher; never retried.
    #[error("reasoning service rate limited")]
    RateLimited,
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("reasoning service error: status {status}")]
    Server { status: u16 },
    #[error("reasoning service returned an empty reply")]
    EmptyReply,
}

/// Seam for the external natural-language reasoning service. The engine only
/// ever submits a prompt and reads back free text; all protocol knowledge
/// lives in `prompt` and `parse`.
pub trait ReasoningService: Send + Sync {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, ReasoningError>> + Send;
}

impl<S: ReasoningService> ReasoningService for std::sync::Arc<S> {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, ReasoningError>> + Send {
        self.as_ref().complete(prompt)
    }
}
