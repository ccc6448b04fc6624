//! HTTP backend for [`PdfRenderer`].
//!
//! Posts the serialized layout tree to the external render service (the
//! headless-browser pipeline), which materializes it and prints to PDF. The
//! service's own timeout governs the print; this client only bounds the
//! round trip and retries transient failures.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::export::PdfRenderer;
use crate::render::LayoutTree;

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum RenderClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("render service returned status {status}: {message}")]
    Service { status: u16, message: String },
}

/// Client for the external print-to-PDF service.
#[derive(Clone)]
pub struct HttpPdfRenderer {
    client: Client,
    base_url: String,
}

impl HttpPdfRenderer {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Posts the tree, retrying 429/5xx with exponential backoff.
    async fn call(&self, tree: &LayoutTree) -> Result<Vec<u8>, RenderClientError> {
        let url = format!("{}/render", self.base_url);
        let mut last_error: Option<RenderClientError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "render call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&url).json(tree).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(RenderClientError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("render service returned {status}: {body}");
                last_error = Some(RenderClientError::Service {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(RenderClientError::Service {
                    status: status.as_u16(),
                    message,
                });
            }

            let bytes = response.bytes().await?;
            debug!("render call succeeded: {} PDF bytes", bytes.len());
            return Ok(bytes.to_vec());
        }

        Err(last_error.unwrap_or(RenderClientError::Service {
            status: 0,
            message: "no attempts made".to_string(),
        }))
    }
}

#[async_trait]
impl PdfRenderer for HttpPdfRenderer {
    async fn render_pdf(&self, tree: &LayoutTree) -> Result<Vec<u8>, AppError> {
        self.call(tree)
            .await
            .map_err(|e| AppError::Renderer(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let renderer = HttpPdfRenderer::new("http://localhost:9100/".to_string());
        assert_eq!(renderer.base_url, "http://localhost:9100");
    }
}
