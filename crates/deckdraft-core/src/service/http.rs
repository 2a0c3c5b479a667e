//! HTTP implementation of [`SlideService`] against the external
//! PDF-to-presentation API.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Duration;

use crate::progress::ProgressTicker;
use crate::service::{
    EXTRACT_ENDPOINT, ExtractResponse, GENERATE_ENDPOINT, GenerateRequest, IMAGES_PREFIX,
    ProgressSender, SlideService, validate_pdf,
};
use crate::slide::Slide;
use crate::theme::SelectedTheme;
use crate::{ARTIFACT_FILENAME, DetailLevel, ServiceError};

/// Extraction cadence: +10 every 200ms, capped below 100.
const EXTRACT_STEP: u8 = 10;
const EXTRACT_INTERVAL: Duration = Duration::from_millis(200);

/// Generation cadence: +15 every 300ms.
const GENERATE_STEP: u8 = 15;
const GENERATE_INTERVAL: Duration = Duration::from_millis(300);

/// Gateway to the external extraction/generation service.
pub struct HttpSlideService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSlideService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self::with_client(base_url, client)
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a slide image asset.
    pub fn image_url(&self, filename: &str) -> String {
        format!("{}{}/{}", self.base_url, IMAGES_PREFIX, filename)
    }

    async fn extract_inner(
        &self,
        pdf_path: &Path,
        detail: DetailLevel,
    ) -> Result<Vec<Slide>, ServiceError> {
        let bytes = tokio::fs::read(pdf_path)
            .await
            .map_err(|source| ServiceError::Read {
                path: pdf_path.to_path_buf(),
                source,
            })?;
        let filename = pdf_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload.pdf".to_string());

        tracing::debug!(
            file = %filename,
            bytes = bytes.len(),
            detail = detail.value(),
            "submitting PDF for extraction"
        );

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename)
            .mime_str("application/pdf")?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("detail_level", detail.value().to_string());

        let response = self
            .client
            .post(format!("{}{}", self.base_url, EXTRACT_ENDPOINT))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(http_error(status.as_u16(), &body));
        }

        let parsed: ExtractResponse = serde_json::from_str(&body)?;
        tracing::info!(slides = parsed.slides.len(), "extraction complete");
        Ok(parsed.slides)
    }

    async fn generate_inner(
        &self,
        slides: &[Slide],
        theme: &SelectedTheme,
        dest_dir: &Path,
    ) -> Result<PathBuf, ServiceError> {
        tracing::debug!(
            slides = slides.len(),
            theme_type = theme.kind.as_str(),
            theme_name = %theme.name,
            "requesting presentation generation"
        );

        let request = GenerateRequest {
            slides,
            theme_type: theme.kind,
            theme_name: &theme.name,
        };
        let response = self
            .client
            .post(format!("{}{}", self.base_url, GENERATE_ENDPOINT))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Failure bodies are text or JSON diagnostics, not an artifact.
            let body = response.text().await.unwrap_or_default();
            return Err(http_error(status.as_u16(), &body));
        }

        let artifact = response.bytes().await?;
        let dest = dest_dir.join(ARTIFACT_FILENAME);
        tokio::fs::write(&dest, &artifact)
            .await
            .map_err(ServiceError::Save)?;
        tracing::info!(bytes = artifact.len(), path = %dest.display(), "presentation saved");
        Ok(dest)
    }
}

impl SlideService for HttpSlideService {
    fn extract<'a>(
        &'a self,
        pdf_path: &'a Path,
        detail: DetailLevel,
        progress: ProgressSender,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Slide>, ServiceError>> + Send + 'a>> {
        Box::pin(async move {
            // Synchronous reject: no request, no progress.
            validate_pdf(pdf_path)?;

            let ticker = ProgressTicker::start(progress, EXTRACT_STEP, EXTRACT_INTERVAL);
            match self.extract_inner(pdf_path, detail).await {
                Ok(slides) => {
                    ticker.finish().await;
                    Ok(slides)
                }
                Err(err) => {
                    ticker.fail().await;
                    Err(err)
                }
            }
        })
    }

    fn generate<'a>(
        &'a self,
        slides: &'a [Slide],
        theme: &'a SelectedTheme,
        dest_dir: &'a Path,
        progress: ProgressSender,
    ) -> Pin<Box<dyn Future<Output = Result<PathBuf, ServiceError>> + Send + 'a>> {
        Box::pin(async move {
            let ticker = ProgressTicker::start(progress, GENERATE_STEP, GENERATE_INTERVAL);
            match self.generate_inner(slides, theme, dest_dir).await {
                Ok(path) => {
                    ticker.finish().await;
                    Ok(path)
                }
                Err(err) => {
                    ticker.fail().await;
                    Err(err)
                }
            }
        })
    }
}

/// Build a [`ServiceError::Http`], preferring the server's `detail` field
/// when the body parses as `{"detail": ...}`, then the raw body text, then a
/// generic message.
fn http_error(status: u16, body: &str) -> ServiceError {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        detail: String,
    }

    let detail = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.detail)
        .unwrap_or_else(|_| body.trim().to_string());
    let detail = if detail.is_empty() {
        format!("request failed with status {status}")
    } else {
        detail
    };
    ServiceError::Http { status, detail }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_prefers_detail_field() {
        let err = http_error(500, r#"{"detail": "server exploded"}"#);
        assert_eq!(err.to_string(), "server exploded");
        match err {
            ServiceError::Http { status, .. } => assert_eq!(status, 500),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_http_error_falls_back_to_body_text() {
        let err = http_error(502, "bad gateway");
        assert_eq!(err.to_string(), "bad gateway");
    }

    #[test]
    fn test_http_error_generic_on_empty_body() {
        let err = http_error(500, "");
        assert_eq!(err.to_string(), "request failed with status 500");
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let service = HttpSlideService::new("http://127.0.0.1:8000/");
        assert_eq!(service.base_url(), "http://127.0.0.1:8000");
        assert_eq!(
            service.image_url("figure_2.png"),
            "http://127.0.0.1:8000/images/figure_2.png"
        );
    }

    #[tokio::test]
    async fn test_extract_rejects_non_pdf_without_progress() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slides.txt");
        std::fs::write(&path, "plain text").unwrap();

        // Unroutable base URL: if validation let this through, the call would
        // fail as Transport, not NotPdf.
        let service = HttpSlideService::new("http://127.0.0.1:1");
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let result = service.extract(&path, DetailLevel::Normal, tx).await;

        assert!(matches!(result, Err(ServiceError::NotPdf(_))));
        assert!(rx.try_recv().is_err());
    }
}
