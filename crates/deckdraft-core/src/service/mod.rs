//! Service boundary: the two external HTTP operations (slide extraction and
//! presentation generation) behind one trait, plus the client-side checks
//! that run before any request is built.

pub mod http;
pub mod mock;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::ServiceError;
use crate::deck::Deck;
use crate::detail::DetailLevel;
use crate::slide::Slide;
use crate::theme::SelectedTheme;

pub use http::HttpSlideService;
pub use mock::MockSlideService;

/// Extraction endpoint path, relative to the service base URL.
pub const EXTRACT_ENDPOINT: &str = "/api/generate-slide-content";

/// Generation endpoint path.
pub const GENERATE_ENDPOINT: &str = "/api/generate-presentation";

/// Prefix under which slide image assets are served.
pub const IMAGES_PREFIX: &str = "/images";

/// Channel carrying synthetic progress values (0-100) for one call.
pub type ProgressSender = UnboundedSender<u8>;

/// Response body of the extraction endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub slides: Vec<Slide>,
}

/// Request body of the generation endpoint.
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub slides: &'a [Slide],
    pub theme_type: crate::theme::ThemeKind,
    pub theme_name: &'a str,
}

/// A backend that can turn a PDF into slides and slides into a presentation.
///
/// Both operations own the synthetic-progress contract: values sent on
/// `progress` are monotonically increasing while the call is outstanding,
/// end with exactly one 100 on success or one 0 on failure, and nothing is
/// sent after that. Neither operation retries.
pub trait SlideService: Send + Sync {
    /// Submit a PDF and a detail level; resolve with the extracted deck.
    /// Non-PDF input fails before any request is sent.
    fn extract<'a>(
        &'a self,
        pdf_path: &'a Path,
        detail: DetailLevel,
        progress: ProgressSender,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Slide>, ServiceError>> + Send + 'a>>;

    /// Submit the full deck and theme; write the returned artifact under
    /// `dest_dir` and resolve with the written path only after the hand-off
    /// completed.
    fn generate<'a>(
        &'a self,
        slides: &'a [Slide],
        theme: &'a SelectedTheme,
        dest_dir: &'a Path,
        progress: ProgressSender,
    ) -> Pin<Box<dyn Future<Output = Result<PathBuf, ServiceError>> + Send + 'a>>;
}

/// Caller-side guard for the generate operation: a theme must be selected
/// and the deck non-empty before the service is invoked at all.
pub fn generation_ready(deck: &Deck, theme: Option<&SelectedTheme>) -> Result<(), ServiceError> {
    if theme.is_none() {
        return Err(ServiceError::ThemeMissing);
    }
    if deck.is_empty() {
        return Err(ServiceError::EmptyDeck);
    }
    Ok(())
}

/// Reject non-PDF uploads before any network traffic: the extension must be
/// `.pdf` and the file must start with the `%PDF-` magic.
pub fn validate_pdf(path: &Path) -> Result<(), ServiceError> {
    let is_pdf_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !is_pdf_ext {
        return Err(ServiceError::NotPdf(path.to_path_buf()));
    }

    let mut magic = [0u8; 5];
    let mut file = std::fs::File::open(path).map_err(|source| ServiceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    use std::io::Read;
    file.read_exact(&mut magic)
        .map_err(|_| ServiceError::NotPdf(path.to_path_buf()))?;
    if &magic != b"%PDF-" {
        return Err(ServiceError::NotPdf(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeKind;
    use std::io::Write;

    #[test]
    fn test_validate_pdf_accepts_pdf_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"%PDF-1.7 rest of file").unwrap();
        assert!(validate_pdf(&path).is_ok());
    }

    #[test]
    fn test_validate_pdf_rejects_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"%PDF-1.7").unwrap();
        assert!(matches!(
            validate_pdf(&path),
            Err(ServiceError::NotPdf(_))
        ));
    }

    #[test]
    fn test_validate_pdf_rejects_wrong_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.pdf");
        std::fs::write(&path, b"PK\x03\x04 zip actually").unwrap();
        assert!(matches!(
            validate_pdf(&path),
            Err(ServiceError::NotPdf(_))
        ));
    }

    #[test]
    fn test_generation_ready_requires_theme_and_slides() {
        let empty = Deck::new();
        let full = Deck::from_slides(vec![Slide::placeholder()]);
        let theme = SelectedTheme::new(ThemeKind::Color, "modern_teal");

        assert!(matches!(
            generation_ready(&full, None),
            Err(ServiceError::ThemeMissing)
        ));
        assert!(matches!(
            generation_ready(&empty, Some(&theme)),
            Err(ServiceError::EmptyDeck)
        ));
        assert!(generation_ready(&full, Some(&theme)).is_ok());
    }

    #[test]
    fn test_generate_request_wire_shape() {
        let slides = vec![Slide::with_bullets("T", vec!["a".to_string()])];
        let request = GenerateRequest {
            slides: &slides,
            theme_type: ThemeKind::Background,
            theme_name: "blue_gradient",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["theme_type"], "background");
        assert_eq!(json["theme_name"], "blue_gradient");
        assert_eq!(json["slides"][0]["title"], "T");
    }
}
