use std::path::PathBuf;

use thiserror::Error;

pub mod deck;
pub mod detail;
pub mod progress;
pub mod service;
pub mod slide;
pub mod theme;

// Re-export for convenience
pub use deck::{Deck, DeckAction};
pub use detail::DetailLevel;
pub use progress::{PROGRESS_CEILING, PROGRESS_DONE, ProgressTicker};
pub use service::{HttpSlideService, SlideService, generation_ready, validate_pdf};
pub use slide::{ContentKind, Slide, TITLE_WORD_LIMIT};
pub use theme::{SelectedTheme, ThemeCatalog, ThemeKind};

/// Fixed filename for the downloaded presentation artifact.
pub const ARTIFACT_FILENAME: &str = "presentation.pptx";

/// Errors surfaced by the service boundary.
///
/// Validation variants are raised before any request is built; the rest map
/// one HTTP call's failure modes to a single human-readable message each.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The selected file is not a PDF. No request is sent.
    #[error("{} is not a PDF file", .0.display())]
    NotPdf(PathBuf),

    /// Generation was requested with no theme selected.
    #[error("no theme selected")]
    ThemeMissing,

    /// Generation was requested on an empty deck.
    #[error("the deck has no slides")]
    EmptyDeck,

    /// The server answered with a non-success status. `detail` carries the
    /// server-provided error text when the body had one, so callers can show
    /// it verbatim.
    #[error("{detail}")]
    Http { status: u16, detail: String },

    /// Network-level failure (DNS, refused connection, mid-body disconnect).
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The upload could not be read from disk.
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The artifact could not be written to disk.
    #[error("could not save presentation: {0}")]
    Save(std::io::Error),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Transport(err.to_string())
    }
}

impl ServiceError {
    /// True for errors caught before any network traffic.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ServiceError::NotPdf(_) | ServiceError::ThemeMissing | ServiceError::EmptyDeck
        )
    }
}
