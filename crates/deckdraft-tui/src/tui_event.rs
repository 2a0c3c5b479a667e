use std::path::PathBuf;

use deckdraft_core::{DetailLevel, SelectedTheme, Slide};

/// Commands sent from the TUI to the backend listener.
pub enum BackendCommand {
    /// Submit a PDF for slide extraction.
    Extract { path: PathBuf, detail: DetailLevel },
    /// Submit the deck and theme for presentation generation.
    Generate {
        slides: Vec<Slide>,
        theme: SelectedTheme,
    },
}

/// Events flowing from the backend tasks to the TUI.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    /// Synthetic extraction progress, 0-100.
    ExtractProgress(u8),
    /// Extraction resolved; the deck is replaced wholesale.
    ExtractFinished { slides: Vec<Slide> },
    ExtractFailed { error: String },
    /// Synthetic generation progress, 0-100.
    GenerateProgress(u8),
    /// Generation resolved; the artifact was written to `path`.
    GenerateFinished { path: PathBuf },
    GenerateFailed { error: String },
}
