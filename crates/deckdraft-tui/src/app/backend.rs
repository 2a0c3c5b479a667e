use deckdraft_core::DeckAction;

use super::{App, EXTRACT_SETTLE_TICKS, GENERATE_SETTLE_TICKS, Phase};
use crate::model::editor::{Focus, StatusLine};
use crate::tui_event::BackendEvent;

impl App {
    /// Process a backend event and update model state.
    ///
    /// Failures preserve the prior good state: the deck survives a failed
    /// extraction, and both deck and theme survive a failed generation, so
    /// the user can retry without re-entering anything.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::ExtractProgress(value) => {
                if self.phase == Phase::Extracting {
                    self.extract_progress = value;
                }
            }
            BackendEvent::ExtractFinished { slides } => {
                let count = slides.len();
                self.deck.apply(DeckAction::Replace { slides });
                self.focus = Focus::Sidebar;
                self.form_cursor = 0;
                self.extract_progress = 100;
                self.status = Some(StatusLine::info(format!("Extracted {count} slides")));
                self.settle_at = Some(self.tick + EXTRACT_SETTLE_TICKS);
            }
            BackendEvent::ExtractFailed { error } => {
                tracing::warn!(%error, "extraction failed");
                self.extract_progress = 0;
                self.status = Some(StatusLine::error(error));
                self.settle_at = Some(self.tick + EXTRACT_SETTLE_TICKS);
            }
            BackendEvent::GenerateProgress(value) => {
                if self.phase == Phase::Generating {
                    self.generate_progress = value;
                }
            }
            BackendEvent::GenerateFinished { path } => {
                self.generate_progress = 100;
                self.status = Some(StatusLine::info(format!("Saved to {}", path.display())));
                self.settle_at = Some(self.tick + GENERATE_SETTLE_TICKS);
            }
            BackendEvent::GenerateFailed { error } => {
                tracing::warn!(%error, "generation failed");
                self.generate_progress = 0;
                self.status = Some(StatusLine::error(error));
                self.settle_at = Some(self.tick + GENERATE_SETTLE_TICKS);
            }
        }
    }
}
