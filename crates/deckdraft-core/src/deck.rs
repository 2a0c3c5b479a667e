//! The deck: an ordered slide collection plus the selection cursor, mutated
//! through a typed action set.

use crate::slide::{ContentKind, Slide};

/// One editor mutation. Every edit the UI can make is a variant here, so
/// transitions are testable without any rendering involved.
#[derive(Debug, Clone, PartialEq)]
pub enum DeckAction {
    SetTitle { index: usize, title: String },
    SetBullet { index: usize, bullet: usize, text: String },
    SetBullets { index: usize, bullets: Vec<String> },
    AddBullet { index: usize },
    RemoveBullet { index: usize, bullet: usize },
    SetTextBlock { index: usize, text: String },
    SetContentKind { index: usize, kind: ContentKind },
    RemoveImage { index: usize },
    AddSlide,
    DeleteSlide { index: usize },
    Select { index: usize },
    SelectNext,
    SelectPrev,
    /// Wholesale replacement from an extraction response.
    Replace { slides: Vec<Slide> },
    /// Explicit reset back to the empty state.
    Clear,
}

/// Ordered slide collection with a selection cursor.
///
/// Invariants: `cursor < len()` whenever the deck is non-empty (and 0 when
/// empty); deleting the only remaining slide is a no-op. Actions with
/// out-of-range indices change nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deck {
    slides: Vec<Slide>,
    cursor: usize,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slides(slides: Vec<Slide>) -> Self {
        Self { slides, cursor: 0 }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// The slide under the cursor.
    pub fn current(&self) -> Option<&Slide> {
        self.slides.get(self.cursor)
    }

    /// Apply one mutation.
    pub fn apply(&mut self, action: DeckAction) {
        match action {
            DeckAction::SetTitle { index, title } => {
                if let Some(slide) = self.slides.get_mut(index) {
                    slide.title = title;
                }
            }
            DeckAction::SetBullet {
                index,
                bullet,
                text,
            } => {
                if let Some(slide) = self.slides.get_mut(index) {
                    slide.set_bullet(bullet, text);
                }
            }
            DeckAction::SetBullets { index, bullets } => {
                if let Some(slide) = self.slides.get_mut(index) {
                    slide.set_bullets(bullets);
                }
            }
            DeckAction::AddBullet { index } => {
                if let Some(slide) = self.slides.get_mut(index) {
                    slide.add_bullet();
                }
            }
            DeckAction::RemoveBullet { index, bullet } => {
                if let Some(slide) = self.slides.get_mut(index) {
                    slide.remove_bullet(bullet);
                }
            }
            DeckAction::SetTextBlock { index, text } => {
                if let Some(slide) = self.slides.get_mut(index) {
                    slide.set_text_block(text);
                }
            }
            DeckAction::SetContentKind { index, kind } => {
                if let Some(slide) = self.slides.get_mut(index) {
                    slide.set_kind(kind);
                }
            }
            DeckAction::RemoveImage { index } => {
                if let Some(slide) = self.slides.get_mut(index) {
                    slide.remove_image();
                }
            }
            DeckAction::AddSlide => {
                self.slides.push(Slide::placeholder());
                self.cursor = self.slides.len() - 1;
            }
            DeckAction::DeleteSlide { index } => {
                // The last remaining slide cannot be deleted; emptiness is
                // reached only via Clear.
                if self.slides.len() > 1 && index < self.slides.len() {
                    self.slides.remove(index);
                    self.cursor = self.cursor.min(self.slides.len() - 1);
                }
            }
            DeckAction::Select { index } => {
                if index < self.slides.len() {
                    self.cursor = index;
                }
            }
            DeckAction::SelectNext => {
                if !self.slides.is_empty() {
                    self.cursor = (self.cursor + 1).min(self.slides.len() - 1);
                }
            }
            DeckAction::SelectPrev => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            DeckAction::Replace { slides } => {
                self.slides = slides;
                self.cursor = 0;
            }
            DeckAction::Clear => {
                self.slides.clear();
                self.cursor = 0;
            }
        }
    }
}
