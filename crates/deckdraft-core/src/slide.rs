//! The slide record: a title, one active content representation, and an
//! optional image reference.

use serde::{Deserialize, Serialize};

/// Soft limit on title length; the editor warns past this, never blocks.
pub const TITLE_WORD_LIMIT: usize = 10;

/// Which content representation is active on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Bullets,
    TextBlock,
}

/// One presentation page.
///
/// Both content representations are retained internally; `kind` records
/// which one is active. Switching the kind destroys nothing; only an
/// explicit edit to one representation clears the other. The wire shape
/// (see [`WireSlide`]) carries the active representation alone, so a
/// serialized slide never has both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireSlide", into = "WireSlide")]
pub struct Slide {
    pub title: String,
    kind: ContentKind,
    bullets: Vec<String>,
    text_block: String,
    pub image_filename: Option<String>,
}

impl Slide {
    /// A bullets-mode slide.
    pub fn with_bullets(title: impl Into<String>, bullets: Vec<String>) -> Self {
        Self {
            title: title.into(),
            kind: ContentKind::Bullets,
            bullets,
            text_block: String::new(),
            image_filename: None,
        }
    }

    /// A text-block-mode slide.
    pub fn with_text(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: ContentKind::TextBlock,
            bullets: Vec::new(),
            text_block: text.into(),
            image_filename: None,
        }
    }

    /// The slide appended by the editor's "add slide" control.
    pub fn placeholder() -> Self {
        Self::with_bullets("New Slide Title", vec!["First bullet point".to_string()])
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// Active bullet list. Empty when the slide is in text-block mode.
    pub fn bullets(&self) -> &[String] {
        if self.kind == ContentKind::Bullets {
            &self.bullets
        } else {
            &[]
        }
    }

    /// Active text block. Empty when the slide is in bullets mode.
    pub fn text_block(&self) -> &str {
        if self.kind == ContentKind::TextBlock {
            &self.text_block
        } else {
            ""
        }
    }

    /// Replace the bullet list, activating bullets mode and clearing the
    /// text block.
    pub fn set_bullets(&mut self, bullets: Vec<String>) {
        self.kind = ContentKind::Bullets;
        self.bullets = bullets;
        self.text_block.clear();
    }

    /// Replace one bullet in place. Out-of-range indices are ignored.
    pub fn set_bullet(&mut self, index: usize, text: String) {
        if self.kind == ContentKind::Bullets
            && let Some(slot) = self.bullets.get_mut(index)
        {
            *slot = text;
        }
    }

    /// Append an empty bullet row (bullets mode only).
    pub fn add_bullet(&mut self) {
        if self.kind == ContentKind::Bullets {
            self.bullets.push(String::new());
        }
    }

    /// Remove a bullet row, keeping at least one so the form always has a
    /// row to edit.
    pub fn remove_bullet(&mut self, index: usize) {
        if self.kind == ContentKind::Bullets && self.bullets.len() > 1 && index < self.bullets.len()
        {
            self.bullets.remove(index);
        }
    }

    /// Replace the text block, activating text mode and clearing bullets.
    pub fn set_text_block(&mut self, text: String) {
        self.kind = ContentKind::TextBlock;
        self.text_block = text;
        self.bullets.clear();
    }

    /// Switch the active representation without destroying the inactive one.
    /// Entering bullets mode with nothing retained seeds a single empty
    /// bullet; entering text mode with nothing retained leaves an empty
    /// string.
    pub fn set_kind(&mut self, kind: ContentKind) {
        self.kind = kind;
        if kind == ContentKind::Bullets && self.bullets.is_empty() {
            self.bullets.push(String::new());
        }
    }

    pub fn remove_image(&mut self) {
        self.image_filename = None;
    }

    pub fn title_word_count(&self) -> usize {
        self.title.split_whitespace().count()
    }

    pub fn title_over_limit(&self) -> bool {
        self.title_word_count() > TITLE_WORD_LIMIT
    }
}

/// JSON shape shared with the external service: the active representation
/// only, absent fields omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireSlide {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    bullets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_block: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_filename: Option<String>,
}

impl From<WireSlide> for Slide {
    fn from(wire: WireSlide) -> Self {
        // Bullets win if a response carries both fields; the service never
        // sends both in practice.
        match (wire.bullets, wire.text_block) {
            (Some(bullets), _) => Slide {
                title: wire.title,
                kind: ContentKind::Bullets,
                bullets,
                text_block: String::new(),
                image_filename: wire.image_filename,
            },
            (None, Some(text)) => Slide {
                title: wire.title,
                kind: ContentKind::TextBlock,
                bullets: Vec::new(),
                text_block: text,
                image_filename: wire.image_filename,
            },
            (None, None) => Slide {
                title: wire.title,
                kind: ContentKind::Bullets,
                bullets: Vec::new(),
                text_block: String::new(),
                image_filename: wire.image_filename,
            },
        }
    }
}

impl From<Slide> for WireSlide {
    fn from(slide: Slide) -> Self {
        match slide.kind {
            ContentKind::Bullets => WireSlide {
                title: slide.title,
                bullets: Some(slide.bullets),
                text_block: None,
                image_filename: slide.image_filename,
            },
            ContentKind::TextBlock => WireSlide {
                title: slide.title,
                bullets: None,
                text_block: Some(slide.text_block),
                image_filename: slide.image_filename,
            },
        }
    }
}
