//! Editor-surface state that lives beside the deck: pane focus, the slide
//! form's row model, in-progress text edits, and the status line.

use deckdraft_core::{ContentKind, Slide};

/// Which editor pane has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Form,
    Themes,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Self::Sidebar => Self::Form,
            Self::Form => Self::Themes,
            Self::Themes => Self::Sidebar,
        }
    }
}

/// One navigable row of the slide form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    Title,
    Bullet(usize),
    TextBlock,
    Image,
}

/// The form rows for a slide, in display order.
pub fn form_rows(slide: &Slide) -> Vec<FormRow> {
    let mut rows = vec![FormRow::Title];
    match slide.kind() {
        ContentKind::Bullets => {
            rows.extend((0..slide.bullets().len()).map(FormRow::Bullet));
        }
        ContentKind::TextBlock => rows.push(FormRow::TextBlock),
    }
    if slide.image_filename.is_some() {
        rows.push(FormRow::Image);
    }
    rows
}

/// What a text edit commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Title,
    Bullet(usize),
    TextBlock,
}

/// An in-progress text edit: buffer plus byte cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub target: EditTarget,
    pub buffer: String,
    pub cursor: usize,
}

impl EditState {
    pub fn new(target: EditTarget, initial: &str) -> Self {
        Self {
            target,
            buffer: initial.to_string(),
            cursor: initial.len(),
        }
    }

    /// Insert a character at the cursor; `'\x08'` deletes the char before it.
    pub fn input(&mut self, ch: char) {
        if ch == '\x08' {
            if self.cursor > 0 {
                let prev = self.buffer[..self.cursor]
                    .char_indices()
                    .next_back()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
            }
        } else {
            self.buffer.insert(self.cursor, ch);
            self.cursor += ch.len_utf8();
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.buffer.len() {
            self.cursor += self.buffer[self.cursor..]
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(0);
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.buffer.len() {
            let next = self.cursor
                + self.buffer[self.cursor..]
                    .chars()
                    .next()
                    .map(|c| c.len_utf8())
                    .unwrap_or(0);
            self.buffer.drain(self.cursor..next);
        }
    }
}

/// One-line feedback shown in the editor footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}
