use deckdraft_core::{ContentKind, DeckAction, SelectedTheme, ThemeKind, generation_ready};

use super::{App, InputMode, Phase};
use crate::action::Action;
use crate::model::editor::{EditState, EditTarget, Focus, FormRow, StatusLine, form_rows};
use crate::tui_event::BackendCommand;

impl App {
    /// Process a user action and update state. Returns true if the app
    /// should quit.
    pub fn update(&mut self, action: Action) -> bool {
        // Quit confirmation modal — q confirms, Esc cancels
        if self.confirm_quit {
            match action {
                Action::Quit => {
                    self.should_quit = true;
                    return true;
                }
                Action::NavigateBack => {
                    self.confirm_quit = false;
                }
                Action::Tick => {
                    self.tick = self.tick.wrapping_add(1);
                    self.maybe_settle();
                }
                Action::Resize(_w, h) => {
                    self.visible_rows = (h as usize).saturating_sub(8);
                }
                _ => {}
            }
            return false;
        }

        // Help overlay
        if self.show_help {
            match action {
                Action::ToggleHelp | Action::NavigateBack => {
                    self.show_help = false;
                }
                Action::Quit => {
                    self.confirm_quit = true;
                }
                Action::Tick => {
                    self.tick = self.tick.wrapping_add(1);
                    self.maybe_settle();
                }
                _ => {}
            }
            return false;
        }

        // Global actions, independent of phase
        match action {
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                self.maybe_settle();
                return false;
            }
            Action::Resize(_w, h) => {
                self.visible_rows = (h as usize).saturating_sub(8);
                return false;
            }
            Action::Quit => {
                // Confirm when edits or an in-flight call would be lost.
                if self.deck.is_empty() && self.phase == Phase::Empty {
                    self.should_quit = true;
                    return true;
                }
                self.confirm_quit = true;
                return false;
            }
            Action::ToggleHelp => {
                self.show_help = true;
                return false;
            }
            _ => {}
        }

        // Text-input mode intercepts everything else
        if self.edit.is_some() {
            self.update_text_input(action);
            return false;
        }

        match self.phase {
            Phase::Empty => self.update_upload(action),
            Phase::Extracting | Phase::Generating => {
                // In-flight: the triggering controls are disabled; the call
                // always runs to completion or failure.
            }
            Phase::Editing => self.update_editing(action),
        }
        false
    }

    fn update_text_input(&mut self, action: Action) {
        let Some(edit) = self.edit.as_mut() else {
            return;
        };
        match action {
            Action::Input(ch) => edit.input(ch),
            Action::CursorLeft => edit.cursor_left(),
            Action::CursorRight => edit.cursor_right(),
            Action::CursorHome => edit.cursor_home(),
            Action::CursorEnd => edit.cursor_end(),
            Action::DeleteForward => edit.delete_forward(),
            Action::InputConfirm => {
                let edit = self.edit.take().unwrap();
                let index = self.deck.cursor();
                let deck_action = match edit.target {
                    EditTarget::Title => DeckAction::SetTitle {
                        index,
                        title: edit.buffer,
                    },
                    EditTarget::Bullet(bullet) => DeckAction::SetBullet {
                        index,
                        bullet,
                        text: edit.buffer,
                    },
                    EditTarget::TextBlock => DeckAction::SetTextBlock {
                        index,
                        text: edit.buffer,
                    },
                };
                self.deck.apply(deck_action);
                self.input_mode = InputMode::Normal;
            }
            Action::InputCancel => {
                self.edit = None;
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    /// Upload screen: browse for a PDF, adjust the detail level.
    fn update_upload(&mut self, action: Action) {
        match action {
            Action::MoveDown => {
                let last = self.file_picker.entries.len().saturating_sub(1);
                self.file_picker.cursor = (self.file_picker.cursor + 1).min(last);
                self.scroll_picker_into_view();
            }
            Action::MoveUp => {
                self.file_picker.cursor = self.file_picker.cursor.saturating_sub(1);
                self.scroll_picker_into_view();
            }
            Action::MoveLeft => {
                self.detail_level = self.detail_level.less();
                self.config.detail_level = self.detail_level;
                self.config.dirty = true;
            }
            Action::MoveRight => {
                self.detail_level = self.detail_level.more();
                self.config.detail_level = self.detail_level;
                self.config.dirty = true;
            }
            Action::DrillIn => {
                if self.file_picker.enter_directory() {
                    return;
                }
                let Some(entry) = self.file_picker.entries.get(self.file_picker.cursor) else {
                    return;
                };
                if entry.is_pdf {
                    self.start_extraction(entry.path.clone());
                } else {
                    // Client-side reject: nothing is sent to the service.
                    self.status = Some(StatusLine::error("Please choose a PDF file"));
                }
            }
            Action::NavigateBack => {
                // Re-upload was cancelled; an existing deck keeps editing.
                if !self.deck.is_empty() {
                    self.phase = Phase::Editing;
                }
            }
            _ => {}
        }
    }

    fn scroll_picker_into_view(&mut self) {
        let picker = &mut self.file_picker;
        let rows = self.visible_rows.max(1);
        if picker.cursor < picker.scroll_offset {
            picker.scroll_offset = picker.cursor;
        } else if picker.cursor >= picker.scroll_offset + rows {
            picker.scroll_offset = picker.cursor + 1 - rows;
        }
    }

    fn start_extraction(&mut self, path: std::path::PathBuf) {
        if let Some(tx) = &self.backend_cmd_tx {
            let _ = tx.send(BackendCommand::Extract {
                path: path.clone(),
                detail: self.detail_level,
            });
            self.pending_upload = Some(path);
            self.extract_progress = 0;
            self.status = None;
            self.phase = Phase::Extracting;
        }
    }

    /// Editing phase: sidebar, slide form, and theme picker.
    fn update_editing(&mut self, action: Action) {
        match action {
            Action::NextPane => {
                self.focus = self.focus.next();
            }
            Action::Upload => {
                self.file_picker.refresh_entries();
                self.phase = Phase::Empty;
            }
            Action::Reset => {
                // Explicit reset: discard the deck and theme, back to upload.
                self.deck.apply(DeckAction::Clear);
                self.selected_theme = None;
                self.focus = Focus::Sidebar;
                self.form_cursor = 0;
                self.file_picker.refresh_entries();
                self.status = Some(StatusLine::info("Deck discarded"));
                self.phase = Phase::Empty;
            }
            Action::Generate => {
                self.start_generation();
            }
            _ => match self.focus {
                Focus::Sidebar => self.update_sidebar(action),
                Focus::Form => self.update_form(action),
                Focus::Themes => self.update_themes(action),
            },
        }
    }

    fn update_sidebar(&mut self, action: Action) {
        match action {
            Action::MoveDown => {
                self.deck.apply(DeckAction::SelectNext);
                self.form_cursor = 0;
            }
            Action::MoveUp => {
                self.deck.apply(DeckAction::SelectPrev);
                self.form_cursor = 0;
            }
            Action::DrillIn | Action::MoveRight => {
                self.focus = Focus::Form;
            }
            Action::AddItem => {
                self.deck.apply(DeckAction::AddSlide);
                self.form_cursor = 0;
            }
            Action::DeleteItem => {
                if self.deck.len() == 1 {
                    self.status = Some(StatusLine::error("The last slide cannot be deleted"));
                } else {
                    self.deck.apply(DeckAction::DeleteSlide {
                        index: self.deck.cursor(),
                    });
                    self.form_cursor = 0;
                }
            }
            _ => {}
        }
    }

    fn update_form(&mut self, action: Action) {
        let index = self.deck.cursor();
        let Some(slide) = self.deck.current() else {
            return;
        };
        let rows = form_rows(slide);
        let row = rows.get(self.form_cursor).copied();
        let kind = slide.kind();

        match action {
            Action::MoveDown => {
                self.form_cursor = (self.form_cursor + 1).min(rows.len().saturating_sub(1));
            }
            Action::MoveUp => {
                self.form_cursor = self.form_cursor.saturating_sub(1);
            }
            Action::MoveLeft => {
                self.focus = Focus::Sidebar;
            }
            Action::DrillIn => {
                let slide = self.deck.current().expect("form focus requires a slide");
                self.edit = match row {
                    Some(FormRow::Title) => Some(EditState::new(EditTarget::Title, &slide.title)),
                    Some(FormRow::Bullet(i)) => Some(EditState::new(
                        EditTarget::Bullet(i),
                        slide.bullets().get(i).map(String::as_str).unwrap_or(""),
                    )),
                    Some(FormRow::TextBlock) => {
                        Some(EditState::new(EditTarget::TextBlock, slide.text_block()))
                    }
                    Some(FormRow::Image) | None => None,
                };
                if self.edit.is_some() {
                    self.input_mode = InputMode::TextInput;
                }
            }
            Action::AddItem => {
                self.deck.apply(DeckAction::AddBullet { index });
            }
            Action::DeleteItem => {
                if let Some(FormRow::Bullet(bullet)) = row {
                    self.deck.apply(DeckAction::RemoveBullet { index, bullet });
                    self.clamp_form_cursor();
                }
            }
            Action::ToggleContentKind => {
                let kind = match kind {
                    ContentKind::Bullets => ContentKind::TextBlock,
                    ContentKind::TextBlock => ContentKind::Bullets,
                };
                self.deck.apply(DeckAction::SetContentKind { index, kind });
                self.clamp_form_cursor();
            }
            Action::RemoveImage => {
                self.deck.apply(DeckAction::RemoveImage { index });
                self.clamp_form_cursor();
            }
            _ => {}
        }
    }

    fn clamp_form_cursor(&mut self) {
        if let Some(slide) = self.deck.current() {
            let last = form_rows(slide).len().saturating_sub(1);
            self.form_cursor = self.form_cursor.min(last);
        }
    }

    fn update_themes(&mut self, action: Action) {
        match action {
            Action::MoveLeft | Action::MoveRight => {
                self.theme_tab = match self.theme_tab {
                    ThemeKind::Color => ThemeKind::Background,
                    ThemeKind::Background => ThemeKind::Color,
                };
                self.theme_cursor = 0;
            }
            Action::MoveDown => {
                let last = self.catalog.count(self.theme_tab).saturating_sub(1);
                self.theme_cursor = (self.theme_cursor + 1).min(last);
            }
            Action::MoveUp => {
                self.theme_cursor = self.theme_cursor.saturating_sub(1);
            }
            Action::DrillIn => {
                let name = match self.theme_tab {
                    ThemeKind::Color => self
                        .catalog
                        .colors
                        .get(self.theme_cursor)
                        .map(|t| t.name.clone()),
                    ThemeKind::Background => self
                        .catalog
                        .backgrounds
                        .get(self.theme_cursor)
                        .map(|t| t.name.clone()),
                };
                if let Some(name) = name {
                    self.selected_theme = Some(SelectedTheme::new(self.theme_tab, name));
                }
            }
            _ => {}
        }
    }

    fn start_generation(&mut self) {
        if let Err(err) = generation_ready(&self.deck, self.selected_theme.as_ref()) {
            self.status = Some(StatusLine::error(err.to_string()));
            return;
        }
        let theme = self.selected_theme.clone().expect("guard checked theme");
        if let Some(tx) = &self.backend_cmd_tx {
            let _ = tx.send(BackendCommand::Generate {
                slides: self.deck.slides().to_vec(),
                theme,
            });
            self.generate_progress = 0;
            self.status = None;
            self.phase = Phase::Generating;
        }
    }
}
