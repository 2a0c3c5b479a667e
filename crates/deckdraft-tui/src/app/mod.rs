mod backend;
mod update;

use std::path::PathBuf;

use tokio::sync::mpsc;

use deckdraft_core::{Deck, DetailLevel, SelectedTheme, ThemeCatalog, ThemeKind};

use crate::model::config::ConfigState;
use crate::model::editor::{EditState, Focus, StatusLine};
use crate::theme::Theme;
use crate::tui_event::BackendCommand;

/// Ticks (at the 100ms tick rate) the in-flight view lingers after the
/// terminal progress value, so the user sees the bar complete.
pub const EXTRACT_SETTLE_TICKS: usize = 5;
pub const GENERATE_SETTLE_TICKS: usize = 10;

/// Top-level editor state machine.
///
/// `Empty` shows the upload screen; the two in-flight phases disable all
/// editing; `Editing` is the sidebar + form + themes surface. A gateway
/// call settles back to `Editing`, or to `Empty` when the deck is still
/// empty, since an empty deck always routes to the upload screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Extracting,
    Editing,
    Generating,
}

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    TextInput,
}

/// A single entry in the PDF picker.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub is_pdf: bool,
}

/// State for the upload screen's file picker.
#[derive(Debug, Clone)]
pub struct FilePickerState {
    /// Current directory being browsed.
    pub current_dir: PathBuf,
    /// Entries in the current directory (dirs first, then files).
    pub entries: Vec<FileEntry>,
    /// Cursor position in the entries list.
    pub cursor: usize,
    /// Scroll offset for the entries list.
    pub scroll_offset: usize,
}

impl FilePickerState {
    pub fn new() -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let mut state = Self {
            current_dir,
            entries: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
        };
        state.refresh_entries();
        state
    }

    /// Refresh the entries list from the current directory.
    pub fn refresh_entries(&mut self) {
        let mut entries = Vec::new();

        // Parent directory entry
        if let Some(parent) = self.current_dir.parent() {
            entries.push(FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
                is_pdf: false,
            });
        }

        if let Ok(read_dir) = std::fs::read_dir(&self.current_dir) {
            let mut dirs = Vec::new();
            let mut files = Vec::new();

            for entry in read_dir.flatten() {
                let path = entry.path();
                let name = entry.file_name().to_string_lossy().to_string();

                // Skip hidden files/dirs
                if name.starts_with('.') {
                    continue;
                }

                if path.is_dir() {
                    dirs.push(FileEntry {
                        name,
                        path,
                        is_dir: true,
                        is_pdf: false,
                    });
                } else {
                    let is_pdf = path
                        .extension()
                        .and_then(|e| e.to_str())
                        .map(|e| e.eq_ignore_ascii_case("pdf"))
                        .unwrap_or(false);
                    files.push(FileEntry {
                        name,
                        path,
                        is_dir: false,
                        is_pdf,
                    });
                }
            }

            dirs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            files.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

            entries.extend(dirs);
            entries.extend(files);
        }

        self.entries = entries;
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    /// Enter the directory at cursor, or return false if not a directory.
    pub fn enter_directory(&mut self) -> bool {
        if let Some(entry) = self.entries.get(self.cursor)
            && entry.is_dir
        {
            self.current_dir = entry.path.clone();
            self.refresh_entries();
            return true;
        }
        false
    }
}

/// Main application state.
pub struct App {
    pub phase: Phase,
    pub deck: Deck,
    pub catalog: ThemeCatalog,
    pub selected_theme: Option<SelectedTheme>,
    pub detail_level: DetailLevel,

    pub focus: Focus,
    pub input_mode: InputMode,
    /// In-progress text edit (title / bullet / text block).
    pub edit: Option<EditState>,
    /// Cursor over the slide form's rows.
    pub form_cursor: usize,
    pub theme_tab: ThemeKind,
    pub theme_cursor: usize,

    pub extract_progress: u8,
    pub generate_progress: u8,
    /// Tick at which an in-flight phase flips back to its settled state.
    pub settle_at: Option<usize>,
    pub status: Option<StatusLine>,

    pub file_picker: FilePickerState,
    /// File currently being extracted (shown in the progress view).
    pub pending_upload: Option<PathBuf>,

    pub config: ConfigState,
    pub ui: Theme,
    pub tick: usize,
    pub visible_rows: usize,
    pub should_quit: bool,
    pub confirm_quit: bool,
    pub show_help: bool,

    /// Channel to send commands to the backend listener.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
}

impl App {
    pub fn new(catalog: ThemeCatalog, config: ConfigState, ui: Theme) -> Self {
        Self {
            phase: Phase::Empty,
            deck: Deck::new(),
            catalog,
            selected_theme: None,
            detail_level: config.detail_level,
            focus: Focus::Sidebar,
            input_mode: InputMode::Normal,
            edit: None,
            form_cursor: 0,
            theme_tab: ThemeKind::Color,
            theme_cursor: 0,
            extract_progress: 0,
            generate_progress: 0,
            settle_at: None,
            status: None,
            file_picker: FilePickerState::new(),
            pending_upload: None,
            config,
            ui,
            tick: 0,
            visible_rows: 20,
            should_quit: false,
            confirm_quit: false,
            show_help: false,
            backend_cmd_tx: None,
        }
    }

    // update() and the per-phase handlers are in update.rs
    // handle_backend_event() is in backend.rs

    /// The theme display name for the footer, if one is selected.
    pub fn selected_theme_label(&self) -> Option<String> {
        let selected = self.selected_theme.as_ref()?;
        Some(
            self.catalog
                .display_name(selected)
                .unwrap_or(&selected.name)
                .to_string(),
        )
    }

    /// Flip a settled in-flight phase back once the linger period elapsed.
    pub(super) fn maybe_settle(&mut self) {
        if let Some(at) = self.settle_at
            && self.tick >= at
        {
            self.settle_at = None;
            if matches!(self.phase, Phase::Extracting | Phase::Generating) {
                self.extract_progress = 0;
                self.generate_progress = 0;
                self.pending_upload = None;
                // An empty deck always routes back to the upload screen.
                self.phase = if self.deck.is_empty() {
                    Phase::Empty
                } else {
                    Phase::Editing
                };
            }
        }
    }

    /// Render the current screen.
    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();

        match self.phase {
            Phase::Empty => crate::view::upload::render_in(f, self, area),
            Phase::Extracting | Phase::Generating => {
                crate::view::progress::render_in(f, self, area)
            }
            Phase::Editing => crate::view::editor::render_in(f, self, area),
        }

        if self.show_help {
            crate::view::help::render(f, &self.ui);
        }

        if self.confirm_quit {
            crate::view::help::render_quit_confirm(f, &self.ui);
        }
    }
}

#[cfg(test)]
mod tests;
