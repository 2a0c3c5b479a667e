/// A user intent, decoupled from raw terminal events so the state machine
/// can be driven directly in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NavigateBack,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Enter: open a directory, start editing a field, pick a theme.
    DrillIn,
    /// Tab: cycle editor panes.
    NextPane,
    /// `a`: add a slide (sidebar) or a bullet row (form).
    AddItem,
    /// `d`: delete the selected slide or bullet row.
    DeleteItem,
    /// `t`: switch the slide between bullets and text-block content.
    ToggleContentKind,
    /// `x`: remove the slide's image reference.
    RemoveImage,
    /// `u`: back to the upload screen to pick another PDF.
    Upload,
    /// `n`: discard the deck and start over.
    Reset,
    /// `G`: generate and download the presentation.
    Generate,
    ToggleHelp,
    /// Text-input mode: a typed character (`'\x08'` is the backspace sentinel).
    Input(char),
    InputConfirm,
    InputCancel,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    DeleteForward,
    Tick,
    Resize(u16, u16),
    None,
}
