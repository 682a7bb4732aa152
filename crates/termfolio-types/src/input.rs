//! Platform-agnostic input event types.
//!
//! The presentation layer maps its native keystrokes and clicks to these
//! variants. The terminal core never sees raw platform input.

/// A discrete UI event delivered to the input controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Character typed at the end of the buffer.
    TextInput(char),
    /// Backspace / delete-left.
    Backspace,
    /// Whole-buffer replacement (paste, programmatic set).
    Replace(String),
    /// Tab key: complete the current buffer.
    Tab,
    /// Enter key or the explicit "run" button.
    Enter,
    /// A suggestion entry was clicked.
    SuggestionClick(String),
    /// User requested quit (window close, EOF, etc.).
    Quit,
}
