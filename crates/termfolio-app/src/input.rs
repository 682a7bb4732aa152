//! Map stdin lines to controller events.
//!
//! A plain terminal delivers whole lines, not keystrokes, so a few
//! conventions stand in for the keys a browser would see:
//!
//! - `text<TAB>` completes `text` (Tab key)
//! - `:suggest text` shows suggestions for `text` without running it
//! - `:reset` clears the session, `:quit` exits
//! - a blank line submits whatever is already in the buffer
//! - anything else is typed and submitted (Enter)

use termfolio_types::input::InputEvent;

/// What the main loop should do with one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    /// Feed these events to the controller in order.
    Events(Vec<InputEvent>),
    /// Full session reset.
    Reset,
}

pub fn parse_line(line: &str) -> LineAction {
    let line = line.trim_end_matches(['\r', '\n']);

    if let Some(partial) = line.strip_suffix('\t') {
        return LineAction::Events(vec![
            InputEvent::Replace(partial.to_string()),
            InputEvent::Tab,
        ]);
    }

    match line.trim() {
        ":quit" | ":q" | ":exit" => return LineAction::Events(vec![InputEvent::Quit]),
        ":reset" => return LineAction::Reset,
        _ => {},
    }

    if let Some(partial) = line.trim_start().strip_prefix(":suggest") {
        return LineAction::Events(vec![InputEvent::Replace(partial.trim_start().to_string())]);
    }

    if line.trim().is_empty() {
        return LineAction::Events(vec![InputEvent::Enter]);
    }

    LineAction::Events(vec![InputEvent::Replace(line.to_string()), InputEvent::Enter])
}
