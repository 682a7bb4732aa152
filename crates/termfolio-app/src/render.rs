//! Plain-text painting of the transcript and prompt state.

use std::io::{self, Write};

use termfolio_terminal::{InputState, OutputRecord};

pub const BANNER: &[&str] = &[
    "termfolio -- type 'help' for commands",
    "Tab-complete with <partial><TAB>, ':suggest <partial>' to preview, ':quit' to exit",
];

pub fn print_banner(out: &mut impl Write) -> io::Result<()> {
    for line in BANNER {
        writeln!(out, "{line}")?;
    }
    writeln!(out)
}

pub fn print_prompt(out: &mut impl Write, state: &InputState) -> io::Result<()> {
    write!(out, "> {}", state.buffer)?;
    out.flush()
}

/// Echo the submitted line and the record it produced.
pub fn print_record(out: &mut impl Write, line: &str, record: &OutputRecord) -> io::Result<()> {
    writeln!(out, "$ {line}")?;
    for text in record.render_lines() {
        writeln!(out, "  {text}")?;
    }
    Ok(())
}

/// Show the buffer after a completion or preview, plus any open suggestions.
pub fn print_state(out: &mut impl Write, state: &InputState) -> io::Result<()> {
    writeln!(out, "  buffer: {}", state.buffer)?;
    if state.is_open {
        writeln!(out, "  suggestions: {}", state.suggestions.join("  "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_echoed_with_indent() {
        let mut out = Vec::new();
        print_record(&mut out, "foobar", &OutputRecord::unknown_command()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "$ foobar\n  Unknown command. Try: help.\n");
    }

    #[test]
    fn closed_suggestions_are_not_printed() {
        let mut out = Vec::new();
        let state = InputState {
            buffer: "linkedin".into(),
            suggestions: Vec::new(),
            is_open: false,
        };
        print_state(&mut out, &state).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "  buffer: linkedin\n");
    }

    #[test]
    fn open_suggestions_are_listed() {
        let mut out = Vec::new();
        let state = InputState {
            buffer: "mo".into(),
            suggestions: vec!["more".into(), "motivation".into()],
            is_open: true,
        };
        print_state(&mut out, &state).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("more  motivation"));
    }

    #[test]
    fn banner_mentions_help() {
        let mut out = Vec::new();
        print_banner(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("'help'"));
    }
}
