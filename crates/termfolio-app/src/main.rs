//! termfolio desktop entry point.
//!
//! Line-oriented front end for the terminal core: each stdin line is turned
//! into input events, the transcript is printed as it grows, and usage
//! events go to the configured collector.

mod input;
mod opener;
mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use input::LineAction;
use opener::DesktopOpener;
use termfolio_net::{HttpTransport, TelemetrySink};
use termfolio_terminal::{
    CommandInterpreter, CommandRegistry, EventResult, InputController, register_builtins,
};
use termfolio_types::config::TermfolioConfig;
use termfolio_types::input::InputEvent;
use termfolio_types::track::{EventTracker, payload};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;

    // A duplicate name or alias in the table is a programming error: abort.
    let mut registry = CommandRegistry::new();
    register_builtins(&mut registry, &config.profile, &config.candidate)?;

    // No beacon primitive exists outside a browser host; the keepalive
    // request path carries every event.
    let sink = Arc::new(TelemetrySink::new(
        &config.telemetry,
        None,
        Box::new(HttpTransport::new()),
    ));
    sink.dispatch("visit", payload([("surface", "cli")]));

    let interpreter = CommandInterpreter::new(Arc::new(registry), Box::new(DesktopOpener))
        .with_tracker(Arc::clone(&sink) as Arc<dyn EventTracker>);
    let mut controller = InputController::new(interpreter);

    run(&mut controller, io::stdin().lock(), io::stdout().lock())?;

    sink.dispatch("session_end", payload(std::iter::empty()));
    sink.flush(Duration::from_millis(config.telemetry.flush_timeout_ms));
    log::info!("termfolio shut down cleanly");
    Ok(())
}

/// Resolve the config from argv, `TERMFOLIO_CONFIG`, or built-in defaults.
fn load_config() -> Result<TermfolioConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TERMFOLIO_CONFIG").ok())
        .map(PathBuf::from);

    let mut config = match path {
        Some(path) => TermfolioConfig::load(&path)?,
        None => {
            log::info!("No config file given, using defaults");
            TermfolioConfig::default()
        },
    };
    config.apply_env();
    Ok(config)
}

/// Drive the controller from `input` until EOF or `:quit`.
fn run(controller: &mut InputController, reader: impl BufRead, mut out: impl Write) -> Result<()> {
    render::print_banner(&mut out)?;
    render::print_prompt(&mut out, controller.state())?;

    'running: for line in reader.lines() {
        let line = line?;
        let events = match input::parse_line(&line) {
            LineAction::Reset => {
                controller.reset();
                writeln!(out, "  (session reset)")?;
                Vec::new()
            },
            LineAction::Events(events) => events,
        };

        let mut show_state = false;
        for event in events {
            match event {
                InputEvent::Enter => {
                    let submitted = controller.state().buffer.trim().to_string();
                    if let Some(record) = controller.on_submit() {
                        render::print_record(&mut out, &submitted, record)?;
                    }
                    show_state = false;
                },
                other => {
                    if controller.handle_event(&other) == EventResult::Quit {
                        break 'running;
                    }
                    show_state = true;
                },
            }
        }
        if show_state {
            render::print_state(&mut out, controller.state())?;
        }
        render::print_prompt(&mut out, controller.state())?;
    }

    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use termfolio_terminal::NullOpener;

    use super::*;

    fn controller() -> InputController {
        let config = TermfolioConfig::default();
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry, &config.profile, &config.candidate).unwrap();
        InputController::new(CommandInterpreter::new(
            Arc::new(registry),
            Box::new(NullOpener),
        ))
    }

    fn session(script: &str) -> (InputController, String) {
        let mut c = controller();
        let mut out = Vec::new();
        run(&mut c, script.as_bytes(), &mut out).unwrap();
        (c, String::from_utf8(out).unwrap())
    }

    #[test]
    fn help_prints_available_commands() {
        let (c, out) = session("help\n");
        assert!(out.contains("$ help"));
        assert!(out.contains("Available commands:"));
        assert_eq!(c.transcript().len(), 1);
    }

    #[test]
    fn unknown_command_prints_fallback() {
        let (_, out) = session("foobar\n");
        assert!(out.contains("Unknown command. Try: help."));
    }

    #[test]
    fn tab_line_completes_without_running() {
        let (c, out) = session("l\t\n");
        assert!(out.contains("buffer: linkedin"));
        assert_eq!(c.state().buffer, "linkedin");
        assert!(c.transcript().is_empty());
    }

    #[test]
    fn enter_after_tab_runs_completion() {
        let (c, out) = session("l\t\n\n");
        assert_eq!(c.transcript().len(), 1);
        assert!(out.contains("$ linkedin"));
        assert_eq!(c.state().buffer, "");
    }

    #[test]
    fn quit_stops_processing() {
        let (c, _) = session(":quit\nhelp\n");
        assert!(c.transcript().is_empty());
    }

    #[test]
    fn reset_clears_transcript() {
        let (c, out) = session("help\n:reset\n");
        assert!(out.contains("(session reset)"));
        assert!(c.transcript().is_empty());
    }

    #[test]
    fn blank_lines_produce_nothing() {
        let (c, _) = session("\n   \n");
        assert!(c.transcript().is_empty());
    }
}
