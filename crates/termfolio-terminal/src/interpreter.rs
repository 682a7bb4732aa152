//! Command trait, execution context, and line interpretation.
//!
//! The interpreter resolves a submitted line against the registry, runs the
//! command, and always hands back an [`OutputRecord`]. Nothing on this path
//! returns an error to the caller: unresolved input becomes the fixed
//! unknown-command record and side-effect failures are logged and dropped.

use std::sync::Arc;

use termfolio_types::error::Result;
use termfolio_types::track::{EventTracker, TrackPayload, payload};

use crate::output::OutputRecord;
use crate::registry::CommandRegistry;

/// A single executable command.
pub trait Command: Send + Sync {
    /// Canonical name (lowercase, what `help` lists).
    fn name(&self) -> &str;

    /// Alternate spellings that resolve to this command.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Run the command.
    fn execute(&self, ctx: &CommandContext<'_>) -> OutputRecord;
}

/// Opens external resources (URLs, `mailto:` links) on behalf of commands.
pub trait ResourceOpener: Send + Sync {
    fn open(&self, target: &str) -> Result<()>;
}

/// Opener for headless sessions: records nothing, opens nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOpener;

impl ResourceOpener for NullOpener {
    fn open(&self, target: &str) -> Result<()> {
        log::debug!("headless session, not opening {target}");
        Ok(())
    }
}

/// Everything a command may touch while it runs.
pub struct CommandContext<'a> {
    /// The table the command was resolved from.
    pub registry: &'a CommandRegistry,
    opener: &'a dyn ResourceOpener,
    tracker: Option<&'a dyn EventTracker>,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        registry: &'a CommandRegistry,
        opener: &'a dyn ResourceOpener,
        tracker: Option<&'a dyn EventTracker>,
    ) -> Self {
        Self {
            registry,
            opener,
            tracker,
        }
    }

    /// Open an external resource. Failures are logged, never propagated.
    pub fn open(&self, target: &str) {
        if let Err(e) = self.opener.open(target) {
            log::warn!("failed to open {target}: {e}");
        }
    }

    /// Emit a usage event if a tracker is installed.
    pub fn track(&self, event: &str, payload: TrackPayload) {
        if let Some(tracker) = self.tracker {
            tracker.track(event, payload);
        }
    }
}

/// Resolves submitted lines and runs the matching command.
pub struct CommandInterpreter {
    registry: Arc<CommandRegistry>,
    opener: Box<dyn ResourceOpener>,
    tracker: Option<Arc<dyn EventTracker>>,
}

impl CommandInterpreter {
    pub fn new(registry: Arc<CommandRegistry>, opener: Box<dyn ResourceOpener>) -> Self {
        Self {
            registry,
            opener,
            tracker: None,
        }
    }

    /// Install a usage-event tracker.
    pub fn with_tracker(mut self, tracker: Arc<dyn EventTracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Interpret one submitted line.
    ///
    /// The whole trimmed line is tried first so compound aliases
    /// (`sudo join`) resolve; failing that, the first whitespace token is
    /// tried on its own. Anything else yields the unknown-command record.
    pub fn execute(&self, raw_line: &str) -> OutputRecord {
        let line = raw_line.trim();
        let first_token = line.split_whitespace().next().unwrap_or("");

        let resolved = self.registry.resolve(line).or_else(|| {
            if first_token.len() < line.len() {
                self.registry.resolve(first_token)
            } else {
                None
            }
        });

        let ctx = CommandContext::new(&self.registry, self.opener.as_ref(), self.tracker.as_deref());

        match resolved {
            Some(cmd) => {
                log::debug!("'{line}' resolved to '{}'", cmd.name());
                ctx.track("command", payload([("command", cmd.name())]));
                cmd.execute(&ctx)
            },
            None => {
                log::debug!("'{line}' did not resolve");
                ctx.track("command", payload([("command", "unknown")]));
                OutputRecord::unknown_command()
            },
        }
    }
}
