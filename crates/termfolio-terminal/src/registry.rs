//! Static command table with exact and prefix lookup.
//!
//! Built once at startup and shared read-only afterwards. Names and
//! aliases are matched case-insensitively with whitespace runs collapsed,
//! so multi-word aliases such as `"sudo join"` behave like single words.

use termfolio_types::error::{Result, TermfolioError};

use crate::interpreter::Command;

struct Entry {
    command: Box<dyn Command>,
    /// Normalised alias keys (the name is matched separately).
    aliases: Vec<String>,
}

/// Ordered table of commands.
pub struct CommandRegistry {
    entries: Vec<Entry>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a command.
    ///
    /// Fails with [`TermfolioError::DuplicateName`] if the name or any
    /// alias collides with an existing name or alias, and with
    /// [`TermfolioError::InvalidName`] if the name is not already in
    /// canonical (lowercase, trimmed) form.
    pub fn register(&mut self, cmd: Box<dyn Command>) -> Result<()> {
        let name = cmd.name();
        if name.is_empty() || normalize(name) != name {
            return Err(TermfolioError::InvalidName(name.to_string()));
        }

        let mut aliases = Vec::with_capacity(cmd.aliases().len());
        for alias in cmd.aliases() {
            let key = normalize(alias);
            if key.is_empty() {
                return Err(TermfolioError::InvalidName(format!("{name}: empty alias")));
            }
            if key == name || aliases.contains(&key) {
                return Err(TermfolioError::DuplicateName(key));
            }
            aliases.push(key);
        }

        let keys = std::iter::once(name.to_string()).chain(aliases.iter().cloned());
        for key in keys {
            if self.entries.iter().any(|e| e.matches_exact(&key)) {
                return Err(TermfolioError::DuplicateName(key));
            }
        }

        log::debug!("registered command '{name}' (aliases: {aliases:?})");
        self.entries.push(Entry {
            command: cmd,
            aliases,
        });
        Ok(())
    }

    /// Resolve a token to a command by exact name, then by exact alias.
    pub fn resolve(&self, token: &str) -> Option<&dyn Command> {
        let key = normalize(token);
        if key.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.command.name() == key)
            .or_else(|| self.entries.iter().find(|e| e.aliases.contains(&key)))
            .map(|e| e.command.as_ref())
    }

    /// Every command whose name or any alias starts with `token`.
    ///
    /// Registration order; a command appears at most once however many of
    /// its keys match. A blank token matches nothing.
    pub fn prefix_matches(&self, token: &str) -> Vec<&dyn Command> {
        let key = normalize(token);
        if key.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|e| e.matches_prefix(&key))
            .map(|e| e.command.as_ref())
            .collect()
    }

    /// `(name, description)` pairs in registration order.
    pub fn list_commands(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.command.name(), e.command.description()))
            .collect()
    }

    /// Canonical names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.command.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Entry {
    fn matches_exact(&self, key: &str) -> bool {
        self.command.name() == key || self.aliases.iter().any(|a| a == key)
    }

    fn matches_prefix(&self, key: &str) -> bool {
        self.command.name().starts_with(key) || self.aliases.iter().any(|a| a.starts_with(key))
    }
}

/// Lowercase and collapse whitespace runs to single spaces.
pub fn normalize(token: &str) -> String {
    token
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
