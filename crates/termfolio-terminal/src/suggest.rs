//! Live suggestions for a partially typed buffer.

use std::sync::Arc;

use crate::registry::CommandRegistry;

/// Computes the suggestion list shown under the input field.
pub struct SuggestionEngine {
    registry: Arc<CommandRegistry>,
}

impl SuggestionEngine {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Canonical names of every command the buffer is a prefix of.
    ///
    /// Empty when the buffer is blank or already names a command (by name
    /// or alias): there is nothing left to suggest. Aliases are never
    /// returned, so accepting a suggestion always yields a resolvable name.
    pub fn suggest(&self, buffer: &str) -> Vec<String> {
        if buffer.trim().is_empty() || self.registry.resolve(buffer).is_some() {
            return Vec::new();
        }
        self.registry
            .prefix_matches(buffer)
            .into_iter()
            .map(|cmd| cmd.name().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{Command, CommandContext};
    use crate::output::OutputRecord;

    struct Named(&'static str, &'static [&'static str]);
    impl Command for Named {
        fn name(&self) -> &str {
            self.0
        }
        fn aliases(&self) -> &[&str] {
            self.1
        }
        fn description(&self) -> &str {
            ""
        }
        fn execute(&self, _ctx: &CommandContext<'_>) -> OutputRecord {
            OutputRecord::text(Vec::<String>::new())
        }
    }

    fn engine() -> SuggestionEngine {
        let mut reg = CommandRegistry::new();
        let table: [(&'static str, &'static [&'static str]); 6] = [
            ("help", &[]),
            ("linkedin", &[]),
            ("github", &["code"]),
            ("more", &["contact"]),
            ("motivation", &[]),
            ("start-time", &["sudo join"]),
        ];
        for (name, aliases) in table {
            reg.register(Box::new(Named(name, aliases))).unwrap();
        }
        SuggestionEngine::new(Arc::new(reg))
    }

    #[test]
    fn empty_buffer_has_no_suggestions() {
        let engine = engine();
        assert!(engine.suggest("").is_empty());
        assert!(engine.suggest("   ").is_empty());
    }

    #[test]
    fn partial_buffer_suggests_canonical_names() {
        let engine = engine();
        assert_eq!(engine.suggest("l"), vec!["linkedin"]);
        assert_eq!(engine.suggest("mo"), vec!["more", "motivation"]);
    }

    #[test]
    fn alias_prefix_suggests_canonical_name() {
        let engine = engine();
        assert_eq!(engine.suggest("co"), vec!["github", "more"]);
        assert_eq!(engine.suggest("sudo"), vec!["start-time"]);
    }

    #[test]
    fn exact_match_hides_suggestions() {
        let engine = engine();
        for name in engine.registry().names() {
            assert!(engine.suggest(name).is_empty(), "{name} still suggested");
        }
        assert!(engine.suggest("LinkedIn").is_empty());
    }

    #[test]
    fn exact_alias_hides_suggestions() {
        let engine = engine();
        assert!(engine.suggest("sudo join").is_empty());
        assert!(engine.suggest("code").is_empty());
    }

    #[test]
    fn prefix_of_longer_name_still_suggests() {
        // "more" is exact, but "mor" is a proper prefix of it.
        let engine = engine();
        assert_eq!(engine.suggest("mor"), vec!["more"]);
    }

    #[test]
    fn unknown_prefix_is_empty() {
        let engine = engine();
        assert!(engine.suggest("xyz").is_empty());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn proper_prefixes_always_suggest(idx in 0usize..6, cut in 1usize..10) {
                let engine = engine();
                let name = engine.registry().names()[idx].to_string();
                let cut = cut.min(name.len() - 1).max(1);
                let prefix = &name[..cut];
                let suggestions = engine.suggest(prefix);
                prop_assert!(!suggestions.is_empty());
                prop_assert!(suggestions.contains(&name));
            }
        }
    }
}
