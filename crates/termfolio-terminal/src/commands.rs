//! Built-in commands for the termfolio terminal.

use termfolio_types::config::{CandidateInfo, ProfileLinks};
use termfolio_types::error::Result;
use termfolio_types::track::payload;

use crate::interpreter::{Command, CommandContext};
use crate::output::{ContactLink, OutputRecord};
use crate::registry::CommandRegistry;

/// Register the built-in command table.
///
/// Registration order is the tab-completion tie-break order, so keep the
/// most commonly used commands first.
pub fn register_builtins(
    reg: &mut CommandRegistry,
    profile: &ProfileLinks,
    candidate: &CandidateInfo,
) -> Result<()> {
    reg.register(Box::new(HelpCmd))?;
    reg.register(Box::new(AboutCmd {
        candidate: candidate.clone(),
    }))?;
    reg.register(Box::new(LinkedinCmd {
        url: profile.linkedin_url.clone(),
    }))?;
    reg.register(Box::new(GithubCmd {
        url: profile.github_url.clone(),
    }))?;
    reg.register(Box::new(EmailCmd {
        email: profile.contact_email.clone(),
    }))?;
    reg.register(Box::new(MoreCmd {
        profile: profile.clone(),
    }))?;
    reg.register(Box::new(MotivationCmd {
        lines: candidate.motivation.clone(),
    }))?;
    reg.register(Box::new(StartTimeCmd {
        candidate: candidate.clone(),
    }))?;
    log::info!("Registered {} built-in commands", reg.len());
    Ok(())
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

struct HelpCmd;
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn description(&self) -> &str {
        "List available commands"
    }
    fn execute(&self, ctx: &CommandContext<'_>) -> OutputRecord {
        let mut lines = vec!["Available commands:".to_string()];
        for (name, desc) in ctx.registry.list_commands() {
            lines.push(format!("  {name:12} {desc}"));
        }
        OutputRecord::TextLines(lines)
    }
}

// ---------------------------------------------------------------------------
// about
// ---------------------------------------------------------------------------

struct AboutCmd {
    candidate: CandidateInfo,
}
impl Command for AboutCmd {
    fn name(&self) -> &str {
        "about"
    }
    fn aliases(&self) -> &[&str] {
        &["whoami"]
    }
    fn description(&self) -> &str {
        "Who is behind this terminal"
    }
    fn execute(&self, _ctx: &CommandContext<'_>) -> OutputRecord {
        OutputRecord::text([
            self.candidate.name.clone(),
            self.candidate.role.clone(),
            "Type 'more' for contact details.".to_string(),
        ])
    }
}

// ---------------------------------------------------------------------------
// linkedin / github / email
// ---------------------------------------------------------------------------

struct LinkedinCmd {
    url: String,
}
impl Command for LinkedinCmd {
    fn name(&self) -> &str {
        "linkedin"
    }
    fn description(&self) -> &str {
        "Open the LinkedIn profile"
    }
    fn execute(&self, ctx: &CommandContext<'_>) -> OutputRecord {
        ctx.track("open_link", payload([("target", "linkedin")]));
        ctx.open(&self.url);
        OutputRecord::text([format!("Opening LinkedIn: {}", self.url)])
    }
}

struct GithubCmd {
    url: String,
}
impl Command for GithubCmd {
    fn name(&self) -> &str {
        "github"
    }
    fn aliases(&self) -> &[&str] {
        &["code"]
    }
    fn description(&self) -> &str {
        "Open the GitHub profile"
    }
    fn execute(&self, ctx: &CommandContext<'_>) -> OutputRecord {
        ctx.track("open_link", payload([("target", "github")]));
        ctx.open(&self.url);
        OutputRecord::text([format!("Opening GitHub: {}", self.url)])
    }
}

struct EmailCmd {
    email: String,
}
impl Command for EmailCmd {
    fn name(&self) -> &str {
        "email"
    }
    fn aliases(&self) -> &[&str] {
        &["mail"]
    }
    fn description(&self) -> &str {
        "Write an email"
    }
    fn execute(&self, ctx: &CommandContext<'_>) -> OutputRecord {
        ctx.track("open_link", payload([("target", "email")]));
        ctx.open(&mailto(&self.email));
        OutputRecord::text([format!("Email: {}", self.email)])
    }
}

// ---------------------------------------------------------------------------
// more
// ---------------------------------------------------------------------------

struct MoreCmd {
    profile: ProfileLinks,
}
impl Command for MoreCmd {
    fn name(&self) -> &str {
        "more"
    }
    fn aliases(&self) -> &[&str] {
        &["contact"]
    }
    fn description(&self) -> &str {
        "Show all contact links"
    }
    fn execute(&self, ctx: &CommandContext<'_>) -> OutputRecord {
        ctx.track("contact_view", payload(std::iter::empty()));
        let mut links = vec![
            ContactLink::new("LinkedIn", self.profile.linkedin_url.as_str()),
            ContactLink::new("GitHub", self.profile.github_url.as_str()),
            ContactLink::new("Email", mailto(&self.profile.contact_email)),
        ];
        if !self.profile.contact_phone.is_empty() {
            links.push(ContactLink::new(
                "Phone",
                format!("tel:{}", self.profile.contact_phone),
            ));
        }
        OutputRecord::ContactCard(links)
    }
}

// ---------------------------------------------------------------------------
// motivation
// ---------------------------------------------------------------------------

struct MotivationCmd {
    lines: Vec<String>,
}
impl Command for MotivationCmd {
    fn name(&self) -> &str {
        "motivation"
    }
    fn description(&self) -> &str {
        "Why I'm here"
    }
    fn execute(&self, _ctx: &CommandContext<'_>) -> OutputRecord {
        if self.lines.is_empty() {
            return OutputRecord::text(["I need a job."]);
        }
        OutputRecord::TextLines(self.lines.clone())
    }
}

// ---------------------------------------------------------------------------
// start-time
// ---------------------------------------------------------------------------

struct StartTimeCmd {
    candidate: CandidateInfo,
}
impl Command for StartTimeCmd {
    fn name(&self) -> &str {
        "start-time"
    }
    fn aliases(&self) -> &[&str] {
        &["sudo join"]
    }
    fn description(&self) -> &str {
        "When I can start"
    }
    fn execute(&self, ctx: &CommandContext<'_>) -> OutputRecord {
        ctx.track("availability_view", payload(std::iter::empty()));
        OutputRecord::Availability {
            candidate: self.candidate.name.clone(),
            windows: self.candidate.windows.clone(),
        }
    }
}

fn mailto(email: &str) -> String {
    format!("mailto:{email}")
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use termfolio_types::error::TermfolioError;

    use super::*;
    use crate::interpreter::{CommandInterpreter, NullOpener, ResourceOpener};

    fn profile() -> ProfileLinks {
        ProfileLinks {
            linkedin_url: "https://example.com/linkedin".to_string(),
            github_url: "https://example.com/github".to_string(),
            contact_email: "hello@example.com".to_string(),
            contact_phone: "+1234567890".to_string(),
        }
    }

    fn registry_with(profile: &ProfileLinks) -> Arc<CommandRegistry> {
        let mut reg = CommandRegistry::new();
        register_builtins(&mut reg, profile, &CandidateInfo::default()).unwrap();
        Arc::new(reg)
    }

    fn interpreter() -> CommandInterpreter {
        CommandInterpreter::new(registry_with(&profile()), Box::new(NullOpener))
    }

    #[derive(Clone, Default)]
    struct SpyOpener {
        opened: Arc<Mutex<Vec<String>>>,
    }
    impl ResourceOpener for SpyOpener {
        fn open(&self, target: &str) -> Result<()> {
            self.opened.lock().unwrap().push(target.to_string());
            Ok(())
        }
    }

    #[test]
    fn builtin_table_has_no_collisions() {
        let reg = registry_with(&profile());
        assert_eq!(
            reg.names(),
            vec![
                "help",
                "about",
                "linkedin",
                "github",
                "email",
                "more",
                "motivation",
                "start-time"
            ]
        );
    }

    #[test]
    fn registering_twice_fails() {
        let mut reg = CommandRegistry::new();
        register_builtins(&mut reg, &profile(), &CandidateInfo::default()).unwrap();
        let err = register_builtins(&mut reg, &profile(), &CandidateInfo::default()).unwrap_err();
        assert!(matches!(err, TermfolioError::DuplicateName(_)));
    }

    #[test]
    fn help_lists_every_command() {
        let interp = interpreter();
        let OutputRecord::TextLines(lines) = interp.execute("help") else {
            panic!("help must return text");
        };
        assert_eq!(lines[0], "Available commands:");
        assert_eq!(lines.len(), interp.registry().len() + 1);
        for (name, desc) in interp.registry().list_commands() {
            assert!(lines.iter().any(|l| l.contains(name) && l.contains(desc)));
        }
    }

    #[test]
    fn help_is_idempotent() {
        let interp = interpreter();
        assert_eq!(interp.execute("help"), interp.execute("help"));
    }

    #[test]
    fn more_has_all_contact_links() {
        let interp = interpreter();
        let OutputRecord::ContactCard(links) = interp.execute("more") else {
            panic!("more must return a contact card");
        };
        assert!(links.len() >= 3);
        assert_eq!(links[0].url, "https://example.com/linkedin");
        assert_eq!(links[1].url, "https://example.com/github");
        assert_eq!(links[2].url, "mailto:hello@example.com");
        assert_eq!(links[3].url, "tel:+1234567890");
    }

    #[test]
    fn more_without_phone_still_has_three_links() {
        let mut p = profile();
        p.contact_phone.clear();
        let interp = CommandInterpreter::new(registry_with(&p), Box::new(NullOpener));
        let OutputRecord::ContactCard(links) = interp.execute("contact") else {
            panic!("contact must return a contact card");
        };
        assert_eq!(links.len(), 3);
    }

    #[test]
    fn start_time_and_alias_render_availability() {
        let interp = interpreter();
        for line in ["start-time", "sudo join", "SUDO JOIN"] {
            let rec = interp.execute(line);
            assert!(matches!(rec, OutputRecord::Availability { .. }));
            let text = rec.render_lines().join("\n");
            assert!(text.contains("Candidate:"), "{line}");
            assert!(text.contains("Availability:"), "{line}");
        }
    }

    #[test]
    fn motivation_mentions_job() {
        let interp = interpreter();
        let text = interp.execute("motivation").render_lines().join("\n");
        assert!(text.contains("I need a job"));
    }

    #[test]
    fn motivation_falls_back_when_unconfigured() {
        let mut reg = CommandRegistry::new();
        let candidate = CandidateInfo {
            motivation: Vec::new(),
            ..CandidateInfo::default()
        };
        register_builtins(&mut reg, &profile(), &candidate).unwrap();
        let interp = CommandInterpreter::new(Arc::new(reg), Box::new(NullOpener));
        assert_eq!(interp.execute("motivation"), OutputRecord::text(["I need a job."]));
    }

    #[test]
    fn link_commands_open_resources() {
        let spy = SpyOpener::default();
        let interp = CommandInterpreter::new(registry_with(&profile()), Box::new(spy.clone()));
        interp.execute("linkedin");
        interp.execute("code");
        interp.execute("mail");
        let opened = spy.opened.lock().unwrap();
        assert_eq!(
            *opened,
            vec![
                "https://example.com/linkedin",
                "https://example.com/github",
                "mailto:hello@example.com"
            ]
        );
    }

    #[test]
    fn more_does_not_open_anything() {
        let spy = SpyOpener::default();
        let interp = CommandInterpreter::new(registry_with(&profile()), Box::new(spy.clone()));
        interp.execute("more");
        assert!(spy.opened.lock().unwrap().is_empty());
    }

    #[test]
    fn about_alias() {
        let interp = interpreter();
        assert_eq!(interp.execute("whoami"), interp.execute("about"));
    }
}
