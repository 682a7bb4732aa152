//! Command output records and the session transcript.

/// Fallback text for anything the registry cannot resolve.
pub const UNKNOWN_COMMAND_MESSAGE: &str = "Unknown command. Try: help.";

/// One entry on a contact card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLink {
    /// Button label (e.g. "LinkedIn").
    pub label: String,
    /// Target URL, `mailto:` or `tel:` link.
    pub url: String,
}

impl ContactLink {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Output produced by a command.
///
/// Closed set of shapes so the presentation layer can match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputRecord {
    /// Plain text lines.
    TextLines(Vec<String>),
    /// Contact buttons.
    ContactCard(Vec<ContactLink>),
    /// Candidate availability summary.
    Availability {
        candidate: String,
        windows: Vec<String>,
    },
}

impl OutputRecord {
    /// Text output from anything string-like.
    pub fn text<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::TextLines(lines.into_iter().map(Into::into).collect())
    }

    /// The fixed record returned for unresolved input.
    pub fn unknown_command() -> Self {
        Self::TextLines(vec![UNKNOWN_COMMAND_MESSAGE.to_string()])
    }

    /// Plain-text rendering, one entry per display line.
    ///
    /// The `Candidate:` and `Availability:` header tokens are rendered
    /// verbatim.
    pub fn render_lines(&self) -> Vec<String> {
        match self {
            Self::TextLines(lines) => lines.clone(),
            Self::ContactCard(links) => links
                .iter()
                .map(|link| format!("[{}] {}", link.label, link.url))
                .collect(),
            Self::Availability { candidate, windows } => {
                let mut out = Vec::with_capacity(windows.len() + 2);
                out.push(format!("Candidate: {candidate}"));
                out.push("Availability:".to_string());
                for window in windows {
                    out.push(format!("  - {window}"));
                }
                out
            },
        }
    }
}

/// Append-only record of everything a session produced.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    records: Vec<OutputRecord>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Existing records are never touched.
    pub fn push(&mut self, record: OutputRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[OutputRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&OutputRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record. Only used on a full session reset.
    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }
}
