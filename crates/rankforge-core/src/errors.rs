use std::fmt;

/// Maximum length of a character identifier.
pub const MAX_NAME_LEN: usize = 30;

/// Rejection reasons for user-supplied character fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name cannot be empty")]
    EmptyName,
    #[error("name is {0} characters long (max {MAX_NAME_LEN})")]
    NameTooLong(usize),
    #[error("invalid character {0:?} in name: use only lowercase letters and underscores")]
    NameCharacter(char),
    #[error("underscores cannot start or end a name")]
    NameEdgeUnderscore,
    #[error("a character named {0:?} already exists")]
    DuplicateName(String),
    #[error("display name cannot be empty")]
    EmptyDisplayName,
    #[error("missing '#' at the beginning")]
    ColorMissingHash,
    #[error("it seems you've included an alpha channel; provide a 6-digit hex code prefixed with '#'")]
    ColorAlphaChannel,
    #[error("incorrect length {0}; expected 7 characters including '#'")]
    ColorLength(usize),
    #[error("{0:?} is not a hex digit")]
    ColorDigit(char),
    #[error("unknown class choice {0:?}: expected 1-4")]
    ClassChoice(String),
    #[error("invalid number of ranks {0:?}: expected 5 or 6")]
    Ranks(String),
    #[error("{0} per rank is out of range for {1} ranks")]
    ClassStat(&'static str, u32),
}

/// A single schema violation in a generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("embedded schema for {0} is invalid: {1}")]
    Compile(&'static str, String),
    #[error("{kind} document violates its schema:\n{}", render_issues(.issues))]
    Violations {
        kind: &'static str,
        issues: Vec<SchemaIssue>,
    },
}

fn render_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("  {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}
