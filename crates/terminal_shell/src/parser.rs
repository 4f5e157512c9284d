//! Submission splitting and whitespace tokenization.

/// One parsed sub-line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Invocation {
    /// Lowercased command name.
    pub name: String,
    /// Positional arguments, case preserved.
    pub args: Vec<String>,
}

/// Splits a submission into its non-blank, trimmed sub-lines.
pub(crate) fn split_submission(raw: &str) -> Vec<&str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Parses one sub-line. Returns `None` when the line holds no tokens.
///
/// Tokens are separated by runs of whitespace. Quotes and backslashes are ordinary
/// characters.
pub(crate) fn parse_invocation(line: &str) -> Option<Invocation> {
    let mut tokens = line.split_whitespace().map(str::to_string);
    let name = tokens.next()?;
    Some(Invocation {
        name: name.to_lowercase(),
        args: tokens.collect(),
    })
}
