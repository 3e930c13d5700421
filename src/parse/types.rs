//! Types produced by the rule-file scanner and consumed by the eval layer.

/// One `<from> <to>` entry from the rule file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRule {
    /// User name to match, compared exactly.
    pub from: String,
    /// User name substituted on a match.
    pub to: String,
    /// 1-based line number in the rule file.
    pub line: usize,
}

/// Classification of one rule-file line after whitespace splitting.
///
/// Only the first two tokens are significant; anything after them is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// No tokens at all.
    Blank,
    /// First token starts with `#`.
    Comment,
    /// A `from` token with nothing after it.
    Malformed { from: &'a str },
    /// A candidate rule.
    Rule { from: &'a str, to: &'a str },
}
