use crate::parse::LineKind;

/// Split a rule line into at most two fields and classify it.
pub fn classify(line: &str) -> LineKind<'_> {
    let mut fields = line.split_ascii_whitespace();
    let Some(from) = fields.next() else {
        return LineKind::Blank;
    };
    if from.starts_with('#') {
        return LineKind::Comment;
    }
    match fields.next() {
        Some(to) => LineKind::Rule { from, to },
        None => LineKind::Malformed { from },
    }
}
