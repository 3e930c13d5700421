use std::io;

use crate::parse::AliasRule;

/// Return the first rule whose `from` equals `user` exactly.
///
/// Stops pulling from `rules` at the first hit, so later entries (including
/// duplicates of the same `from`) are never read. A read error from the
/// underlying scanner is returned as-is.
pub fn find_alias<I>(rules: I, user: &str) -> io::Result<Option<AliasRule>>
where
    I: IntoIterator<Item = io::Result<AliasRule>>,
{
    for rule in rules {
        let rule = rule?;
        if rule.from == user {
            return Ok(Some(rule));
        }
    }
    Ok(None)
}
