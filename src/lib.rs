//! pam-alias: a PAM-style hook that remaps the authenticated user name.
//!
//! Given the session's current user, the engine reads an operator-owned rule
//! file of `<from> <to>` lines and, on the first line whose `from` equals the
//! user, replaces the session's user with `to`. The hook's own result stays
//! neutral ([`eval::Outcome::Ignore`]) so the rest of the stack is unaffected.
//! A per-session marker makes sure this happens at most once per session.
//!
//! # Architecture
//!
//! - **[`config`]**: Invocation options parsed into a typed [`config::Config`].
//! - **[`rulefile`]**: Opens the rule file and rejects it unless it is a regular file not writable by others.
//! - **[`parse`]**: Line scanner and tokenizer turning the file into [`parse::AliasRule`]s.
//! - **[`eval`]**: Matcher, idempotency guard, session trait, and the hook dispatcher.
//! - **[`error`]**: Error taxonomy; every fatal error becomes [`eval::Outcome::ServiceFailure`].
//! - **[`logging`]**: Logger setup for the dry-run binary.

/// Invocation options and the typed configuration record.
pub mod config;
/// Error types for options, rule-file access and session access.
pub mod error;
/// Resolution engine: matcher, controller, guard, session context.
pub mod eval;
/// Logger initialisation for the binary.
pub mod logging;
/// Rule-file scanning: line reader, tokenizer, parsed types.
pub mod parse;
/// Rule-file provenance validation.
pub mod rulefile;

use eval::{HookKind, Outcome, Session};

/// Run the `authenticate` hook against `session` with host-supplied options.
///
/// This is the main entry point for tests and simple usage.
/// For the other lifecycle hooks use [`eval::dispatch`] directly.
pub fn authenticate<S, A>(session: &mut S, args: &[A]) -> Outcome
where
    S: Session + ?Sized,
    A: AsRef<str>,
{
    eval::dispatch(HookKind::Authenticate, session, args)
}
