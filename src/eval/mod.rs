pub mod context;
pub mod decision;
pub mod guard;
pub mod matcher;

pub use context::{MemorySession, Session};
pub use decision::{HookKind, Outcome};
pub use guard::{IdempotencyGuard, MODULE_ID};
pub use matcher::find_alias;

use std::io::BufReader;

use log::{debug, error, info};

use crate::config::{Config, NoMatchPolicy};
use crate::error::{ConfigError, ResolveError, RuleFileError};
use crate::parse::LineScanner;
use crate::rulefile;

/// Log target for rule files refused on provenance grounds, so a host can
/// route them above ordinary errors.
pub const ALERT_TARGET: &str = "pam_alias::alert";

/// Single entry point for every hook the host calls.
///
/// `setcred` succeeds without doing anything. Every other hook runs the same
/// resolution pass, unless this session has already had one, in which case
/// the options are not even parsed.
pub fn dispatch<S, A>(hook: HookKind, session: &mut S, args: &[A]) -> Outcome
where
    S: Session + ?Sized,
    A: AsRef<str>,
{
    if !hook.resolves() {
        return Outcome::Success;
    }
    if IdempotencyGuard::default().is_set(&*session) {
        debug!("{}: session already processed", hook.as_str());
        return Outcome::Ignore;
    }
    let config = Config::from_args(args);
    resolve(&config, session)
}

/// Run one resolution pass for `session` with an already-built config.
pub fn resolve<S: Session + ?Sized>(config: &Config, session: &mut S) -> Outcome {
    let guard = IdempotencyGuard::default();
    if guard.is_set(&*session) {
        return Outcome::Ignore;
    }
    match run_pass(config, session, guard) {
        Ok(outcome) => outcome,
        Err(e) if e.is_security() => {
            error!(target: ALERT_TARGET, "{e}");
            Outcome::ServiceFailure
        }
        Err(e) => {
            error!("{e}");
            Outcome::ServiceFailure
        }
    }
}

/// Validate, scan, match, and apply. Any error leaves the guard unset.
fn run_pass<S: Session + ?Sized>(
    config: &Config,
    session: &mut S,
    guard: IdempotencyGuard,
) -> Result<Outcome, ResolveError> {
    let path = config
        .file_path
        .as_deref()
        .ok_or(ConfigError::MissingFile)?;

    let file = rulefile::open_rule_file(path)?;
    let user = session.user()?;

    // The scanner owns the file; it is closed when the match returns.
    let scanner = LineScanner::new(
        BufReader::new(file),
        path.display().to_string(),
        config.max_line,
        config.debug,
    );
    let hit = find_alias(scanner, &user).map_err(|source| RuleFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let Some(rule) = hit else {
        if config.debug {
            debug!(
                "no alias for \"{user}\" in {}, nomatch={}",
                path.display(),
                config.no_match.as_str()
            );
        }
        guard.set(session);
        return Ok(match config.no_match {
            NoMatchPolicy::Ignore => Outcome::Ignore,
            NoMatchPolicy::Fail => Outcome::AuthReject,
        });
    };

    info!("matched user alias \"{}\" to \"{}\"", rule.from, rule.to);
    session.set_user(&rule.to)?;
    guard.set(session);
    Ok(Outcome::Ignore)
}
