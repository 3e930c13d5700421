use std::fs::Permissions;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use pam_alias::eval::{self, HookKind, MODULE_ID, MemorySession, Outcome, Session};

struct RuleFile {
    _dir: tempfile::TempDir,
    path: PathBuf,
}

impl RuleFile {
    fn new(content: &str) -> Self {
        Self::with_mode(content, 0o644)
    }

    fn with_mode(content: &str, mode: u32) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alias.conf");
        std::fs::write(&path, content).unwrap();
        std::fs::set_permissions(&path, Permissions::from_mode(mode)).unwrap();
        Self { _dir: dir, path }
    }

    fn arg(&self) -> String {
        file_arg(&self.path)
    }
}

fn file_arg(path: &Path) -> String {
    format!("file={}", path.display())
}

/// Run `authenticate` for `user` and return the outcome and resulting user.
fn run(user: &str, args: &[String]) -> (Outcome, String, bool) {
    let mut session = MemorySession::new(user);
    let outcome = pam_alias::authenticate(&mut session, args);
    (
        outcome,
        session.user().unwrap(),
        session.has_marker(MODULE_ID),
    )
}

macro_rules! alias_test {
    ($name:ident, $rules:expr, $user:expr, [$($opt:expr),*], $outcome:ident, $expected_user:expr) => {
        #[test]
        fn $name() {
            let file = RuleFile::new($rules);
            let args = vec![file.arg() $(, String::from($opt))*];
            let (outcome, user, _) = run($user, &args);
            assert_eq!(outcome, Outcome::$outcome, "rules: {:?}", $rules);
            assert_eq!(user, $expected_user, "rules: {:?}", $rules);
        }
    };
}

// ── Matching ──

alias_test!(match_simple, "alice bob\n", "alice", [], Ignore, "bob");
alias_test!(match_second_line, "carol dave\nalice bob\n", "alice", [], Ignore, "bob");
alias_test!(match_first_duplicate_wins, "alice bob\nalice eve\n", "alice", [], Ignore, "bob");
alias_test!(match_trailing_tokens_ignored, "alice bob extra stuff\n", "alice", [], Ignore, "bob");
alias_test!(match_tab_separated, "alice\tbob\n", "alice", [], Ignore, "bob");
alias_test!(match_no_trailing_newline, "alice bob", "alice", [], Ignore, "bob");
alias_test!(match_after_malformed, "alice\nalice bob\n", "alice", [], Ignore, "bob");
alias_test!(match_with_debug, "# header\nalice bob\n", "alice", ["debug"], Ignore, "bob");
alias_test!(match_with_fail_policy, "alice bob\n", "alice", ["nomatch=fail"], Ignore, "bob");
alias_test!(match_despite_bad_option, "alice bob\n", "alice", ["frobnicate"], Ignore, "bob");

// ── No match ──

alias_test!(comment_never_matches, "# alice bob\n", "alice", [], Ignore, "alice");
alias_test!(hash_prefixed_from_never_matches, "#alice bob\n", "#alice", [], Ignore, "#alice");
alias_test!(case_sensitive, "Alice bob\n", "alice", [], Ignore, "alice");
alias_test!(nomatch_ignore, "alice bob\n", "carol", ["nomatch=ignore"], Ignore, "carol");
alias_test!(nomatch_fail, "alice bob\n", "carol", ["nomatch=fail"], AuthReject, "carol");
alias_test!(nomatch_fail_empty_file, "", "carol", ["nomatch=fail"], AuthReject, "carol");
alias_test!(invalid_nomatch_keeps_default, "alice bob\n", "carol", ["nomatch=maybe"], Ignore, "carol");
alias_test!(malformed_only, "alice\n", "alice", ["nomatch=fail"], AuthReject, "alice");

// ── Scenarios ──

#[test]
fn scenario_match_sets_guard() {
    let file = RuleFile::new("alice bob\n");
    let (outcome, user, marked) = run("alice", &[file.arg(), "nomatch=ignore".into()]);
    assert_eq!(outcome, Outcome::Ignore);
    assert_eq!(user, "bob");
    assert!(marked);
}

#[test]
fn scenario_world_writable_is_service_failure() {
    let file = RuleFile::with_mode("alice bob\n", 0o666);
    let (outcome, user, marked) = run("alice", &[file.arg()]);
    assert_eq!(outcome, Outcome::ServiceFailure);
    assert_eq!(user, "alice");
    assert!(!marked);
}

#[test]
fn world_writable_file_is_never_scanned() {
    // Every rule here would change the user if any line were read.
    let file = RuleFile::with_mode("carol dave\ncarol erin\n", 0o666);
    let (outcome, user, marked) = run("carol", &[file.arg(), "debug".into()]);
    assert_eq!(outcome, Outcome::ServiceFailure);
    assert_eq!(user, "carol");
    assert!(!marked);

    std::fs::set_permissions(&file.path, Permissions::from_mode(0o644)).unwrap();
    let (_, user, _) = run("carol", &[file.arg()]);
    assert_eq!(user, "dave");
}

#[test]
fn world_writable_fails_even_with_ignore_policy_and_no_match() {
    let file = RuleFile::with_mode("", 0o602);
    let (outcome, _, _) = run("carol", &[file.arg(), "nomatch=ignore".into()]);
    assert_eq!(outcome, Outcome::ServiceFailure);
}

#[test]
fn scenario_missing_file_option() {
    let (outcome, user, marked) = run("alice", &["debug".into()]);
    assert_eq!(outcome, Outcome::ServiceFailure);
    assert_eq!(user, "alice");
    assert!(!marked);
}

#[test]
fn nonexistent_file_is_service_failure() {
    let dir = tempfile::tempdir().unwrap();
    let (outcome, _, marked) = run("alice", &[file_arg(&dir.path().join("absent"))]);
    assert_eq!(outcome, Outcome::ServiceFailure);
    assert!(!marked);
}

#[test]
fn directory_is_service_failure() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::set_permissions(dir.path(), Permissions::from_mode(0o755)).unwrap();
    let (outcome, _, _) = run("alice", &[file_arg(dir.path())]);
    assert_eq!(outcome, Outcome::ServiceFailure);
}

#[test]
fn scenario_second_call_does_not_reopen_file() {
    let file = RuleFile::new("alice bob\nbob carol\n");
    let args = [file.arg()];
    let mut session = MemorySession::new("alice");

    assert_eq!(pam_alias::authenticate(&mut session, &args), Outcome::Ignore);
    assert_eq!(session.current_user(), Some("bob"));

    // A second pass would now map bob → carol, and a missing file would fail.
    std::fs::remove_file(&file.path).unwrap();
    assert_eq!(pam_alias::authenticate(&mut session, &args), Outcome::Ignore);
    assert_eq!(session.current_user(), Some("bob"));
}

#[test]
fn no_match_pass_also_guards_later_hooks() {
    let file = RuleFile::new("alice bob\n");
    let args = [file.arg(), "nomatch=fail".to_string()];
    let mut session = MemorySession::new("carol");

    assert_eq!(pam_alias::authenticate(&mut session, &args), Outcome::AuthReject);

    // Content changes mid-session are not observed.
    std::fs::write(&file.path, "carol dave\n").unwrap();
    assert_eq!(
        eval::dispatch(HookKind::AcctMgmt, &mut session, &args),
        Outcome::Ignore
    );
    assert_eq!(session.current_user(), Some("carol"));
}

#[test]
fn failed_pass_does_not_guard() {
    let file = RuleFile::with_mode("alice bob\n", 0o666);
    let args = [file.arg()];
    let mut session = MemorySession::new("alice");

    assert_eq!(pam_alias::authenticate(&mut session, &args), Outcome::ServiceFailure);

    std::fs::set_permissions(&file.path, Permissions::from_mode(0o644)).unwrap();
    assert_eq!(
        eval::dispatch(HookKind::OpenSession, &mut session, &args),
        Outcome::Ignore
    );
    assert_eq!(session.current_user(), Some("bob"));
}

#[test]
fn at_most_one_substitution_per_session() {
    let file = RuleFile::new("alice bob\nbob carol\ncarol dave\n");
    let args = [file.arg()];
    let mut session = MemorySession::new("alice");
    for hook in [
        HookKind::Authenticate,
        HookKind::AcctMgmt,
        HookKind::OpenSession,
        HookKind::ChAuthTok,
        HookKind::CloseSession,
    ] {
        assert_eq!(eval::dispatch(hook, &mut session, &args), Outcome::Ignore);
    }
    assert_eq!(session.current_user(), Some("bob"));
}

#[test]
fn setcred_never_touches_session() {
    let file = RuleFile::new("alice bob\n");
    let mut session = MemorySession::new("alice");
    assert_eq!(
        eval::dispatch(HookKind::SetCred, &mut session, &[file.arg()]),
        Outcome::Success
    );
    assert_eq!(session.current_user(), Some("alice"));
    assert!(!session.has_marker(MODULE_ID));
}

// ── Overlong lines ──

#[test]
fn overlong_line_does_not_corrupt_next_line() {
    let long = format!("alice {}\n", "x".repeat(400));
    let file = RuleFile::new(&format!("{long}alice bob\n"));
    let (outcome, user, _) = run("alice", &[file.arg()]);
    assert_eq!(outcome, Outcome::Ignore);
    assert_eq!(user, "bob");
}

#[test]
fn overlong_line_tail_is_not_a_rule() {
    // With the default limit the second half of this line would read as "eve root".
    let long = format!("{} eve root\n", "y".repeat(300));
    let file = RuleFile::new(&long);
    let (outcome, user, _) = run("eve", &[file.arg(), "nomatch=fail".into()]);
    assert_eq!(outcome, Outcome::AuthReject);
    assert_eq!(user, "eve");
}

#[test]
fn line_of_exactly_255_bytes_is_accepted() {
    let to = "b".repeat(255 - "alice ".len());
    let file = RuleFile::new(&format!("alice {to}\n"));
    let (_, user, _) = run("alice", &[file.arg()]);
    assert_eq!(user, to);
}

#[test]
fn maxline_option_raises_limit() {
    let to = "b".repeat(1000);
    let file = RuleFile::new(&format!("alice {to}\n"));

    let (_, user, _) = run("alice", &[file.arg()]);
    assert_eq!(user, "alice");

    let (_, user, _) = run("alice", &[file.arg(), "maxline=2048".into()]);
    assert_eq!(user, to);
}

#[test]
fn oversized_maxline_is_ignored_and_pass_still_matches() {
    let file = RuleFile::new("alice bob\n");
    let maxline = format!("maxline={}", usize::MAX);
    let (outcome, user, marked) = run("alice", &[file.arg(), maxline]);
    assert_eq!(outcome, Outcome::Ignore);
    assert_eq!(user, "bob");
    assert!(marked);
}
