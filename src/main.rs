//! pam-alias: dry-run driver for the alias hook.
//!
//! Reads one hook request as JSON from stdin, runs it against an in-memory
//! session, and writes the outcome and resulting user as JSON to stdout.
//!
//! ```text
//! {"hook": "authenticate", "user": "alice", "args": ["file=/etc/security/alias.conf"]}
//! ```

use std::io::Read;

use pam_alias::eval::{self, HookKind, MemorySession, Session};
use serde::Deserialize;

#[derive(Deserialize)]
struct HookRequest {
    #[serde(default)]
    hook: HookKind,
    user: Option<String>,
    #[serde(default)]
    args: Vec<String>,
    /// Pretend an earlier hook in this session already ran.
    #[serde(default)]
    marked: bool,
}

fn main() {
    let mut input = String::new();
    if std::io::stdin().read_to_string(&mut input).is_err() {
        eprintln!("failed to read stdin");
        std::process::exit(1);
    }

    let request: HookRequest = match serde_json::from_str(&input) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("JSON parse error: {e}");
            std::process::exit(1);
        }
    };

    pam_alias::logging::init(request.args.iter().any(|a| a == "debug"));

    let mut session = match request.user {
        Some(user) => MemorySession::new(user),
        None => MemorySession::anonymous(),
    };
    if request.marked {
        let _ = session.set_marker(eval::MODULE_ID);
    }

    let outcome = eval::dispatch(request.hook, &mut session, &request.args);

    let output = serde_json::json!({
        "result": outcome.as_str(),
        "code": outcome.pam_code(),
        "user": session.current_user(),
        "marked": session.has_marker(eval::MODULE_ID),
    });

    println!("{output}");
}
