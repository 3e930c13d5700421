//! Diagnostic logging for the dry-run binary.
//!
//! The library only talks to the `log` facade; inside a real host the host's
//! logger receives the records. The binary has no host, so it installs a
//! stderr logger here.

use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

/// Level to log at: `Debug` when the `debug` option was given, `Info` otherwise.
pub fn level_for(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install a stderr logger. Best-effort: a logger that is already set wins.
pub fn init(debug: bool) {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    let _ = TermLogger::init(
        level_for(debug),
        config,
        TerminalMode::Stderr,
        ColorChoice::Never,
    );
}
