//! Error types for option parsing, rule-file access, and session access.
//!
//! [`ResolveError`] unifies everything that aborts a resolution pass. All of
//! its variants surface to the host as [`Outcome::ServiceFailure`].
//! [`OptionError`] is only ever logged.
//!
//! [`Outcome::ServiceFailure`]: crate::eval::Outcome::ServiceFailure

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Any error that aborts a resolution pass.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    RuleFile(#[from] RuleFileError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ResolveError {
    /// True when the rule file was refused on provenance grounds.
    pub fn is_security(&self) -> bool {
        matches!(self, Self::RuleFile(e) if e.is_security())
    }
}

/// The configuration cannot drive a resolution pass.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `file=<path>` option was given.
    #[error("Alias filename not specified")]
    MissingFile,
}

/// A single invocation option could not be understood. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("bad option \"{0}\"")]
    Unrecognized(String),

    #[error("invalid argument \"{0}\" for nomatch option")]
    InvalidNoMatch(String),

    #[error("invalid argument \"{0}\" for maxline option")]
    InvalidMaxLine(String),
}

/// The rule file could not be opened, inspected, read, or trusted.
#[derive(Debug, Error)]
pub enum RuleFileError {
    #[error("Error opening {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot stat {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is writable by "others".
    #[error("Insecure permissions on {}", .path.display())]
    Insecure { path: PathBuf },

    /// The path resolves to a directory, device, fifo or socket.
    #[error("Insecure permissions on {}: not a regular file", .path.display())]
    NotRegular { path: PathBuf },
}

impl RuleFileError {
    /// True for the provenance checks, as opposed to plain I/O failures.
    pub fn is_security(&self) -> bool {
        matches!(self, Self::Insecure { .. } | Self::NotRegular { .. })
    }
}

/// The host session refused a read or write.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Cannot obtain current pam user: no user set")]
    NoUser,

    /// Host lookup of the user failed. Built by host `Session` implementations.
    #[error("Cannot obtain current pam user: {0}")]
    GetUser(String),

    #[error("Cannot set pam user to \"{user}\": {detail}")]
    SetUser { user: String, detail: String },

    /// Host key/value store refused the write. Built by host `Session` implementations.
    #[error("Cannot set session marker \"{key}\": {detail}")]
    SetMarker { key: String, detail: String },
}
