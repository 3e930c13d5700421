use std::path::PathBuf;

use log::error;

use crate::error::OptionError;

/// Maximum number of data bytes on one rule-file line unless `maxline=` says otherwise.
pub const DEFAULT_MAX_LINE: usize = 255;

/// Largest value `maxline=` accepts.
pub const MAX_LINE_CAP: usize = 64 * 1024;

// ── Final config type ──

/// What to do when no rule matches the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoMatchPolicy {
    /// Pass through without an opinion.
    #[default]
    Ignore,
    /// Reject the authentication step.
    Fail,
}

impl NoMatchPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            NoMatchPolicy::Ignore => "ignore",
            NoMatchPolicy::Fail => "fail",
        }
    }
}

/// Per-invocation configuration, built once from the hook's option strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Rule file path. Mandatory for a resolution pass; checked by the controller.
    pub file_path: Option<PathBuf>,
    /// Log comment lines and every parsed rule at debug level.
    pub debug: bool,
    pub no_match: NoMatchPolicy,
    /// Longest accepted rule line, excluding the terminator.
    pub max_line: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_path: None,
            debug: false,
            no_match: NoMatchPolicy::Ignore,
            max_line: DEFAULT_MAX_LINE,
        }
    }
}

// ── Option parsing ──

/// One recognised invocation option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOption<'a> {
    /// `debug`
    Debug,
    /// `file=<path>`
    File(&'a str),
    /// `nomatch=ignore` or `nomatch=fail`
    NoMatch(NoMatchPolicy),
    /// `maxline=<n>`
    MaxLine(usize),
}

/// Return the value of a `name=value` option, or None if `arg` is not that option.
fn long_opt<'a>(arg: &'a str, name: &str) -> Option<&'a str> {
    arg.strip_prefix(name)?.strip_prefix('=')
}

impl<'a> HookOption<'a> {
    /// Parse a single option string.
    pub fn parse(arg: &'a str) -> Result<Self, OptionError> {
        if arg == "debug" {
            return Ok(HookOption::Debug);
        }
        if let Some(path) = long_opt(arg, "file") {
            return Ok(HookOption::File(path));
        }
        if let Some(value) = long_opt(arg, "nomatch") {
            return match value {
                "ignore" => Ok(HookOption::NoMatch(NoMatchPolicy::Ignore)),
                "fail" => Ok(HookOption::NoMatch(NoMatchPolicy::Fail)),
                other => Err(OptionError::InvalidNoMatch(other.to_string())),
            };
        }
        if let Some(value) = long_opt(arg, "maxline") {
            return match value.parse::<usize>() {
                Ok(n) if (1..=MAX_LINE_CAP).contains(&n) => Ok(HookOption::MaxLine(n)),
                _ => Err(OptionError::InvalidMaxLine(value.to_string())),
            };
        }
        Err(OptionError::Unrecognized(arg.to_string()))
    }
}

impl Config {
    /// Fold one parsed option into the config. Later options win.
    pub fn apply(&mut self, opt: HookOption<'_>) {
        match opt {
            HookOption::Debug => self.debug = true,
            HookOption::File(path) => self.file_path = Some(PathBuf::from(path)),
            HookOption::NoMatch(policy) => self.no_match = policy,
            HookOption::MaxLine(n) => self.max_line = n,
        }
    }

    /// Parse options, collecting the ones that could not be understood.
    pub fn parse_args<S: AsRef<str>>(args: &[S]) -> (Self, Vec<OptionError>) {
        let mut config = Self::default();
        let mut errors = Vec::new();
        for arg in args {
            match HookOption::parse(arg.as_ref()) {
                Ok(opt) => config.apply(opt),
                Err(e) => errors.push(e),
            }
        }
        (config, errors)
    }

    /// Build the config from host-supplied options, logging any that are bad.
    ///
    /// Bad options never abort: they are reported and skipped.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        let (config, errors) = Self::parse_args(args);
        for e in &errors {
            error!("{e}");
        }
        config
    }
}
