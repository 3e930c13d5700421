use serde::Deserialize;

/// Result handed back to the host for one hook invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// No opinion; the rest of the stack decides.
    Ignore,
    AuthReject,
    ServiceFailure,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Ignore => "ignore",
            Outcome::AuthReject => "auth_reject",
            Outcome::ServiceFailure => "service_failure",
        }
    }

    /// The Linux-PAM return code this outcome corresponds to.
    pub fn pam_code(self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::ServiceFailure => 3,
            Outcome::AuthReject => 7,
            Outcome::Ignore => 25,
        }
    }
}

/// Lifecycle point at which the host invoked the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookKind {
    #[default]
    Authenticate,
    #[serde(rename = "setcred")]
    SetCred,
    AcctMgmt,
    OpenSession,
    CloseSession,
    #[serde(rename = "chauthtok")]
    ChAuthTok,
}

impl HookKind {
    pub fn as_str(self) -> &'static str {
        match self {
            HookKind::Authenticate => "authenticate",
            HookKind::SetCred => "setcred",
            HookKind::AcctMgmt => "acct_mgmt",
            HookKind::OpenSession => "open_session",
            HookKind::CloseSession => "close_session",
            HookKind::ChAuthTok => "chauthtok",
        }
    }

    /// Whether this hook runs a resolution pass. Only `setcred` does not.
    pub fn resolves(self) -> bool {
        !matches!(self, HookKind::SetCred)
    }
}
