//! Authorization state for the admin surface. The site never decides this
//! itself; it only records the outcome of the remote verification call.

use signal_api_types::ConfigResponse;

/// Snapshot of `GET /config`, used for operator diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServerConfig {
    pub api_key_available: bool,
    pub api_key_length: u32,
}

impl From<ConfigResponse> for ServerConfig {
    fn from(value: ConfigResponse) -> Self {
        Self {
            api_key_available: value.api_key_available,
            api_key_length: value.api_key_length,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    /// A configuration or verification request is still outstanding.
    Unknown,
    Authorized,
    Unauthorized,
}

impl AccessState {
    pub fn as_str(self) -> &'static str {
        match self {
            AccessState::Unknown => "unknown",
            AccessState::Authorized => "authorized",
            AccessState::Unauthorized => "unauthorized",
        }
    }
}
