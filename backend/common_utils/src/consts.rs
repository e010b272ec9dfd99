//! Consolidated constants for the gateway client

// =============================================================================
// ID Generation and Length Constants
// =============================================================================

pub const ID_LENGTH: usize = 20;

/// Characters to use for generating NanoID
pub(crate) const ALPHABETS: [char; 62] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
    'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
    'V', 'W', 'X', 'Y', 'Z',
];

// =============================================================================
// Error Messages and Codes
// =============================================================================

/// No error message string const
pub const NO_ERROR_MESSAGE: &str = "No error message";

// =============================================================================
// Environment
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Env {
    Development,
    Release,
}

impl Env {
    pub const fn current_env() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Release
        }
    }

    pub const fn config_path(self) -> &'static str {
        match self {
            Self::Development => "development.toml",
            Self::Release => "production.toml",
        }
    }
}

impl std::fmt::Display for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Release => write!(f, "release"),
        }
    }
}

// =============================================================================
// Transaction Result Codes
// =============================================================================

/// Response code recorded on a successfully processed transaction
pub const RESPONSE_CODE_SUCCESS: &str = "success";
/// Response code recorded while waiting for the customer
pub const RESPONSE_CODE_PENDING: &str = "pending";
/// Reason code paired with [`RESPONSE_CODE_SUCCESS`]
pub const REASON_CODE_SUCCESS: &str = "none";
/// Reason code recorded when the customer has to be redirected
pub const REASON_CODE_ACTION_REQUIRED: &str = "action_required";
/// Reason code recorded when the gateway rejected the data without a status
pub const REASON_CODE_INVALID: &str = "invalid";
