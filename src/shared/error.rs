use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the bot process.
///
/// These codes let a supervisor (systemd, a container runtime) tell a broken
/// setup apart from a runtime failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Clean shutdown (stdin closed, one-shot query answered)
    Success = 0,
    /// Settings file missing, unreadable, or incomplete
    ConfigurationError = 2,
    /// Any other failure (Socket Mode, HTTP client construction, stdin I/O)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ConfigurationError => write!(f, "Configuration Error (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for the MISP lookup bot.
///
/// Configuration variants carry a hint for the operator. Backend variants
/// never reach the chat user: the use case turns them into the fixed
/// error report and logs the details instead.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("Failed to read settings file: {path}\nDetails: {details}\n\n💡 Hint: Pass the settings file with --config or create ./settings.yml")]
    ConfigRead { path: PathBuf, details: String },

    #[error("Failed to parse settings file: {path}\nDetails: {details}\n\n💡 Hint: Ensure the file contains valid YAML key/value pairs")]
    ConfigParse { path: PathBuf, details: String },

    #[error("Missing required setting: {key}\n\n💡 Hint: Add '{key}' to the settings file or export it as an environment variable")]
    MissingSetting { key: &'static str },

    #[error("Invalid value for setting {key}: {reason}")]
    InvalidSetting { key: &'static str, reason: String },

    #[error("Malformed MISP response: {details}")]
    MalformedResponse { details: String },

    #[error("MISP search failed: {details}")]
    BackendUnavailable { details: String },

    #[error("MISP search timed out after {seconds}s")]
    BackendTimeout { seconds: u64 },

    #[error("Invalid inbound payload: {details}")]
    InvalidPayload { details: String },

    #[error("Failed to deliver reply: {details}")]
    ReplyFailed { details: String },

    #[error("Socket Mode connection failed: {details}\n\n💡 Hint: Check that SLACK_APP_TOKEN is an app-level token (xapp-...) with connections:write and that Socket Mode is enabled")]
    ConnectionFailed { details: String },
}

impl BotError {
    /// True for errors caused by the settings file or environment
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            BotError::ConfigRead { .. }
                | BotError::ConfigParse { .. }
                | BotError::MissingSetting { .. }
                | BotError::InvalidSetting { .. }
        )
    }
}
