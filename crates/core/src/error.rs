//! Error types for the Nabha Health core.
//!
//! Each domain keeps its own error enum. All of these are recoverable at the
//! call site: a failed wizard transition or a rejected upload leaves the
//! component in the state it was in before the call.

/// Errors returned by the registration wizard.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// A step precondition was not met; the wizard stays on the same step.
    #[error("step {step} is missing required field '{field}'")]
    MissingField { step: u8, field: &'static str },
    /// The requested transition is not available from the current state.
    #[error("invalid wizard transition: {0}")]
    InvalidTransition(&'static str),
    /// A language value could not be parsed.
    #[error("unknown language '{0}' (expected punjabi, hindi or english)")]
    UnknownLanguage(String),
}

pub type RegistrationResult<T> = std::result::Result<T, RegistrationError>;

/// Errors returned by the report analysis pipeline.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// The uploaded file's extension is not an accepted report format.
    #[error("unsupported report format '{extension}' (allowed: pdf, jpg, jpeg, png)")]
    UnsupportedFormat { extension: String },
    /// The uploaded file exceeds the report size limit.
    #[error("report is {size_bytes} bytes, exceeding the {limit_bytes} byte limit")]
    FileTooLarge { size_bytes: u64, limit_bytes: u64 },
    /// The rule provider could not produce a result for an accepted report.
    #[error("analysis failed: {0}")]
    RuleEvaluation(String),
}

pub type PipelineResult<T> = std::result::Result<T, AnalysisError>;

/// Errors returned by the doctor directory.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("no doctor named '{0}' in the directory")]
    UnknownDoctor(String),
    /// A consultation type value could not be parsed.
    #[error("unknown consultation type '{0}' (expected video, audio, chat or whatsapp)")]
    UnknownConsultationType(String),
}

/// Errors returned by the volunteer help desk.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HelpError {
    #[error("help request description cannot be empty")]
    EmptyDescription,
    /// A help category value could not be parsed.
    #[error("unknown help category '{0}'")]
    UnknownCategory(String),
    /// An urgency value could not be parsed.
    #[error("unknown urgency '{0}' (expected low, medium or high)")]
    UnknownUrgency(String),
}

/// Errors resolving core configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid analysis delay '{0}': expected whole milliseconds")]
    InvalidAnalysisDelay(String),
    #[error("analysis delay must be greater than zero")]
    ZeroAnalysisDelay,
}
