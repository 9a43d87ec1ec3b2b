use thiserror::Error;

/// Banner shown for any failed submission, whatever the underlying cause.
pub const REQUEST_FAILED_BANNER: &str = "Failed to get recommendations. Ensure Backend is running.";

/// Local form validation failure. Blocks submission; no request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in name, email, field, and at least one interest.")]
    MissingRequired,
}

/// Any failure while talking to the scoring service. Callers collapse all
/// variants into `REQUEST_FAILED_BANNER`; the detail is only logged.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error: {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
