use thiserror::Error;

/// Represents every way a webpage-to-presentation run can fail.
///
/// None of these are recovered from locally; they propagate to the caller and end the run.
#[derive(Error, Debug)]
pub enum PresenterError {
    /// A required credential or key is missing from the configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The scrape provider returned nothing usable (neither markdown nor HTML).
    #[error("Content extraction failed: {0}")]
    Extraction(String),

    /// The language model output could not be read as a JSON array of slides.
    #[error("Slide planning failed: {0}")]
    Planning(String),

    /// A response from a remote service is missing a field the protocol depends on.
    #[error("Protocol violation: {0}")]
    Protocol(String),

    /// A remote service answered with a non-success status.
    #[error("Failed to {action}: Status {status}, Message: {message}")]
    RemoteCall {
        action: String,
        status: reqwest::StatusCode,
        message: String,
    },

    /// Error originating from the underlying HTTP client (`reqwest`).
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Error occurred during (de)serialization of a JSON payload.
    #[error("Failed to process JSON: {0}")]
    JsonDeserialization(#[from] serde_json::Error),

    /// An I/O error occurred, e.g. while writing a plan dump.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error indicating invalid input was provided to a library function.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A type alias for `Result<T, PresenterError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, PresenterError>;
