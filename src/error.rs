use thiserror::Error;

/// Failure of the outbound call to the search-grounded model.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Model API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Invalid model response: {0}")]
    InvalidResponse(String),

    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[cfg(feature = "gemini")]
impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Transport(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum MarketInsightError {
    /// The user-facing message is fixed; the underlying cause is kept as the source.
    #[error("Failed to fetch stock data. Please try again.")]
    AnalysisFetch(#[source] ServiceError),

    #[error("Ticker must not be empty")]
    InvalidTicker,
}

pub type Result<T> = std::result::Result<T, MarketInsightError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_fetch_error_message_is_fixed() {
        let err = MarketInsightError::AnalysisFetch(ServiceError::Api {
            status: 429,
            body: "quota exceeded".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Failed to fetch stock data. Please try again."
        );

        let source = err.source().expect("cause should be preserved");
        assert!(source.to_string().contains("429"));
    }
}
