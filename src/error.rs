//! Error types for respnorm
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Boxed error carried out of a raw chunk source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All error types that can occur while normalizing a response
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The raw source was already pulled; it cannot be replayed
    #[error("Stream already consumed: read the resolved text instead")]
    StreamAlreadyConsumed,

    /// Error raised by the raw source itself, passed through untouched
    #[error("Raw source error: {0}")]
    Source(#[source] BoxError),

    /// Embedding adapter built over a model that cannot embed
    #[error("Embedding model not supported: {0}")]
    UnsupportedEmbeddingModel(String),

    /// An embedding model answered without any vector
    #[error("Missing embedding: {0}")]
    MissingEmbedding(String),

    /// A model wrapper call failed
    #[error("Model error: {0}")]
    Model(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ResponseError {
    /// Whether this error came from the provider's chunk source
    pub fn is_source_error(&self) -> bool {
        matches!(self, ResponseError::Source(_))
    }
}

/// Result type alias for respnorm operations
pub type Result<T> = std::result::Result<T, ResponseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_already_consumed_error() {
        let err = ResponseError::StreamAlreadyConsumed;
        assert_eq!(err.to_string(), "Stream already consumed: read the resolved text instead");
    }

    #[test]
    fn test_source_error_keeps_inner_message() {
        let inner: BoxError = "connection reset".into();
        let err = ResponseError::Source(inner);
        assert_eq!(err.to_string(), "Raw source error: connection reset");
        assert!(err.is_source_error());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_unsupported_embedding_model_error() {
        let err = ResponseError::UnsupportedEmbeddingModel("gpt-chat".to_string());
        assert_eq!(err.to_string(), "Embedding model not supported: gpt-chat");
        assert!(!err.is_source_error());
    }

    #[test]
    fn test_missing_embedding_error() {
        let err = ResponseError::MissingEmbedding("text-embed".to_string());
        assert_eq!(err.to_string(), "Missing embedding: text-embed");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ResponseError = io_err.into();
        assert!(matches!(err, ResponseError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: ResponseError = json_err.into();
        assert!(matches!(err, ResponseError::Json(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(ResponseError::StreamAlreadyConsumed)
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
