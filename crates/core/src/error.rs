use std::error::Error as StdError;

/// The single error kind produced while resolving a compiler invocation.
///
/// Covers output-directory failures, bad glob patterns and any other
/// unexpected failure hit while resolving configuration or scanning
/// sources. The original failure, when there is one, is preserved as
/// [`std::error::Error::source`] for diagnostics.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ConfigurationError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl ConfigurationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Wraps an error raised mid-resolution, prefixing it with the phase
    /// it came from. Already-typed configuration errors pass through
    /// unchanged.
    pub fn during_resolution(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        let source = source.into();
        Self {
            message: format!(
                "An error occurred while resolving the compiler configuration: {source}"
            ),
            source: Some(source),
        }
    }
}

/// Result type alias for kotlinc-runner operations
pub type Result<T> = std::result::Result<T, ConfigurationError>;
