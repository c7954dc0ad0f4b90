use thiserror::Error;

/// Every failure the client can surface. None of them is fatal to the
/// session; the UI shows the display text and returns to idle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LensError {
    #[error("Please select an image first")]
    NoImageSelected,
    #[error("An analysis is already running")]
    AnalysisInProgress,
    #[error("No analysis is running")]
    NotAnalyzing,
    #[error("Please upload an image file (got {0})")]
    UnsupportedFileType(String),
    #[error("Failed to read image file: {0}")]
    FileRead(String),
    #[error("Failed to load sample image: {0}")]
    Fetch(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("{message}")]
    Service { status: u16, message: String },
    #[error("Unexpected response from detection service: {0}")]
    MalformedResponse(String),
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_displays_detail_verbatim() {
        let err = LensError::Service {
            status: 500,
            message: "model overloaded".into(),
        };
        assert_eq!(err.to_string(), "model overloaded");
    }

    #[test]
    fn unsupported_type_names_the_media_type() {
        let err = LensError::UnsupportedFileType("application/pdf".into());
        assert!(err.to_string().contains("application/pdf"));
    }

    #[test]
    fn network_error_is_prefixed() {
        let err = LensError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }
}
