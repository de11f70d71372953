use storefront_editor::EditorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Backend rejected request: {0}")]
    Rejected(String),

    #[error("Invalid store id: {0:?}")]
    InvalidStoreId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Editor(#[from] EditorError),
}

impl From<GatewayError> for EditorError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Editor(e) => e,
            other => EditorError::Persistence(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_editor::ErrorKind;

    #[test]
    fn test_editor_errors_pass_through() {
        let err: EditorError = GatewayError::Editor(EditorError::SaveInProgress).into();
        assert_eq!(err, EditorError::SaveInProgress);
    }

    #[test]
    fn test_transport_errors_become_network() {
        let err: EditorError = GatewayError::Status {
            status: 500,
            message: "boom".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.to_string().contains("boom"));
    }
}
