use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, DocumentError>;

/// Errors raised while loading an LMMP document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed XML at byte {position}: {message}")]
    Xml { message: String, position: u64 },

    #[error("Document has no root element")]
    Empty,

    #[error("<{tag}> is missing required attribute '{attribute}'")]
    MissingAttribute { tag: String, attribute: String },

    #[error("<{tag}> attribute '{attribute}' is not an integer: '{value}'")]
    InvalidNumber {
        tag: String,
        attribute: String,
        value: String,
    },
}

impl DocumentError {
    pub fn xml(message: impl Into<String>, position: u64) -> Self {
        DocumentError::Xml {
            message: message.into(),
            position,
        }
    }

    pub fn missing_attribute(tag: impl Into<String>, attribute: impl Into<String>) -> Self {
        DocumentError::MissingAttribute {
            tag: tag.into(),
            attribute: attribute.into(),
        }
    }

    pub fn invalid_number(
        tag: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        DocumentError::InvalidNumber {
            tag: tag.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}
