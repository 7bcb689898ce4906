use thiserror::Error;

const UNKNOWN_LOAD_ERROR: &str = "unknown error while loading users";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network error: {message}")]
    Network { message: String },
    #[error("decode error: {message}")]
    Decode { message: String },
    #[error("invalid base url '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
}

impl FetchError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Underlying cause without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Network { message }
            | Self::Decode { message }
            | Self::InvalidBaseUrl { message, .. } => message,
        }
    }

    /// Text shown to the user; never empty.
    pub fn display_message(&self) -> String {
        let message = self.message().trim();
        if message.is_empty() {
            UNKNOWN_LOAD_ERROR.to_string()
        } else {
            message.to_string()
        }
    }
}
