use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unsupported algorithm '{name}' for {capability}")]
    UnsupportedAlgorithm { capability: String, name: String },

    #[error("Image decode error: {message}")]
    Decode { message: String },

    #[error("Engine error: {engine} - {message}")]
    Engine { engine: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn unsupported_algorithm(capability: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnsupportedAlgorithm {
            capability: capability.into(),
            name: name.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn engine(engine: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Engine {
            engine: engine.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
