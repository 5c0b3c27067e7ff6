use thiserror::Error;

#[derive(Debug, Error)]
pub enum MowerError {
    /// Perception could not classify the screen or locate an element.
    #[error("Recognition error: {0}")]
    Recognize(String),

    /// The procedure concluded its goal is unreachable by known recovery actions.
    #[error("Strategy error: {0}")]
    Strategy(String),

    #[error("Device error: {0}")]
    Device(String),

    #[error("Gesture contract violated: {0}")]
    Gesture(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialize error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// How the retry machinery treats an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorTier {
    /// Retried up to the budget.
    Transient,
    /// Aborts the current procedure, never retried.
    Strategic,
    /// Propagated untouched.
    Defect,
}

impl MowerError {
    pub fn tier(&self) -> ErrorTier {
        match self {
            MowerError::Recognize(_) => ErrorTier::Transient,
            MowerError::Strategy(_) => ErrorTier::Strategic,
            _ => ErrorTier::Defect,
        }
    }

    pub fn recognize(msg: impl Into<String>) -> Self {
        MowerError::Recognize(msg.into())
    }

    pub fn strategy(msg: impl Into<String>) -> Self {
        MowerError::Strategy(msg.into())
    }
}

pub type MowerResult<T> = Result<T, MowerError>;
