use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutfitError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Range table lock poisoned")]
    LockPoisoned,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OutfitError>;
