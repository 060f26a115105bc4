use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("notification contains no records")]
    NoRecords,

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("object key is not valid UTF-8 after decoding: {0}")]
    InvalidKey(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}
