use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid url: {0}")]
    InvalidInput(String),

    #[error("url {0} not found")]
    NotFound(i64),

    #[error("database error: {0}")]
    Storage(#[from] libsql::Error),

    #[error("row decode error: {0}")]
    Decode(#[from] serde::de::value::Error),

    #[error("timestamp format error: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error("url {0} was neither inserted nor found")]
    RegistrationConflict(String),
}

pub type Result<T> = std::result::Result<T, Error>;
