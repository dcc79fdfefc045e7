use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Mysql(#[from] mysql_async::Error),
    #[error("bug {0} does not exist")]
    Missing(u64),
    #[error("database returned no id for the inserted bug report")]
    NoInsertId,
}

/// Failure of a single external AI call. Never leaves the resolution pipeline.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("semantic search returned an empty body")]
    EmptySearch,
    #[error("generation stream line exceeds {0} bytes")]
    LineTooLong(usize),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bug {0} not found")]
    NotFound(u64),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("could not build the HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
