use thiserror::Error;

/// Ошибки построения запроса и разбора входных данных
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("{0}")]
    Invalid(String),

    #[error("filter '{key}' expects a {expected} value")]
    TypeMismatch { key: &'static str, expected: &'static str },

    #[error("invalid id '{0}': expected an integer")]
    InvalidId(String),

    #[error("unknown lookup field '{0}'")]
    UnknownLookup(String),

    #[error("key set for line query is empty")]
    EmptyKeySet,
}
