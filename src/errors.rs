use std::io;

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(String),

    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    #[error("keychain command failed: {0}")]
    Keychain(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Reason a cluster query produced no usable summary. The display strings are
/// what the report prints next to the resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Unable to fetch pods")]
    FetchPods,

    #[error("Unable to fetch deployments")]
    FetchDeployments,

    #[error("Unable to fetch nodes")]
    FetchNodes,

    #[error("Invalid JSON response")]
    InvalidJson,
}

pub type QueryResult<T> = Result<T, QueryError>;
