use std::io;

use thiserror::Error;

use crate::inspect::roster::ContainerKind;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Cli(String),

    /// A container status with no matching container in the pod spec.
    #[error("status found for {kind} '{name}'; no corresponding container in spec")]
    OrphanStatus { kind: ContainerKind, name: String },

    #[error("failed to fetch logs for container '{container}': {source}")]
    LogFetch {
        container: String,
        #[source]
        source: Box<AppError>,
    },

    #[error("pod '{namespace}/{name}' not found")]
    PodNotFound { namespace: String, name: String },

    #[error("interrupted")]
    Cancelled,

    #[error("kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// True when the run was interrupted, directly or inside a wrapped error.
    pub fn is_cancelled(&self) -> bool {
        match self {
            AppError::Cancelled => true,
            AppError::LogFetch { source, .. } => source.is_cancelled(),
            _ => false,
        }
    }
}
