use std::path::{Path,PathBuf};
use thiserror::Error;

use crate::Float;

#[derive(Debug, Error)]
pub enum PoseGraphError {
    #[error("{origin}:{line}: {message}")]
    Format { origin: String, line: usize, message: String },
    #[error("{context}: vertex index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { context: String, index: i64, vertex_count: usize },
    #[error("{context}: degenerate orientation, quaternion norm is {norm}")]
    DegenerateOrientation { context: String, norm: Float },
    #[error("external solver failed: {0}")]
    ExternalProcess(String),
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, #[source] source: std::io::Error },
    #[error("{}: invalid configuration: {source}", .path.display())]
    Config { path: PathBuf, #[source] source: serde_yaml::Error }
}

impl PoseGraphError {
    pub fn format(origin: &str, line: usize, message: impl Into<String>) -> PoseGraphError {
        PoseGraphError::Format { origin: origin.to_string(), line, message: message.into() }
    }

    pub fn io(path: &Path, source: std::io::Error) -> PoseGraphError {
        PoseGraphError::Io { path: path.to_path_buf(), source }
    }
}

pub type Result<T> = std::result::Result<T, PoseGraphError>;
