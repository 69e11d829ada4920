/// Error types for the viewer
///
/// Every failure is fatal for the current session: it travels up as a
/// `ViewerError` and is shown once by the error boundary in `main.rs`.
use std::path::PathBuf;

use thiserror::Error;

/// Shader stage that failed to compile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// All fatal errors of the viewer
///
/// Must be `Clone` because it is carried inside iced messages.
#[derive(Debug, Clone, Error)]
pub enum ViewerError {
    #[error("Invalid configuration {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("Image not found: {0}")]
    AssetNotFound(PathBuf),

    #[error("Failed to decode image {path}: {reason}")]
    AssetDecode { path: PathBuf, reason: String },

    #[error("No GPU adapter available, cannot render")]
    NoAdapter,

    #[error("Failed to create GPU device: {0}")]
    Device(String),

    #[error("The {stage} shader has compile errors: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("Failed to link the render pipeline: {0}")]
    ProgramLink(String),

    #[error("Failed to read back the rendered frame: {0}")]
    Readback(String),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
