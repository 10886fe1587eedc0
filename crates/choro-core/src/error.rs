use std::path::PathBuf;
use thiserror::Error;

/// Error taxonomy for the pipeline. All variants surface immediately to the
/// caller; there is no retry path for a single-pass in-memory computation.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input dataset missing, unreadable, or malformed.
    #[error("failed to load dataset {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Misconfigured parameter or missing attribute field. Fails fast with
    /// no partial output.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Downstream presentation failure, surfaced by the render tool.
    #[error("render failed: {0}")]
    Render(String),
}

impl PipelineError {
    pub fn load(path: impl Into<PathBuf>, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Load { path: path.into(), source: Box::new(source) }
    }
}
