use std::path::PathBuf;

/// Common error type for every analysis step.
#[derive(thiserror::Error, Debug)]
pub enum AnalysisError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid opacity value {value:?} in {origin}")]
    InvalidOpacity { value: String, origin: &'static str },
    #[error("malformed markup in {path}: {source}")]
    Markup {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },
}

impl AnalysisError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
