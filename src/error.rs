use crate::feature_vector::feature_set::FeatureSet;
use std::path::PathBuf;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum GestureError {
    #[error("frame has no hands to extract features from")]
    EmptyFrame,

    #[error("no gesture model is loaded")]
    ModelNotLoaded,

    #[error("input has {actual} features but the model was trained on {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("training failed: {0}")]
    Training(String),

    #[error("model is malformed: {0}")]
    InvalidModel(String),

    #[error("feature vector {index} has no gesture or class label")]
    UnlabeledVector { index: usize },

    #[error("no gesture is registered for class label {0}")]
    UnknownClassLabel(i32),

    #[error("{feature_set} feature set takes {expected} values, got {actual}")]
    FeatureCount {
        feature_set: FeatureSet,
        expected: usize,
        actual: usize,
    },

    #[error("persistence failed at {path:?}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Collaborator(BoxError),
}

pub type Result<T> = std::result::Result<T, GestureError>;

impl GestureError {
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GestureError::Persistence {
            path: path.into(),
            source,
        }
    }
}

impl From<BoxError> for GestureError {
    fn from(error: BoxError) -> Self {
        GestureError::Collaborator(error)
    }
}
