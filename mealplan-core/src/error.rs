//! Error type for the fallible edges of the planner (parsing, catalog loading, export I/O).
//!
//! The nutrition arithmetic and the scheduler never fail on well-formed input; errors
//! only come from turning raw text into typed values or from touching the filesystem.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("unknown diet type: {0}")]
    UnknownDiet(String),

    #[error("invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("recipe catalog is empty")]
    EmptyCatalog,

    #[error("duplicate recipe id in catalog: {0}")]
    DuplicateRecipeId(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write export {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PlannerError {
    pub(crate) fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
