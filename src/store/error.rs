use std::fmt;
use thiserror::Error;

use super::validate::ValidationError;

/// Why the grid document could not be produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read grid source: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed grid document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid grid document: {0}")]
    Invalid(#[from] ValidationError),
}

/// What a lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Difficulty,
    Grid,
    Settings,
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Missing::Difficulty => "Difficulty",
            Missing::Grid => "Grid",
            Missing::Settings => "Settings for difficulty",
        })
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing storage unreadable or malformed. Maps to a 500.
    #[error("failed to load maze grids: {0}")]
    Load(#[from] LoadError),

    /// Well-formed request for absent data. Maps to a 404.
    #[error("{kind} '{key}' not found")]
    NotFound { kind: Missing, key: String },
}

impl StoreError {
    pub fn not_found(kind: Missing, key: &str) -> Self {
        StoreError::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
