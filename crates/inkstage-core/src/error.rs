//! Engine errors.
//!
//! Most invalid input is absorbed by policy (discarded gestures, rejected
//! resizes, zero snap shifts). Only genuine defects surface here.

use crate::elements::ElementId;
use thiserror::Error;

/// Engine errors.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Duplicate element id: {0}")]
    DuplicateId(ElementId),
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
