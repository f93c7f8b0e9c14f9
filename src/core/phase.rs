//! # Phase
//!
//! The view-state contract every screen renders from: each stage of a load is
//! either still `Loading` or `Loaded` with its value, and a whole run shares a
//! single [`LoadError`] slot.

use std::fmt;

use crate::api::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    Loading,
    Loaded(T),
}

impl<T> Default for Phase<T> {
    fn default() -> Self {
        Phase::Loading
    }
}

impl<T> Phase<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Phase::Loaded(_))
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Phase::Loading => None,
            Phase::Loaded(value) => Some(value),
        }
    }
}

/// The one user-visible failure kind. Whatever went wrong upstream is
/// collapsed to its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError(pub String);

impl LoadError {
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for LoadError {}

impl From<ApiError> for LoadError {
    fn from(e: ApiError) -> Self {
        LoadError(e.to_string())
    }
}
