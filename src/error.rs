// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for annotation operations.
//!
//! None of these are fatal: every rejected operation leaves the session and
//! the store exactly as they were, and callers are expected to log and move on.

use crate::models::annotation::FeatureId;

/// Why a draft could not be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommitRejection {
    #[error("name is required")]
    EmptyName,

    #[error("no finished draft to commit")]
    NoDraft,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnnotationError {
    #[error("Cannot commit draft: {0}")]
    InvalidCommit(CommitRejection),

    #[error("Polygon needs at least 3 vertices to finish, has {vertices}")]
    PrematureFinish { vertices: usize },

    #[error("Unknown feature: {0}")]
    UnknownFeatureId(FeatureId),

    #[error("Cannot switch tools while a draft is in progress")]
    DraftInProgress,
}

/// Result type alias for annotation operations
pub type Result<T> = std::result::Result<T, AnnotationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_rejection_messages() {
        assert_eq!(
            AnnotationError::InvalidCommit(CommitRejection::EmptyName).to_string(),
            "Cannot commit draft: name is required"
        );
        assert_eq!(
            CommitRejection::NoDraft.to_string(),
            "no finished draft to commit"
        );
    }
}
