// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Readiness of an assistant session.

use std::fmt;

use thiserror::Error;

/// Why a session fell back to raw record tools.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DegradedReason {
    /// A required credential or setting is missing.
    #[error("configuration: {0}")]
    Configuration(String),

    /// The embedding model could not be loaded or run.
    #[error("embedding model unavailable: {0}")]
    ModelUnavailable(String),

    /// The record store could not be read.
    #[error("storage: {0}")]
    Storage(String),
}

/// Session readiness.
///
/// Moves `Uninitialized -> BuildingCorpus -> Indexing -> Ready`. `Degraded`
/// can be entered from any stage and is terminal for the session; only a
/// new session, starting at `BuildingCorpus`, leaves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantState {
    Uninitialized,
    BuildingCorpus,
    Indexing,
    Ready,
    Degraded(DegradedReason),
}

impl AssistantState {
    pub fn is_ready(&self) -> bool {
        matches!(self, AssistantState::Ready)
    }

    pub fn degraded_reason(&self) -> Option<&DegradedReason> {
        match self {
            AssistantState::Degraded(reason) => Some(reason),
            _ => None,
        }
    }

    /// Whether moving to `next` follows the session lifecycle.
    pub fn can_transition_to(&self, next: &AssistantState) -> bool {
        use AssistantState::*;
        match (self, next) {
            (_, Degraded(_)) => true,
            (Degraded(_), BuildingCorpus) => true,
            (Degraded(_), _) => false,
            (Uninitialized, BuildingCorpus)
            | (BuildingCorpus, Indexing)
            | (Indexing, Ready)
            | (Ready, BuildingCorpus) => true,
            _ => false,
        }
    }
}

impl fmt::Display for AssistantState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssistantState::Uninitialized => f.write_str("uninitialized"),
            AssistantState::BuildingCorpus => f.write_str("building corpus"),
            AssistantState::Indexing => f.write_str("indexing"),
            AssistantState::Ready => f.write_str("ready"),
            AssistantState::Degraded(reason) => write!(f, "degraded ({reason})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_path_is_allowed() {
        let path = [
            AssistantState::Uninitialized,
            AssistantState::BuildingCorpus,
            AssistantState::Indexing,
            AssistantState::Ready,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(&pair[1]), "{} -> {}", pair[0], pair[1]);
        }
        assert!(!AssistantState::Uninitialized.can_transition_to(&AssistantState::Ready));
    }

    #[test]
    fn degraded_is_reachable_and_terminal() {
        let degraded = AssistantState::Degraded(DegradedReason::Storage("locked".into()));
        assert!(AssistantState::Indexing.can_transition_to(&degraded));
        assert!(!degraded.can_transition_to(&AssistantState::Ready));
        assert!(!degraded.can_transition_to(&AssistantState::Indexing));
        assert!(degraded.can_transition_to(&AssistantState::BuildingCorpus));
        assert_eq!(degraded.to_string(), "degraded (storage: locked)");
    }
}
