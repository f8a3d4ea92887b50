//! Errors reported by the searches and by key-chain construction.
use std::error::Error;
use std::fmt;

use crate::search::worklist::WorkListKind;
use crate::value::ValueKind;

/// Represents the ways a search call can fail.
///
/// All variants except [`SearchError::KeyNotFound`] are contract violations:
/// they point at a bug in the caller (or in this crate) rather than at a
/// property of the searched document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A pop was required to succeed but the work list was empty.
    EmptyContainerAccess(WorkListKind),
    /// A value had a different kind than the operation accepts.
    InvalidValueKind {
        /// What the operation accepts, e.g. "string or array of strings"
        expected: &'static str,
        /// What it got instead
        found: ValueKind,
    },
    /// A key in a chain was not a (non-empty) string.
    InvalidKeyType(String),
    /// `find_chain` drained its queue while `key` was still pending.
    KeyNotFound {
        /// The first key of the chain that never matched
        key: String,
        /// Zero-based round at which the queue was found empty
        round: usize,
    },
}

impl Error for SearchError {}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContainerAccess(kind) => {
                write!(f, "Attempted to pop from an empty {kind}")
            }
            Self::InvalidValueKind { expected, found } => {
                write!(f, "Invalid value kind: expected {expected}, found {found}")
            }
            Self::InvalidKeyType(detail) => {
                write!(f, "Invalid key: {detail}")
            }
            Self::KeyNotFound { key, round } => {
                write!(f, "Key {key:?} not found (queue exhausted at round {round})")
            }
        }
    }
}
