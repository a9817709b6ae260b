//! Problem module - the single record the editor works on

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a problem based on UUIDv7
///
/// UUIDv7 keeps identifiers chronologically sortable, matching the
/// "latest record" selection done by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProblemId(u128);

impl ProblemId {
    /// Generate a new UUIDv7-based ProblemId
    ///
    /// # Examples
    ///
    /// ```
    /// use probedit_domain::ProblemId;
    ///
    /// assert_ne!(ProblemId::new(), ProblemId::new());
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Parse a ProblemId from its hyphenated UUID string
    ///
    /// # Examples
    ///
    /// ```
    /// use probedit_domain::ProblemId;
    ///
    /// let id = ProblemId::new();
    /// let parsed = ProblemId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid problem id '{}': {}", s, e))
    }
}

impl Default for ProblemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl TryFrom<String> for ProblemId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_string(&value)
    }
}

impl From<ProblemId> for String {
    fn from(id: ProblemId) -> Self {
        id.to_string()
    }
}

/// A problem record
///
/// `source_problem` is reference text and is never rewritten once stored.
/// `editable_problem` is the only field the editor updates. The record with
/// the greatest `created_at` is the one the editor treats as current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Unique identifier
    pub id: ProblemId,

    /// When this record was created
    pub created_at: DateTime<Utc>,

    /// Immutable source LaTeX text
    pub source_problem: String,

    /// Editable LaTeX text
    pub editable_problem: String,
}

impl Problem {
    /// Create a new record stamped with the current time
    pub fn new(source_problem: impl Into<String>, editable_problem: impl Into<String>) -> Self {
        Self {
            id: ProblemId::new(),
            created_at: Utc::now(),
            source_problem: source_problem.into(),
            editable_problem: editable_problem.into(),
        }
    }
}
