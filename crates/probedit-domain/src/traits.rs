//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{Problem, ProblemId};

/// Trait for reading and updating the current problem record
///
/// Implemented by the infrastructure layer (probedit-store)
pub trait ProblemStore {
    /// Error type for store operations
    type Error;

    /// Read the latest record by creation time
    ///
    /// Returns `Ok(None)` when no record exists.
    fn latest_problem(&self) -> Result<Option<Problem>, Self::Error>;

    /// Overwrite the editable text of the latest record
    ///
    /// "Latest" is evaluated at write time. Returns the id of the updated
    /// record, or `None` when there is nothing to update.
    fn update_latest_editable(&mut self, editable_problem: &str)
        -> Result<Option<ProblemId>, Self::Error>;

    /// Insert a new record
    ///
    /// Seeding path only; the editor never creates records.
    fn insert_problem(
        &mut self,
        source_problem: &str,
        editable_problem: &str,
    ) -> Result<Problem, Self::Error>;
}
