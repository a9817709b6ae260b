//! Probedit Domain Layer
//!
//! Core model for the problem editor: the single `Problem` record and the
//! `ProblemStore` trait every storage backend implements.
//!
//! ## Key Concepts
//!
//! - **Problem**: a source LaTeX text (read-only) paired with an editable LaTeX text
//! - **Latest record**: the record with the greatest `created_at`, the implicit current one
//! - **Editable field**: the only column the editor ever writes
//!
//! ## Architecture
//!
//! - No I/O in this crate
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all storage interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod problem;
pub mod traits;

// Re-exports for convenience
pub use problem::{Problem, ProblemId};
pub use traits::ProblemStore;
