//! Probedit Rust SDK
//!
//! Client library for the problem editor's HTTP surface.
//!
//! # Example
//!
//! ```no_run
//! use probedit_sdk::ProblemClient;
//!
//! # async fn demo() -> Result<(), probedit_sdk::SdkError> {
//! let client = ProblemClient::new("http://127.0.0.1:3000");
//!
//! let problem = client.fetch_latest().await?;
//! client.save_editable(&format!("{} + 1", problem.editable_problem)).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod error;

pub use client::ProblemClient;
pub use error::SdkError;
