//! Running a block's code against a test input.
//!
//! Nothing is actually executed: [`Simulator`] maps known snippet names onto
//! in-memory transformations over the decoded JSON input. The [`Executor`]
//! trait is the seam where a real interpreter backend would plug in.

pub mod coerce;
mod simulator;

pub use simulator::Simulator;

use crate::error::ExecutionError;

/// Runs `code` on a JSON-encoded `input` and returns the JSON-encoded result.
pub trait Executor: Send + Sync {
    fn run(&self, code: &str, input: &str) -> Result<String, ExecutionError>;
}
