//! Propagation of block outputs along connections.
//!
//! Two strategies share the same per-block rule (see [`propagation`]):
//!
//! - [`recompute`] is a single hop over a snapshot. Every block sees its
//!   predecessor as it was before the pass, so a chain of `n` blocks needs `n`
//!   passes to settle. Cycles are not detected.
//! - [`settle`] visits blocks in dependency order, so a chain resolves in one
//!   call. Cyclic connections are rejected.

use crate::canvas::CanvasState;
use crate::error::GraphError;
use crate::evaluator::Evaluator;
use serde::{Deserialize, Serialize};

mod propagation;
mod schedule;

pub use propagation::{UPSTREAM_WITHOUT_TESTS, recompute};
pub use schedule::settle;

/// Which propagation strategy a canvas runs after each change.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PropagationMode {
    #[default]
    SingleHop,
    Ordered,
}

/// Recomputes `state` in place with the chosen strategy.
///
/// On error the state is left unchanged.
pub fn propagate(
    state: &mut CanvasState,
    evaluator: &Evaluator,
    mode: PropagationMode,
) -> Result<(), GraphError> {
    state.blocks = match mode {
        PropagationMode::SingleHop => recompute(state, evaluator),
        PropagationMode::Ordered => settle(state, evaluator)?,
    };
    Ok(())
}
