use crate::canvas::{Block, CanvasState, Connection, CsvBlock};
use crate::evaluator::Evaluator;
use ahash::AHashMap;
use tracing::debug;

/// Value a function block with code but no test cases passes downstream.
pub const UPSTREAM_WITHOUT_TESTS: &str = "[]";

/// A node that can feed a function block.
#[derive(Clone, Copy)]
pub(super) enum Source<'a> {
    Function(&'a Block),
    Csv(&'a CsvBlock),
}

/// The link into a block: `None` when nothing usable feeds it, otherwise the
/// propagated value, which may itself be absent when the source's first test
/// has not run yet.
pub(super) type Link = Option<Option<String>>;

impl Source<'_> {
    fn output(self) -> Link {
        match self {
            Source::Function(block) if block.has_code() => Some(match block.test_cases.first() {
                Some(case) => case.actual_output.clone(),
                None => Some(UPSTREAM_WITHOUT_TESTS.to_string()),
            }),
            Source::Function(_) => None,
            Source::Csv(csv) => csv
                .csv_data
                .as_ref()
                .map(|rows| serde_json::to_string(rows).ok()),
        }
    }
}

/// Follows the first connection targeting `target` in iteration order.
/// Dangling connections resolve to no link.
pub(super) fn incoming<'a>(
    target: &str,
    connections: &[Connection],
    lookup: impl Fn(&str) -> Option<Source<'a>>,
) -> Link {
    let edge = connections.iter().find(|c| c.target_block_id == target)?;
    lookup(&edge.source_block_id)?.output()
}

/// Applies a link to a block and re-runs its tests when it has code and tests.
pub(super) fn apply(block: &Block, link: Link, evaluator: &Evaluator) -> Block {
    let mut next = block.clone();
    next.is_connected = link.is_some();
    next.connected_input = link.flatten();
    if next.has_code() && !next.test_cases.is_empty() {
        next.test_cases = evaluator.eval(
            &next.generated_code,
            &next.test_cases,
            next.connected_input.as_deref(),
        );
    }
    next
}

/// Single-hop propagation over a snapshot of the canvas.
///
/// Every function block takes its first incoming connection's source output
/// as its connected input and re-runs its tests. All reads see the state as it
/// was before the pass; outputs do not chain within one call.
pub fn recompute(state: &CanvasState, evaluator: &Evaluator) -> Vec<Block> {
    let blocks: AHashMap<&str, &Block> = state.blocks.iter().map(|b| (b.id.as_str(), b)).collect();
    let csv_blocks: AHashMap<&str, &CsvBlock> = state
        .csv_blocks
        .iter()
        .map(|c| (c.id.as_str(), c))
        .collect();

    let lookup = |id: &str| {
        blocks
            .get(id)
            .map(|b| Source::Function(*b))
            .or_else(|| csv_blocks.get(id).map(|c| Source::Csv(*c)))
    };

    let next: Vec<Block> = state
        .blocks
        .iter()
        .map(|block| {
            let link = incoming(&block.id, &state.connections, lookup);
            apply(block, link, evaluator)
        })
        .collect();

    debug!(
        blocks = next.len(),
        connected = next.iter().filter(|b| b.is_connected).count(),
        "recomputed single hop"
    );
    next
}
