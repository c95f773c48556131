use super::propagation::{Source, apply, incoming};
use crate::canvas::{Block, CanvasState, CsvBlock};
use crate::error::GraphError;
use crate::evaluator::Evaluator;
use ahash::AHashMap;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, warn};

/// Dependency-ordered propagation.
///
/// Builds a directed graph over every node and every connection whose
/// endpoints both exist, sorts it topologically, and applies the single-hop
/// rule in that order against a working copy. Each block therefore sees its
/// predecessor's freshly evaluated output and a chain settles in one call.
///
/// # Errors
///
/// Returns [`GraphError::Cycle`] when the connections contain a cycle
/// (including a block connected to itself).
pub fn settle(state: &CanvasState, evaluator: &Evaluator) -> Result<Vec<Block>, GraphError> {
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let mut nodes: AHashMap<&str, NodeIndex> = AHashMap::new();
    let ids = state
        .blocks
        .iter()
        .map(|b| b.id.as_str())
        .chain(state.csv_blocks.iter().map(|c| c.id.as_str()));
    for id in ids {
        nodes.entry(id).or_insert_with(|| graph.add_node(id));
    }

    for conn in &state.connections {
        let source = nodes.get(conn.source_block_id.as_str());
        let target = nodes.get(conn.target_block_id.as_str());
        if let (Some(&source), Some(&target)) = (source, target) {
            graph.add_edge(source, target, ());
        }
    }

    let order = toposort(&graph, None).map_err(|cycle| {
        let id = graph[cycle.node_id()].to_string();
        warn!(block = %id, "rejecting cyclic connections");
        GraphError::Cycle(id)
    })?;

    let mut positions: AHashMap<&str, usize> = AHashMap::new();
    for (pos, block) in state.blocks.iter().enumerate() {
        positions.entry(block.id.as_str()).or_insert(pos);
    }
    let csv_blocks: AHashMap<&str, &CsvBlock> = state
        .csv_blocks
        .iter()
        .map(|c| (c.id.as_str(), c))
        .collect();

    let mut blocks = state.blocks.clone();
    for idx in order {
        let id = graph[idx];
        let Some(&pos) = positions.get(id) else {
            continue;
        };
        let link = incoming(id, &state.connections, |source: &str| {
            positions
                .get(source)
                .map(|&p| Source::Function(&blocks[p]))
                .or_else(|| csv_blocks.get(source).map(|c| Source::Csv(*c)))
        });
        blocks[pos] = apply(&blocks[pos], link, evaluator);
    }

    debug!(blocks = blocks.len(), "settled in dependency order");
    Ok(blocks)
}
