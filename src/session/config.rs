use crate::graph::PropagationMode;
use serde::{Deserialize, Serialize};

/// Tunables for a [`Canvas`](super::Canvas) session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasConfig {
    /// Propagation strategy run after every change.
    pub mode: PropagationMode,
    /// New nodes are placed at a random point in `[0, extent)²`.
    pub placement_extent: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            mode: PropagationMode::SingleHop,
            placement_extent: 400.0,
        }
    }
}

impl CanvasConfig {
    pub fn with_mode(mut self, mode: PropagationMode) -> Self {
        self.mode = mode;
        self
    }
}
