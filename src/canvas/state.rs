use super::block::{Block, Position};
use crate::csv::{self, CsvRow};
use crate::error::CsvError;
use serde::{Deserialize, Serialize};

/// A directed edge: the source node's output feeds the target block's input.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub source_block_id: String,
    pub target_block_id: String,
}

impl Connection {
    pub fn new(
        id: impl Into<String>,
        source_block_id: impl Into<String>,
        target_block_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source_block_id: source_block_id.into(),
            target_block_id: target_block_id.into(),
        }
    }
}

/// A data source node holding uploaded CSV rows.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CsvBlock {
    pub id: String,
    #[serde(default)]
    pub csv_data: Option<Vec<CsvRow>>,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub preview: String,
    #[serde(default)]
    pub position: Position,
}

impl CsvBlock {
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            csv_data: None,
            file_name: String::new(),
            preview: String::new(),
            position,
        }
    }

    /// Replaces the block's data with the parsed contents of `text`.
    ///
    /// The file name is recorded even when the text holds no rows; the
    /// previous data and preview are kept in that case.
    pub fn ingest(&mut self, file_name: &str, text: &str) -> Result<usize, CsvError> {
        self.file_name = file_name.to_string();
        let table = csv::parse(text)?;
        self.preview = table.summary();
        let count = table.rows.len();
        self.csv_data = Some(table.rows);
        Ok(count)
    }

    /// The first `n` rows, for a tabular preview.
    pub fn head(&self, n: usize) -> &[CsvRow] {
        match &self.csv_data {
            Some(rows) => &rows[..rows.len().min(n)],
            None => &[],
        }
    }
}

/// The complete serializable snapshot of a canvas.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CanvasState {
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub csv_blocks: Vec<CsvBlock>,
    pub connections: Vec<Connection>,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
}

fn default_zoom() -> f64 {
    1.0
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            csv_blocks: Vec::new(),
            connections: Vec::new(),
            zoom: default_zoom(),
        }
    }
}

impl CanvasState {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.csv_blocks.is_empty() && self.connections.is_empty()
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn block_mut(&mut self, id: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    pub fn csv_block(&self, id: &str) -> Option<&CsvBlock> {
        self.csv_blocks.iter().find(|b| b.id == id)
    }

    pub fn csv_block_mut(&mut self, id: &str) -> Option<&mut CsvBlock> {
        self.csv_blocks.iter_mut().find(|b| b.id == id)
    }

    /// True when `id` names any node on the canvas.
    pub fn contains_node(&self, id: &str) -> bool {
        self.block(id).is_some() || self.csv_block(id).is_some()
    }
}
