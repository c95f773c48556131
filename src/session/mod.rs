//! The editing session behind the canvas UI.
//!
//! [`Canvas`] owns the state and turns UI events into mutations, each followed
//! by a propagation pass and a save to the attached store.

use crate::canvas::{
    Block, CanvasState, Connection, CsvBlock, Position, TestCase, TestCaseEdit, TestSummary,
};
use crate::codegen::{CodeGenerator, SnippetTable};
use crate::error::{CsvError, GraphError, ImportError};
use crate::evaluator::Evaluator;
use crate::graph;
use crate::runtime::Executor;
use crate::store::{self, CanvasStore};
use tracing::{debug, info, warn};

mod config;

pub use config::CanvasConfig;

pub struct CanvasBuilder {
    generator: Box<dyn CodeGenerator>,
    evaluator: Evaluator,
    config: CanvasConfig,
    store: Option<Box<dyn CanvasStore>>,
    state: Option<CanvasState>,
}

impl Default for CanvasBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasBuilder {
    pub fn new() -> Self {
        Self {
            generator: Box::new(SnippetTable::new()),
            evaluator: Evaluator::default(),
            config: CanvasConfig::default(),
            store: None,
            state: None,
        }
    }

    pub fn with_generator(mut self, generator: impl CodeGenerator + 'static) -> Self {
        self.generator = Box::new(generator);
        self
    }

    pub fn with_executor(mut self, executor: impl Executor + 'static) -> Self {
        self.evaluator = Evaluator::new(executor);
        self
    }

    pub fn with_config(mut self, config: CanvasConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_store(mut self, store: impl CanvasStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Starts from `state` instead of whatever the store holds.
    pub fn with_state(mut self, state: CanvasState) -> Self {
        self.state = Some(state);
        self
    }

    /// Builds the session, restoring the stored canvas when no explicit
    /// state was given.
    pub fn build(self) -> Canvas {
        let restored = match (&self.state, &self.store) {
            (None, Some(store)) => store.load(),
            _ => None,
        };
        if let Some(state) = &restored {
            info!(
                blocks = state.blocks.len(),
                connections = state.connections.len(),
                "restored canvas"
            );
        }

        Canvas {
            state: self.state.or(restored).unwrap_or_default(),
            generator: self.generator,
            evaluator: self.evaluator,
            config: self.config,
            store: self.store,
        }
    }
}

/// A canvas editing session.
///
/// Operations addressing an unknown block id change nothing and report it
/// through their return value.
pub struct Canvas {
    state: CanvasState,
    generator: Box<dyn CodeGenerator>,
    evaluator: Evaluator,
    config: CanvasConfig,
    store: Option<Box<dyn CanvasStore>>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Canvas {
    pub fn builder() -> CanvasBuilder {
        CanvasBuilder::new()
    }

    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    pub fn into_state(self) -> CanvasState {
        self.state
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.state.block(id)
    }

    pub fn status(&self, id: &str) -> Option<TestSummary> {
        self.state.block(id).map(Block::summary)
    }

    /// Adds an empty function block at a random position and returns its id.
    pub fn add_block(&mut self) -> String {
        let id = self.next_node_id("block");
        let block = Block::new(id.clone(), self.random_position());
        self.state.blocks.push(block);
        self.persist();
        id
    }

    /// Adds an empty CSV data source block and returns its id.
    pub fn add_csv_block(&mut self) -> String {
        let id = self.next_node_id("csv");
        let block = CsvBlock::new(id.clone(), self.random_position());
        self.state.csv_blocks.push(block);
        self.persist();
        id
    }

    /// Removes a function or CSV block along with every connection touching it.
    pub fn remove_block(&mut self, id: &str) -> bool {
        let before = self.state.blocks.len() + self.state.csv_blocks.len();
        self.state.blocks.retain(|b| b.id != id);
        self.state.csv_blocks.retain(|c| c.id != id);
        if before == self.state.blocks.len() + self.state.csv_blocks.len() {
            return false;
        }
        self.state
            .connections
            .retain(|c| c.source_block_id != id && c.target_block_id != id);
        self.sync();
        true
    }

    /// Stores an edited prompt. Code is only regenerated on request.
    pub fn set_prompt(&mut self, id: &str, prompt: &str) -> bool {
        let Some(block) = self.state.block_mut(id) else {
            return false;
        };
        block.prompt = prompt.to_string();
        self.persist();
        true
    }

    /// Regenerates code from the block's stored prompt and re-runs the graph.
    pub fn regenerate(&mut self, id: &str) -> bool {
        let Some(block) = self.state.block_mut(id) else {
            return false;
        };
        let generated = self.generator.generate(&block.prompt);
        debug!(block = %id, function = %generated.function_name, "regenerated");
        block.generated_code = generated.code;
        block.description = generated.description;
        block.function_name = generated.function_name;
        self.sync();
        true
    }

    /// Replaces a block's test cases wholesale.
    pub fn set_test_cases(&mut self, id: &str, cases: Vec<TestCase>) -> bool {
        let Some(block) = self.state.block_mut(id) else {
            return false;
        };
        block.test_cases = cases;
        self.sync();
        true
    }

    /// Appends an empty test case and returns its id.
    pub fn add_test_case(&mut self, id: &str) -> Option<String> {
        let block = self.state.block_mut(id)?;
        let case_id = (block.test_cases.len() + 1..)
            .map(|n| format!("case-{}", n))
            .find(|candidate| block.test_cases.iter().all(|tc| &tc.id != candidate))?;
        block.test_cases.push(TestCase::new(case_id.clone(), "", ""));
        self.sync();
        Some(case_id)
    }

    pub fn update_test_case(&mut self, id: &str, case_id: &str, edit: TestCaseEdit) -> bool {
        let Some(case) = self
            .state
            .block_mut(id)
            .and_then(|block| block.test_case_mut(case_id))
        else {
            return false;
        };
        edit.apply(case);
        self.sync();
        true
    }

    pub fn delete_test_case(&mut self, id: &str, case_id: &str) -> bool {
        let Some(block) = self.state.block_mut(id) else {
            return false;
        };
        let before = block.test_cases.len();
        block.test_cases.retain(|tc| tc.id != case_id);
        if block.test_cases.len() == before {
            return false;
        }
        self.sync();
        true
    }

    /// Connects `source`'s output to `target`'s input.
    ///
    /// Returns the new connection id, or `None` when the pair is already
    /// connected. Under ordered propagation a connection that closes a cycle
    /// is rolled back and reported.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<Option<String>, GraphError> {
        let exists = self
            .state
            .connections
            .iter()
            .any(|c| c.source_block_id == source && c.target_block_id == target);
        if exists {
            return Ok(None);
        }

        let id = format!("edge-{}-{}", source, target);
        self.state
            .connections
            .push(Connection::new(id.clone(), source, target));

        if let Err(e) = self.refresh() {
            self.state.connections.pop();
            return Err(e);
        }
        self.persist();
        Ok(Some(id))
    }

    pub fn disconnect(&mut self, connection_id: &str) -> bool {
        let before = self.state.connections.len();
        self.state.connections.retain(|c| c.id != connection_id);
        if self.state.connections.len() == before {
            return false;
        }
        self.sync();
        true
    }

    /// Loads CSV text into a CSV block and returns the number of data rows.
    pub fn upload_csv(&mut self, id: &str, file_name: &str, text: &str) -> Result<usize, CsvError> {
        let block = self
            .state
            .csv_block_mut(id)
            .ok_or_else(|| CsvError::NoSuchBlock(id.to_string()))?;
        let result = block.ingest(file_name, text);
        self.sync();
        result
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.state.zoom = zoom;
        self.persist();
    }

    /// Pretty-printed JSON of the current canvas.
    pub fn export(&self) -> String {
        store::export_text(&self.state)
    }

    /// Replaces the canvas with imported text. The current canvas is kept
    /// when the text is rejected.
    pub fn import(&mut self, text: &str) -> Result<(), ImportError> {
        self.state = store::import_text(text)?;
        self.sync();
        Ok(())
    }

    /// Runs propagation with the configured strategy.
    pub fn refresh(&mut self) -> Result<(), GraphError> {
        graph::propagate(&mut self.state, &self.evaluator, self.config.mode)
    }

    fn sync(&mut self) {
        if let Err(e) = self.refresh() {
            warn!(error = %e, "propagation skipped");
        }
        self.persist();
    }

    /// Saves a non-empty canvas; an emptied canvas clears the stored copy.
    fn persist(&mut self) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        if self.state.is_empty() {
            store.clear();
        } else {
            store.save(&self.state);
        }
    }

    fn next_node_id(&self, prefix: &str) -> String {
        let taken = self.state.blocks.len() + self.state.csv_blocks.len();
        (taken + 1..)
            .map(|n| format!("{}-{}", prefix, n))
            .find(|candidate| !self.state.contains_node(candidate))
            .unwrap_or_else(|| format!("{}-{}", prefix, taken + 1))
    }

    fn random_position(&self) -> Position {
        let extent = self.config.placement_extent;
        Position::new(rand::random::<f64>() * extent, rand::random::<f64>() * extent)
    }
}
