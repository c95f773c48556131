//! Prelude module for convenient imports
//!
//! Re-exports the types needed to build, edit, propagate and persist a canvas.
//!
//! # Example
//!
//! ```rust,no_run
//! use promptgraph::prelude::*;
//!
//! let mut canvas = Canvas::builder()
//!     .with_store(MemoryStore::new(MemoryBackend::new()))
//!     .build();
//!
//! let id = canvas.add_block();
//! canvas.set_prompt(&id, "square each number");
//! canvas.regenerate(&id);
//! canvas.set_test_cases(&id, vec![TestCase::new("1", "[1,2,3]", "[1,4,9]")]);
//!
//! assert_eq!(canvas.status(&id).map(|s| s.status), Some(TestStatus::Passing));
//! ```

// Session and configuration
pub use crate::session::{Canvas, CanvasBuilder, CanvasConfig};

// Data model
pub use crate::canvas::{
    Block, CanvasState, Connection, CsvBlock, Position, TestCase, TestCaseEdit, TestStatus,
    TestSummary,
};

// Generation, execution and evaluation
pub use crate::codegen::{CodeGenerator, GeneratedCode, SnippetRule, SnippetTable};
pub use crate::evaluator::Evaluator;
pub use crate::runtime::{Executor, Simulator};

// Propagation
pub use crate::graph::{PropagationMode, propagate, recompute, settle};

// Persistence
pub use crate::store::{
    CanvasStore, FileBackend, FileStore, MemoryBackend, MemoryStore, export_text, import_text,
};

// Error types
pub use crate::error::{CsvError, ExecutionError, GraphError, ImportError, StoreError};
