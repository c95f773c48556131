//! # promptgraph - Block Graph Engine for Prompt Programming
//!
//! **promptgraph** is the engine behind a visual "prompt programming" canvas.
//! Users place function blocks, describe each one with a natural-language
//! prompt, get a code snippet back, attach input/expected-output test cases,
//! and wire blocks together so that one block's output becomes the next
//! block's test input. CSV data source blocks can feed function blocks too.
//!
//! ## Core Workflow
//!
//! 1.  **Generate**: A [`CodeGenerator`](codegen::CodeGenerator) turns a prompt into code. The
//!     built-in [`SnippetTable`](codegen::SnippetTable) is a keyword table.
//! 2.  **Execute**: An [`Executor`](runtime::Executor) runs code against a JSON test input. The
//!     built-in [`Simulator`](runtime::Simulator) recognises the table's snippets by name.
//! 3.  **Evaluate**: The [`Evaluator`](evaluator::Evaluator) runs every test case of a block and
//!     records actual output and pass/fail.
//! 4.  **Propagate**: [`graph::recompute`] (single hop) or [`graph::settle`] (dependency
//!     ordered) feeds upstream outputs into downstream blocks and re-evaluates them.
//! 5.  **Persist**: A [`CanvasStore`](store::CanvasStore) saves the canvas; [`store::export_text`]
//!     and [`store::import_text`] move it in and out as JSON text.
//!
//! [`Canvas`](session::Canvas) ties these together behind UI-shaped operations.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use promptgraph::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut canvas = Canvas::builder()
//!         .with_config(CanvasConfig::default().with_mode(PropagationMode::Ordered))
//!         .build();
//!
//!     // An upstream block that keeps even numbers.
//!     let evens = canvas.add_block();
//!     canvas.set_prompt(&evens, "filter odd numbers");
//!     canvas.regenerate(&evens);
//!     canvas.set_test_cases(&evens, vec![TestCase::new("1", "[1,2,3,4]", "[2,4]")]);
//!
//!     // A downstream block that squares whatever it receives.
//!     let squares = canvas.add_block();
//!     canvas.set_prompt(&squares, "square each number");
//!     canvas.regenerate(&squares);
//!     canvas.set_test_cases(
//!         &squares,
//!         vec![TestCase::new("1", "[]", "[4,16]").connected(true)],
//!     );
//!
//!     canvas.connect(&evens, &squares)?;
//!
//!     let summary = canvas.status(&squares).ok_or("missing block")?;
//!     println!("{}/{} tests passing", summary.passed, summary.total);
//!     println!("{}", canvas.export());
//!     Ok(())
//! }
//! ```

pub mod canvas;
pub mod codegen;
pub mod csv;
pub mod error;
pub mod evaluator;
pub mod graph;
pub mod prelude;
pub mod runtime;
pub mod session;
pub mod store;
