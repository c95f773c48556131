//! Common test utilities for building canvases and blocks.
use promptgraph::prelude::*;

/// Creates a block with code generated from `prompt` and the given test cases.
#[allow(dead_code)]
pub fn generated_block(id: &str, prompt: &str, cases: Vec<TestCase>) -> Block {
    let generated = SnippetTable::new().generate(prompt);
    Block {
        prompt: prompt.to_string(),
        generated_code: generated.code,
        description: generated.description,
        function_name: generated.function_name,
        test_cases: cases,
        ..Block::new(id, Position::new(0.0, 0.0))
    }
}

/// Block "evens": keeps even numbers, one manual test whose last run produced `[2,4]`.
#[allow(dead_code)]
pub fn evens_block() -> Block {
    let mut case = TestCase::new("1", "[1,2,3,4]", "[2,4]");
    case.actual_output = Some("[2,4]".to_string());
    case.passed = Some(true);
    generated_block("evens", "filter odd numbers", vec![case])
}

/// Block "squares": squares its input, one test reading the connected input.
#[allow(dead_code)]
pub fn squares_block() -> Block {
    generated_block(
        "squares",
        "square each number",
        vec![TestCase::new("1", "[5]", "[4,16]").connected(true)],
    )
}

/// Block "total": sums its input, one test reading the connected input.
#[allow(dead_code)]
pub fn total_block() -> Block {
    generated_block(
        "total",
        "sum the numbers",
        vec![TestCase::new("1", "[0]", "20").connected(true)],
    )
}

/// Canvas `evens -> squares -> total`.
#[allow(dead_code)]
pub fn chain_state() -> CanvasState {
    CanvasState {
        blocks: vec![evens_block(), squares_block(), total_block()],
        connections: vec![
            Connection::new("e1", "evens", "squares"),
            Connection::new("e2", "squares", "total"),
        ],
        ..CanvasState::default()
    }
}

/// A small people table.
#[allow(dead_code)]
pub const PEOPLE_CSV: &str = "name,age,city\nalice,30,paris\nbob,12,lyon\ncarol,18,nice\n";

/// A CSV data source block loaded with [`PEOPLE_CSV`].
#[allow(dead_code)]
pub fn people_block(id: &str) -> CsvBlock {
    let mut block = CsvBlock::new(id, Position::default());
    block
        .ingest("people.csv", PEOPLE_CSV)
        .expect("fixture CSV parses");
    block
}
