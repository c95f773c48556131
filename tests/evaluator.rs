//! Tests for test-case evaluation.
mod common;
use common::*;
use promptgraph::prelude::*;

fn evens_code() -> String {
    SnippetTable::new().generate("filter odd numbers").code
}

#[test]
fn test_manual_input_pass_and_fail() {
    let cases = vec![
        TestCase::new("1", "[1,2,3,4]", "[2,4]"),
        TestCase::new("2", "[1,2,3,4]", "[2, 4]"),
    ];
    let result = Evaluator::default().eval(&evens_code(), &cases, None);

    assert_eq!(result[0].actual_output.as_deref(), Some("[2,4]"));
    assert_eq!(result[0].passed, Some(true));
    // Comparison is exact text; whitespace differences fail.
    assert_eq!(result[1].actual_output.as_deref(), Some("[2,4]"));
    assert_eq!(result[1].passed, Some(false));
}

#[test]
fn test_connected_input_replaces_manual_input() {
    let cases = vec![
        TestCase::new("1", "[1,3]", "[6,8]").connected(true),
        TestCase::new("2", "[1,3]", "[]"),
    ];
    let result = Evaluator::default().eval(&evens_code(), &cases, Some("[5,6,7,8]"));

    assert_eq!(result[0].actual_output.as_deref(), Some("[6,8]"));
    assert_eq!(result[0].passed, Some(true));
    // The opted-out case still reads its own input.
    assert_eq!(result[1].actual_output.as_deref(), Some("[]"));
    // Stored manual input is never overwritten.
    assert_eq!(result[0].input, "[1,3]");
}

#[test]
fn test_empty_or_missing_upstream_falls_back_to_manual_input() {
    let cases = vec![TestCase::new("1", "[2]", "[2]").connected(true)];
    for upstream in [None, Some("")] {
        let result = Evaluator::default().eval(&evens_code(), &cases, upstream);
        assert_eq!(result[0].actual_output.as_deref(), Some("[2]"));
        assert_eq!(result[0].passed, Some(true));
    }
}

#[test]
fn test_malformed_input_records_error_marker() {
    let cases = vec![TestCase::new("1", "not json", "[]")];
    let result = Evaluator::default().eval(&evens_code(), &cases, None);

    assert_eq!(
        result[0].actual_output.as_deref(),
        Some("Error: Invalid input format")
    );
    assert_eq!(result[0].passed, Some(false));
}

#[test]
fn test_empty_case_list() {
    assert!(Evaluator::default().eval(&evens_code(), &[], None).is_empty());
}

struct FailingExecutor;

impl Executor for FailingExecutor {
    fn run(&self, _code: &str, _input: &str) -> Result<String, ExecutionError> {
        Err(ExecutionError::Backend("interpreter unavailable".to_string()))
    }
}

#[test]
fn test_custom_executor_errors_are_recovered() {
    let block = squares_block();
    let result = Evaluator::new(FailingExecutor).eval(&block.generated_code, &block.test_cases, None);

    assert_eq!(result.len(), 1);
    assert_eq!(
        result[0].actual_output.as_deref(),
        Some("Error: interpreter unavailable")
    );
    assert_eq!(result[0].passed, Some(false));
}
