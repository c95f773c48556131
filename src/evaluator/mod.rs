use crate::canvas::TestCase;
use crate::runtime::{Executor, Simulator};
use tracing::debug;

/// Runs a block's test cases through an [`Executor`] and records the results.
///
/// Evaluation never fails: executor errors are written into the test case as
/// an `Error: ...` actual output and count as a failed test.
pub struct Evaluator {
    executor: Box<dyn Executor>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(Simulator::new())
    }
}

impl Evaluator {
    pub fn new(executor: impl Executor + 'static) -> Self {
        Self {
            executor: Box::new(executor),
        }
    }

    pub fn executor(&self) -> &dyn Executor {
        self.executor.as_ref()
    }

    /// Evaluates every test case independently and returns the updated list.
    ///
    /// # Arguments
    ///
    /// * `code`: The block's generated code.
    /// * `cases`: The block's test cases, in display order.
    /// * `upstream`: The value propagated from the block's predecessor, if any.
    ///   It replaces a case's manual input only when the case opts in with
    ///   `use_connected_input` and the value is non-empty.
    pub fn eval(&self, code: &str, cases: &[TestCase], upstream: Option<&str>) -> Vec<TestCase> {
        let upstream = upstream.filter(|value| !value.is_empty());
        cases
            .iter()
            .map(|case| self.eval_case(code, case, upstream))
            .collect()
    }

    fn eval_case(&self, code: &str, case: &TestCase, upstream: Option<&str>) -> TestCase {
        let input = match upstream {
            Some(value) if case.use_connected_input => value,
            _ => case.input.as_str(),
        };

        let (actual, passed) = match self.executor.run(code, input) {
            Ok(output) => {
                let passed = output == case.expected_output;
                (output, passed)
            }
            Err(e) => {
                debug!(case = %case.id, error = %e, "test case errored");
                (format!("Error: {}", e), false)
            }
        };

        TestCase {
            actual_output: Some(actual),
            passed: Some(passed),
            ..case.clone()
        }
    }
}
