use serde::{Deserialize, Serialize};

/// Function name shown on a block whose prompt has never been generated.
pub const DEFAULT_FUNCTION_NAME: &str = "new_function";

/// Canvas coordinates of a node.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single input/expected-output pair attached to a block.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: String,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub expected_output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passed: Option<bool>,
    /// Feed the upstream block's output instead of `input` when one is available.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub use_connected_input: bool,
}

impl TestCase {
    /// Creates an unevaluated test case.
    pub fn new(
        id: impl Into<String>,
        input: impl Into<String>,
        expected_output: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            input: input.into(),
            expected_output: expected_output.into(),
            ..Self::default()
        }
    }

    /// Builder-style toggle for the input source.
    pub fn connected(mut self, use_connected_input: bool) -> Self {
        self.use_connected_input = use_connected_input;
        self
    }
}

/// A targeted edit to one field of a test case, mirroring the editable cells in the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum TestCaseEdit {
    Input(String),
    ExpectedOutput(String),
    UseConnectedInput(bool),
}

impl TestCaseEdit {
    pub fn apply(self, case: &mut TestCase) {
        match self {
            TestCaseEdit::Input(input) => case.input = input,
            TestCaseEdit::ExpectedOutput(expected) => case.expected_output = expected,
            TestCaseEdit::UseConnectedInput(flag) => case.use_connected_input = flag,
        }
    }
}

/// A function node: a prompt, the code generated from it, and its tests.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub generated_code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_function_name")]
    pub function_name: String,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    #[serde(default)]
    pub position: Position,
    /// Set by propagation when an upstream node currently feeds this block.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_connected: bool,
    /// The value propagated from upstream during the last recompute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_input: Option<String>,
}

fn default_function_name() -> String {
    DEFAULT_FUNCTION_NAME.to_string()
}

impl Block {
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            prompt: String::new(),
            generated_code: String::new(),
            description: String::new(),
            function_name: default_function_name(),
            test_cases: Vec::new(),
            position,
            is_connected: false,
            connected_input: None,
        }
    }

    pub fn has_code(&self) -> bool {
        !self.generated_code.is_empty()
    }

    pub fn test_case_mut(&mut self, case_id: &str) -> Option<&mut TestCase> {
        self.test_cases.iter_mut().find(|tc| tc.id == case_id)
    }

    /// Pass/fail roll-up used for the block border and minimap colour.
    pub fn summary(&self) -> TestSummary {
        TestSummary::of(&self.test_cases)
    }
}

/// Aggregate state of a block's tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestStatus {
    Untested,
    Passing,
    Failing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestSummary {
    pub passed: usize,
    pub total: usize,
    pub status: TestStatus,
}

impl TestSummary {
    pub fn of(cases: &[TestCase]) -> Self {
        let total = cases.len();
        let passed = cases.iter().filter(|tc| tc.passed == Some(true)).count();
        let status = match (total, passed == total) {
            (0, _) => TestStatus::Untested,
            (_, true) => TestStatus::Passing,
            (_, false) => TestStatus::Failing,
        };
        Self {
            passed,
            total,
            status,
        }
    }
}
