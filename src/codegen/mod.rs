//! Prompt-to-code generation.
//!
//! [`SnippetTable`] is a fixed keyword table standing in for a model call. It
//! sits behind the [`CodeGenerator`] trait so a real generator can be swapped
//! in without touching propagation or evaluation.

use crate::canvas::DEFAULT_FUNCTION_NAME;

mod snippets;

/// Name used when a prompt slugs down to nothing.
pub const FALLBACK_FUNCTION_NAME: &str = "custom_function";

const MAX_NAME_LEN: usize = 20;

/// The output of a generator for one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub code: String,
    pub description: String,
    pub function_name: String,
}

/// Turns a natural-language prompt into code for a block.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> GeneratedCode;
}

/// One keyword rule and the snippet it produces.
#[derive(Debug, Clone)]
pub struct SnippetRule {
    /// Conjunction of keyword groups; a group matches if any keyword is a substring.
    keywords: Vec<Vec<String>>,
    function_name: String,
    description: String,
    code: String,
}

impl SnippetRule {
    pub fn new(function_name: &str, description: &str, code: &str, keywords: &[&[&str]]) -> Self {
        Self {
            keywords: keywords
                .iter()
                .map(|group| group.iter().map(|kw| kw.to_lowercase()).collect())
                .collect(),
            function_name: function_name.to_string(),
            description: description.to_string(),
            code: code.to_string(),
        }
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// `prompt` must already be lower-cased.
    fn matches(&self, prompt: &str) -> bool {
        self.keywords
            .iter()
            .all(|group| group.iter().any(|kw| prompt.contains(kw.as_str())))
    }

    fn to_generated(&self) -> GeneratedCode {
        GeneratedCode {
            code: self.code.clone(),
            description: self.description.clone(),
            function_name: self.function_name.clone(),
        }
    }
}

/// Ordered keyword table; the first matching rule wins.
#[derive(Debug, Clone)]
pub struct SnippetTable {
    rules: Vec<SnippetRule>,
}

impl Default for SnippetTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SnippetTable {
    /// The built-in list-processing and CSV rules.
    pub fn new() -> Self {
        Self {
            rules: snippets::default_rules(),
        }
    }

    /// A table with no rules; every prompt yields a placeholder.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule after the existing ones.
    pub fn with_rule(mut self, rule: SnippetRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[SnippetRule] {
        &self.rules
    }
}

impl CodeGenerator for SnippetTable {
    fn generate(&self, prompt: &str) -> GeneratedCode {
        if prompt.trim().is_empty() {
            return GeneratedCode {
                code: String::new(),
                description: String::new(),
                function_name: DEFAULT_FUNCTION_NAME.to_string(),
            };
        }

        let lower = prompt.to_lowercase();
        if let Some(rule) = self.rules.iter().find(|rule| rule.matches(&lower)) {
            return rule.to_generated();
        }

        placeholder(prompt, &lower)
    }
}

fn placeholder(prompt: &str, lower: &str) -> GeneratedCode {
    let function_name = placeholder_name(lower);
    GeneratedCode {
        code: format!(
            "def {function_name}(input_data):\n    \"\"\"{prompt}\"\"\"\n    # Implement the function based on the prompt\n    return input_data"
        ),
        description: format!("Function that: {prompt}"),
        function_name,
    }
}

/// Slugs a lower-cased prompt into an identifier.
///
/// Characters other than ASCII alphanumerics and whitespace are dropped, each
/// whitespace run becomes one `_`, and the result is cut to 20 characters.
pub fn placeholder_name(lower: &str) -> String {
    let mut name = String::new();
    let mut in_space = false;
    for c in lower.chars() {
        if c.is_whitespace() {
            if !in_space {
                name.push('_');
            }
            in_space = true;
        } else if c.is_ascii_alphanumeric() {
            name.push(c);
            in_space = false;
        }
    }
    name.truncate(MAX_NAME_LEN);

    if name.is_empty() {
        FALLBACK_FUNCTION_NAME.to_string()
    } else {
        name
    }
}
