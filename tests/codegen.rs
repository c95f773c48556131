//! Tests for prompt-to-code generation.
mod common;
use promptgraph::codegen::placeholder_name;
use promptgraph::prelude::*;

fn name_for(prompt: &str) -> String {
    SnippetTable::new().generate(prompt).function_name
}

#[test]
fn test_filter_odd_prompt() {
    let generated = SnippetTable::new().generate("filter odd numbers");
    assert_eq!(generated.function_name, "filter_odd_numbers");
    assert!(generated.code.starts_with("def filter_odd_numbers(numbers):"));
    assert_eq!(
        generated.description,
        "Filters out odd numbers from a list, returning only even numbers."
    );
}

#[test]
fn test_matching_is_case_insensitive() {
    assert_eq!(name_for("SQUARE every value"), "square_numbers");
    assert_eq!(name_for("Reverse It"), "reverse_list");
}

#[test]
fn test_first_matching_rule_wins() {
    // "sort" and "reverse" both appear; sort comes first in the table.
    assert_eq!(name_for("reverse sort"), "sort_numbers");
    // "add" is a substring of "address", so the sum rule catches it.
    assert_eq!(name_for("address lookup"), "sum_numbers");
    // "greater than" hits the positive-number rule before any CSV rule.
    assert_eq!(name_for("csv filter age greater than 18"), "filter_positive_numbers");
}

#[test]
fn test_csv_rules() {
    assert_eq!(name_for("csv filter by age"), "filter_by_age");
    assert_eq!(name_for("csv filter by column"), "filter_by_column");
    assert_eq!(name_for("extract the email from csv"), "extract_column");
    assert_eq!(name_for("count csv entries"), "count_rows");
    // A CSV filter with no qualifying keyword falls through to the placeholder.
    assert_eq!(name_for("csv filter"), "csv_filter");
}

#[test]
fn test_blank_prompt_yields_empty_code() {
    for prompt in ["", "   ", "\n\t"] {
        let generated = SnippetTable::new().generate(prompt);
        assert!(generated.code.is_empty());
        assert!(generated.description.is_empty());
        assert_eq!(generated.function_name, "new_function");
    }
}

#[test]
fn test_placeholder_function() {
    let generated = SnippetTable::new().generate("Greet the User!");
    assert_eq!(generated.function_name, "greet_the_user");
    assert_eq!(generated.description, "Function that: Greet the User!");
    assert!(generated.code.starts_with("def greet_the_user(input_data):"));
    assert!(generated.code.contains("\"\"\"Greet the User!\"\"\""));
    assert!(generated.code.ends_with("return input_data"));
}

#[test]
fn test_placeholder_name_slugging() {
    assert_eq!(placeholder_name("make   it - happen"), "make_it_happen");
    assert_eq!(placeholder_name("  leading space"), "_leading_space");
    assert_eq!(
        placeholder_name("a very long prompt that keeps going"),
        "a_very_long_prompt_t"
    );
    assert_eq!(placeholder_name("!!!"), "custom_function");
    assert_eq!(placeholder_name("café au lait"), "caf_au_lait");
}

#[test]
fn test_custom_rules_follow_builtins() {
    let table = SnippetTable::empty().with_rule(SnippetRule::new(
        "shout",
        "Upper-cases text.",
        "def shout(text):\n    return text.upper()",
        &[&["shout", "yell"]],
    ));
    assert_eq!(table.generate("Yell it").function_name, "shout");
    assert_eq!(table.generate("square it").function_name, "square_it");
    assert_eq!(SnippetTable::new().rules().len(), 11);
}
