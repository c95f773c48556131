//! Tests for the execution simulator.
mod common;
use promptgraph::prelude::*;

fn run(prompt: &str, input: &str) -> Result<String, ExecutionError> {
    let code = SnippetTable::new().generate(prompt).code;
    Simulator::new().run(&code, input)
}

#[test]
fn test_filter_odd_numbers() {
    assert_eq!(run("filter odd numbers", "[1,2,3,4]").unwrap(), "[2,4]");
}

#[test]
fn test_square_numbers() {
    assert_eq!(run("square each number", "[1,2,3]").unwrap(), "[1,4,9]");
    assert_eq!(run("square each number", "[1.5]").unwrap(), "[2.25]");
}

#[test]
fn test_sum_numbers() {
    assert_eq!(run("sum the list", "[1,2,3.5]").unwrap(), "6.5");
    assert_eq!(run("sum the list", "[]").unwrap(), "0");
    // String operands concatenate from that point on.
    assert_eq!(run("sum the list", r#"[1,"a",2]"#).unwrap(), r#""1a2""#);
}

#[test]
fn test_positive_double_sort_reverse() {
    assert_eq!(run("keep positive", "[-1,0,3]").unwrap(), "[3]");
    assert_eq!(run("double it", "[1,2.5]").unwrap(), "[2,5]");
    assert_eq!(run("sort ascending", "[3,1,2,10]").unwrap(), "[1,2,3,10]");
    assert_eq!(run("reverse", r#"[1,"b",null]"#).unwrap(), r#"[null,"b",1]"#);
}

#[test]
fn test_numeric_strings_are_coerced() {
    assert_eq!(run("filter odd numbers", r#"["4","5"]"#).unwrap(), r#"["4"]"#);
    assert_eq!(run("double it", r#"["3","x"]"#).unwrap(), "[6,null]");
}

#[test]
fn test_integral_floats_reserialize_as_integers() {
    assert_eq!(run("reverse", "[1.0, 2e1]").unwrap(), "[20,1]");
}

#[test]
fn test_filter_by_age() {
    let input = r#"[{"name":"a","age":"30"},{"name":"b","age":"12"},{"name":"c"},{"name":"d","age":18}]"#;
    assert_eq!(
        run("csv filter by age", input).unwrap(),
        r#"[{"name":"a","age":"30"},{"name":"d","age":18}]"#
    );
}

#[test]
fn test_filter_by_age_null_row_is_an_error() {
    let result = run("csv filter by age", r#"[{"age":"30"},null]"#);
    assert_eq!(result, Err(ExecutionError::InvalidInput));
}

#[test]
fn test_extract_column_uses_first_key_of_first_row() {
    let input = r#"[{"name":"a","age":"30"},{"age":"12","name":"b"},{"age":"1"}]"#;
    assert_eq!(run("extract csv column", input).unwrap(), r#"["a","b",null]"#);
}

#[test]
fn test_filter_by_column_and_count_rows() {
    let input = r#"[{"a":"1"},{"a":"2"}]"#;
    assert_eq!(run("csv filter by column", input).unwrap(), input);
    assert_eq!(run("count csv rows", input).unwrap(), "2");
}

#[test]
fn test_shape_mismatch_echoes_input() {
    // Object input: no list operation applies, the raw text comes back.
    assert_eq!(run("square it", r#"{ "a": 1.0 }"#).unwrap(), r#"{ "a": 1.0 }"#);
    // Age filter needs object rows; a plain list falls through.
    assert_eq!(run("csv filter by age", "[1, 2]").unwrap(), "[1, 2]");
}

#[test]
fn test_unknown_code_echoes_input() {
    let output = Simulator::new().run("def mystery(x): pass", " [1,  2] ").unwrap();
    assert_eq!(output, " [1,  2] ");
}

#[test]
fn test_invalid_json_is_an_error() {
    let err = run("square it", "[1,2").unwrap_err();
    assert_eq!(err, ExecutionError::InvalidInput);
    assert_eq!(err.to_string(), "Invalid input format");
}

#[test]
fn test_markers_are_checked_in_table_order() {
    // Both markers present: the earlier entry (square) wins.
    let code = "square_numbers then reverse_list";
    assert_eq!(Simulator::new().run(code, "[1,2]").unwrap(), "[1,4]");
    assert_eq!(Simulator::markers().count(), 11);
}

#[test]
fn test_float_text_survives_reencoding() {
    let input = "[183.89639554409126,0.1,-2.5e-7]";
    assert_eq!(
        run("reverse", input).unwrap(),
        "[-2.5e-7,0.1,183.89639554409126]"
    );
    let rows = r#"[{"x":183.89639554409126},{"x":388.92028904918027}]"#;
    assert_eq!(run("csv filter by column", rows).unwrap(), rows);
}

#[test]
fn test_index_like_keys_come_first() {
    assert_eq!(run("extract csv column", r#"[{"b":1,"1":2}]"#).unwrap(), "[2]");
    assert_eq!(
        run("csv filter by age", r#"[{"name":"a","age":"40","7":"x"}]"#).unwrap(),
        r#"[{"7":"x","name":"a","age":"40"}]"#
    );
}
