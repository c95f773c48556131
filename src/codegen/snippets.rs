use super::SnippetRule;

/// Defines the built-in snippet rules in match order.
///
/// Each `when` entry is a list of keyword groups: every group must match, and a
/// group matches when any of its keywords occurs in the lower-cased prompt.
macro_rules! define_snippets {
    ( $( { when: [ $( [ $( $kw:literal ),+ ] ),+ ], name: $name:literal, description: $desc:literal, code: $code:expr $(,)? } ),* $(,)? ) => {
        pub(super) fn default_rules() -> Vec<SnippetRule> {
            vec![
                $( SnippetRule::new($name, $desc, $code, &[ $( &[ $( $kw ),+ ] ),+ ]) ),*
            ]
        }
    };
}

define_snippets! {
    {
        when: [["filter"], ["odd"]],
        name: "filter_odd_numbers",
        description: "Filters out odd numbers from a list, returning only even numbers.",
        code: r#"def filter_odd_numbers(numbers):
    """Filter out odd numbers from a list."""
    return [x for x in numbers if x % 2 == 0]"#,
    },
    {
        when: [["square", "power"]],
        name: "square_numbers",
        description: "Squares each number in the input list.",
        code: r#"def square_numbers(numbers):
    """Square each number in a list."""
    return [x ** 2 for x in numbers]"#,
    },
    {
        when: [["sum", "add"]],
        name: "sum_numbers",
        description: "Calculates the sum of all numbers in a list.",
        code: r#"def sum_numbers(numbers):
    """Sum all numbers in a list."""
    return sum(numbers)"#,
    },
    {
        when: [["positive", "greater than"]],
        name: "filter_positive_numbers",
        description: "Filters positive numbers from a list.",
        code: r#"def filter_positive_numbers(numbers):
    """Filter positive numbers from a list."""
    return [x for x in numbers if x > 0]"#,
    },
    {
        when: [["double", "multiply by 2"]],
        name: "double_numbers",
        description: "Doubles each number in the input list.",
        code: r#"def double_numbers(numbers):
    """Double each number in a list."""
    return [x * 2 for x in numbers]"#,
    },
    {
        when: [["sort", "order"]],
        name: "sort_numbers",
        description: "Sorts numbers in ascending order.",
        code: r#"def sort_numbers(numbers):
    """Sort numbers in ascending order."""
    return sorted(numbers)"#,
    },
    {
        when: [["reverse"]],
        name: "reverse_list",
        description: "Reverses the order of items in a list.",
        code: r#"def reverse_list(items):
    """Reverse the order of items in a list."""
    return list(reversed(items))"#,
    },
    {
        when: [["csv"], ["filter"], ["age", "greater", "above"]],
        name: "filter_by_age",
        description: "Filters CSV rows where age is greater than or equal to threshold.",
        code: r#"def filter_by_age(data, min_age=18):
    """Filter CSV data by age threshold."""
    return [row for row in data if int(row.get('age', 0)) >= min_age]"#,
    },
    {
        when: [["csv"], ["filter"], ["column", "field"]],
        name: "filter_by_column",
        description: "Filters CSV rows where specified column matches value.",
        code: r#"def filter_by_column(data, column, value):
    """Filter CSV data by column value."""
    return [row for row in data if row.get(column) == value]"#,
    },
    {
        when: [["csv"], ["extract"]],
        name: "extract_column",
        description: "Extracts all values from a specific column in CSV data.",
        code: r#"def extract_column(data, column_name):
    """Extract values from a specific column."""
    return [row.get(column_name, '') for row in data]"#,
    },
    {
        when: [["csv"], ["count"]],
        name: "count_rows",
        description: "Returns the total number of rows in CSV data.",
        code: r#"def count_rows(data):
    """Count number of rows in CSV data."""
    return len(data)"#,
    },
}
