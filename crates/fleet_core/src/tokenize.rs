//! Numeric token extraction from loosely delimited snapshot text.
//!
//! Snapshot lines interleave numbers with arbitrary separators (`%`, commas,
//! whitespace, labels). Every record extractor goes through these two
//! functions instead of doing its own pattern matching, so edge cases
//! (negative numbers, decimals, adjacent tokens) are handled in one place.

use std::sync::OnceLock;

use regex::Regex;

static NUMBER: OnceLock<Regex> = OnceLock::new();
static INTEGER: OnceLock<Regex> = OnceLock::new();

fn number_pattern() -> &'static Regex {
    NUMBER.get_or_init(|| Regex::new(r"-?\d*\.\d+|-?\d+").expect("number pattern compiles"))
}

fn integer_pattern() -> &'static Regex {
    INTEGER.get_or_init(|| Regex::new(r"-?\d+").expect("integer pattern compiles"))
}

/// Extract every signed integer or decimal token from `line`, in order.
pub fn numeric_tokens(line: &str) -> Vec<f64> {
    number_pattern()
        .find_iter(line)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Extract every signed integer token from `line`, in order.
///
/// Decimals split at the point: `"0.5"` yields `[0, 5]`. Callers that expect
/// mixed tokens should use [`numeric_tokens`]; this variant exists for
/// id-list fields that are integers by contract.
pub fn integer_tokens(line: &str) -> Vec<i64> {
    integer_pattern()
        .find_iter(line)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_integers_and_decimals() {
        assert_eq!(numeric_tokens("id 12 at 3.25"), vec![12.0, 3.25]);
    }

    #[test]
    fn test_negative_numbers() {
        assert_eq!(numeric_tokens("p-1 delta -0.5"), vec![-1.0, -0.5]);
        assert_eq!(integer_tokens("-7,3"), vec![-7, 3]);
    }

    #[test]
    fn test_adjacent_tokens_split_on_nonnumeric() {
        assert_eq!(numeric_tokens("1.5%2%-3"), vec![1.5, 2.0, -3.0]);
        assert_eq!(integer_tokens("4,5,6"), vec![4, 5, 6]);
    }

    #[test]
    fn test_bare_fraction() {
        assert_eq!(numeric_tokens("x .75 y"), vec![0.75]);
    }

    #[test]
    fn test_no_tokens() {
        assert!(numeric_tokens("Performance").is_empty());
        assert!(integer_tokens("").is_empty());
    }
}
