//! Argument splitting and classification for setup-file test cases.
//!
//! Both halves are heuristics over loosely formatted text. Neither ever fails:
//! an argument that cannot be typed classifies to `None`, and text that does not
//! sit on a known delimiter boundary stays merged with its neighbour.

use lazy_static::lazy_static;
use regex::{Matches, Regex};

lazy_static! {
    /// Groups: opening punctuation, alphabetic run, numeric run, comparison marker.
    static ref ARGUMENT_SHAPE: Regex =
        Regex::new(r#"^(\[?'?"?#?)([a-zA-Z]{1,15})?([-?0-9.]+)?([<>])?"#).unwrap();
    static ref INTEGER: Regex = Regex::new(r"^-?[0-9]+$").unwrap();
    /// Alternation order matters: the first delimiter that matches at a position wins.
    static ref ARGUMENT_DELIMITER: Regex =
        Regex::new(r#"['"], |',|[0-9]\+|\), |\], |[0-9], ?"#).unwrap();
}

// ============================================================================
// CLASSIFIER
// ============================================================================

/// Maps one argument token to a type tag.
///
/// Rules are checked in order and later rules assume earlier ones did not
/// match:
///
/// 1. `[name…]` placeholders yield `real` when the name contains `num`,
///    otherwise the name itself (trailing digits dropped).
/// 2. Quoted literals yield `str`, `#…#` literals yield `date`.
///
/// Only the first opening character picks the rule, so `['x` is a placeholder
/// and `"#x` is a string.
/// 3. A leading word yields `bool` when followed by `<`/`>`, a known type
///    keyword's tag, or the lowercased word.
/// 4. A bare number yields `int` or `real`.
pub fn classify_argument(token: &str) -> Option<String> {
    let caps = ARGUMENT_SHAPE.captures(token.trim())?;
    let opening = caps.get(1).map_or("", |m| m.as_str());
    let word = caps.get(2).map(|m| m.as_str());
    let number = caps.get(3).map(|m| m.as_str());
    let compares = caps.get(4).is_some();

    match opening.chars().next() {
        Some('[') => {
            let name = word?;
            if name.contains("num") {
                return Some("real".to_string());
            }
            return Some(name.to_string());
        }
        Some('\'') | Some('"') => return Some("str".to_string()),
        Some('#') => return Some("date".to_string()),
        _ => {}
    }

    match word {
        Some(word) => Some(classify_word(word, compares)),
        None => number.and_then(classify_number),
    }
}

fn classify_word(word: &str, compares: bool) -> String {
    let tag = if compares {
        "bool"
    } else if word == "CHAR" || word.eq_ignore_ascii_case("str") {
        "str"
    } else if word == "int" {
        "int"
    } else if word == "num" {
        "real"
    } else if word.eq_ignore_ascii_case("true") || word.eq_ignore_ascii_case("false") {
        "bool"
    } else {
        return word.to_lowercase();
    };
    tag.to_string()
}

fn classify_number(number: &str) -> Option<String> {
    if INTEGER.is_match(number) {
        Some("int".to_string())
    } else if number.parse::<f64>().is_ok() {
        Some("real".to_string())
    } else {
        None
    }
}

// ============================================================================
// SPLITTER
// ============================================================================

/// Lazily splits the text between a call's parentheses into raw tokens.
///
/// Every delimiter starts with an anchor character (a quote, a digit, `)` or
/// `]`) that closes the token on its left. The anchor is kept with that token
/// and the rest of the delimiter is dropped, so `'a', 'b'` yields `'a'` and
/// `'b'`, and `1, 2` yields `1` and `2`. Tokens are returned untrimmed.
pub fn split_arguments(text: &str) -> SplitArguments<'_> {
    SplitArguments {
        text,
        delimiters: ARGUMENT_DELIMITER.find_iter(text),
        start: 0,
        finished: false,
    }
}

/// Iterator returned by [`split_arguments`].
pub struct SplitArguments<'t> {
    text: &'t str,
    delimiters: Matches<'static, 't>,
    start: usize,
    finished: bool,
}

impl<'t> Iterator for SplitArguments<'t> {
    type Item = &'t str;

    fn next(&mut self) -> Option<&'t str> {
        if self.finished {
            return None;
        }
        match self.delimiters.next() {
            Some(delimiter) => {
                let anchor = self.text[delimiter.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                let end = delimiter.start() + anchor;
                let token = &self.text[self.start..end];
                self.start = delimiter.end();
                Some(token)
            }
            None => {
                self.finished = true;
                Some(&self.text[self.start..])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(token: &str) -> Option<String> {
        classify_argument(token)
    }

    #[test]
    fn bracket_placeholder_returns_its_name() {
        assert_eq!(tag("[datetime").as_deref(), Some("datetime"));
        assert_eq!(tag("[datetime2]").as_deref(), Some("datetime"));
        assert_eq!(tag("[bool1]").as_deref(), Some("bool"));
    }

    #[test]
    fn bracket_placeholder_with_num_is_real() {
        assert_eq!(tag("[num1]").as_deref(), Some("real"));
        assert_eq!(tag("[num]").as_deref(), Some("real"));
    }

    #[test]
    fn bracket_without_name_is_unclassified() {
        assert_eq!(tag("[1]"), None);
    }

    #[test]
    fn quoted_literals_are_strings() {
        assert_eq!(tag("'datetime'").as_deref(), Some("str"));
        assert_eq!(tag("\"datetime\"").as_deref(), Some("str"));
        assert_eq!(tag("\"1234.\"").as_deref(), Some("str"));
        assert_eq!(tag("'").as_deref(), Some("str"));
    }

    #[test]
    fn hash_literal_is_date() {
        assert_eq!(tag("#2004-01-01#").as_deref(), Some("date"));
    }

    #[test]
    fn bare_word_returns_lowercased_word() {
        assert_eq!(tag("datetime").as_deref(), Some("datetime"));
        assert_eq!(tag("DATETIME([datetime0])").as_deref(), Some("datetime"));
    }

    #[test]
    fn type_keywords_map_to_tags() {
        assert_eq!(tag("str2").as_deref(), Some("str"));
        assert_eq!(tag("STR").as_deref(), Some("str"));
        assert_eq!(tag("CHAR").as_deref(), Some("str"));
        assert_eq!(tag("int").as_deref(), Some("int"));
        assert_eq!(tag("num").as_deref(), Some("real"));
        assert_eq!(tag("bool").as_deref(), Some("bool"));
    }

    #[test]
    fn boolean_literals_in_any_case() {
        for token in ["true", "False", "TRUE", "false"] {
            assert_eq!(tag(token).as_deref(), Some("bool"), "token {token}");
        }
    }

    #[test]
    fn comparison_marker_makes_bool() {
        assert_eq!(tag("x<").as_deref(), Some("bool"));
        assert_eq!(tag("int1>").as_deref(), Some("bool"));
    }

    #[test]
    fn numbers_split_into_int_and_real() {
        assert_eq!(tag("10").as_deref(), Some("int"));
        assert_eq!(tag("-7").as_deref(), Some("int"));
        assert_eq!(tag("1.5").as_deref(), Some("real"));
        assert_eq!(tag("-0.25").as_deref(), Some("real"));
        assert_eq!(tag("3.").as_deref(), Some("real"));
    }

    #[test]
    fn garbage_is_unclassified() {
        assert_eq!(tag(""), None);
        assert_eq!(tag("-"), None);
        assert_eq!(tag("1.2.3"), None);
        assert_eq!(tag("(x)"), None);
    }

    #[test]
    fn splits_quoted_arguments() {
        let tokens: Vec<_> = split_arguments("'abc', \"de\", 'f'").collect();
        assert_eq!(tokens, vec!["'abc'", "\"de\"", "'f'"]);
    }

    #[test]
    fn splits_numbers_and_placeholders() {
        let tokens: Vec<_> = split_arguments("[num1], 10, -2.5").collect();
        assert_eq!(tokens, vec!["[num1]", "10", "-2.5"]);
    }

    #[test]
    fn keeps_nested_call_arguments_together() {
        let tokens: Vec<_> = split_arguments("DATETIME([x0]), 'day'").collect();
        assert_eq!(tokens, vec!["DATETIME([x0])", "'day'"]);
    }

    #[test]
    fn unknown_boundaries_stay_merged() {
        let tokens: Vec<_> = split_arguments("[a],[b]").collect();
        assert_eq!(tokens, vec!["[a],[b]"]);
    }

    #[test]
    fn splits_on_digit_before_plus() {
        let tokens: Vec<_> = split_arguments("1+2").collect();
        assert_eq!(tokens, vec!["1", "2"]);
    }

    #[test]
    fn splits_on_quote_comma_without_space() {
        let tokens: Vec<_> = split_arguments("'a','b'").collect();
        assert_eq!(tokens, vec!["'a'", "'b'"]);
    }

    #[test]
    fn splits_on_digit_comma_without_space() {
        let tokens: Vec<_> = split_arguments("3,4").collect();
        assert_eq!(tokens, vec!["3", "4"]);
    }

    #[test]
    fn non_ascii_digits_do_not_split_or_panic() {
        let tokens: Vec<_> = split_arguments("\u{0663}, 'x'").collect();
        assert_eq!(tokens, vec!["\u{0663}, 'x'"]);
        assert_eq!(split_arguments("é1, 2").collect::<Vec<_>>(), vec!["é1", "2"]);
    }

    #[test]
    fn first_opening_character_picks_the_rule() {
        assert_eq!(tag("['x").as_deref(), Some("x"));
        assert_eq!(tag("\"#x").as_deref(), Some("str"));
    }

    #[test]
    fn single_argument_yields_single_token() {
        assert_eq!(split_arguments("[str]").count(), 1);
    }
}
