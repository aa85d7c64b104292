//! Lexical categories of the filter grammar.
//!
//! Each token carries an anchored regular expression that is matched against
//! the unscanned remainder of the filter text. The patterns are compiled once
//! on first use.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// A lexical category of the filter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A field name: `[a-zA-Z][a-zA-Z0-9]*`.
    Identifier,
    /// `(`
    Open,
    /// `)`
    Close,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// Zero-width match at the end of the input.
    End,
    /// `-`, only valid at the very start of a specification.
    Dash,
    /// No token has been matched yet.
    None,
}

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| anchored("[a-zA-Z][a-zA-Z0-9]*"));
static OPEN: Lazy<Regex> = Lazy::new(|| anchored(r"\("));
static CLOSE: Lazy<Regex> = Lazy::new(|| anchored(r"\)"));
static COMMA: Lazy<Regex> = Lazy::new(|| anchored(","));
static DOT: Lazy<Regex> = Lazy::new(|| anchored(r"\."));
static END: Lazy<Regex> = Lazy::new(|| anchored("$"));
static DASH: Lazy<Regex> = Lazy::new(|| anchored("-"));
static NONE: Lazy<Regex> = Lazy::new(|| anchored(""));

fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{pattern})")).expect("token patterns are valid regexes")
}

impl Token {
    /// Every token category, in declaration order.
    pub const ALL: [Token; 8] = [
        Token::Identifier,
        Token::Open,
        Token::Close,
        Token::Comma,
        Token::Dot,
        Token::End,
        Token::Dash,
        Token::None,
    ];

    /// The upper-case category name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Token::Identifier => "IDENTIFIER",
            Token::Open => "OPEN",
            Token::Close => "CLOSE",
            Token::Comma => "COMMA",
            Token::Dot => "DOT",
            Token::End => "END",
            Token::Dash => "DASH",
            Token::None => "NONE",
        }
    }

    /// The compiled pattern, anchored at the start of the haystack.
    pub fn pattern(&self) -> &'static Regex {
        match self {
            Token::Identifier => &*IDENTIFIER,
            Token::Open => &*OPEN,
            Token::Close => &*CLOSE,
            Token::Comma => &*COMMA,
            Token::Dot => &*DOT,
            Token::End => &*END,
            Token::Dash => &*DASH,
            Token::None => &*NONE,
        }
    }

    /// Length in bytes of the match at the start of `input`, if any.
    pub fn match_len(&self, input: &str) -> Option<usize> {
        self.pattern().find(input).map(|m| m.end())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_must_start_with_letter() {
        assert_eq!(Token::Identifier.match_len("abc12(x"), Some(5));
        assert_eq!(Token::Identifier.match_len("1abc"), None);
        assert_eq!(Token::Identifier.match_len("_abc"), None);
    }

    #[test]
    fn patterns_are_anchored() {
        assert_eq!(Token::Comma.match_len("a,b"), None);
        assert_eq!(Token::Comma.match_len(",b"), Some(1));
    }

    #[test]
    fn end_matches_only_empty_remainder() {
        assert_eq!(Token::End.match_len(""), Some(0));
        assert_eq!(Token::End.match_len("x"), None);
    }

    #[test]
    fn names_are_upper_case() {
        let names: Vec<_> = Token::ALL.iter().map(|t| t.to_string()).collect();
        assert_eq!(
            names,
            ["IDENTIFIER", "OPEN", "CLOSE", "COMMA", "DOT", "END", "DASH", "NONE"]
        );
    }
}
