//! On-demand scanner for filter specifications.
//!
//! The lexer never tokenises ahead. The parser asks for the next token from a
//! set of candidates that are legal at the current position, and the lexer
//! tries each candidate's anchored pattern in order.

use crate::error::{FilterError, Result};
use crate::token::Token;

/// Scans a filter specification one token at a time.
#[derive(Debug)]
pub struct Lexer<'a> {
    specification: &'a str,
    position: usize,
    current_content: Option<&'a str>,
    current_token: Token,
}

impl<'a> Lexer<'a> {
    pub fn new(specification: &'a str) -> Self {
        Self {
            specification,
            position: 0,
            current_content: None,
            current_token: Token::None,
        }
    }

    /// Advance past the first of `looking_for` that matches at the current
    /// position (after skipping whitespace).
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnexpectedToken`] if none of the candidates
    /// match. The lexer state is left unchanged apart from the skipped
    /// whitespace.
    pub fn next_token(&mut self, looking_for: &[Token]) -> Result<()> {
        self.skip_whitespace();

        let rest = &self.specification[self.position..];
        for &token in looking_for {
            if let Some(len) = token.match_len(rest) {
                let content = &rest[..len];
                tracing::trace!(token = %token, content, position = self.position, "matched token");
                self.current_content = Some(content);
                self.current_token = token;
                self.position += len;
                return Ok(());
            }
        }

        Err(FilterError::UnexpectedToken {
            specification: self.specification.to_string(),
            position: self.position,
            expected: looking_for.to_vec(),
        })
    }

    /// Text of the most recent match, or `None` before the first match.
    pub fn current_content(&self) -> Option<&'a str> {
        self.current_content
    }

    /// The most recently matched token, or [`Token::None`] before the first match.
    pub fn current_token(&self) -> Token {
        self.current_token
    }

    /// Byte offset of the scan position.
    pub fn position(&self) -> usize {
        self.position
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.specification[self.position..];
        let trimmed = rest.trim_start_matches(is_separator);
        self.position += rest.len() - trimmed.len();
    }
}

/// ASCII controls `\t`..`\r` and `\x1c`..`\x1f` plus Unicode space, line and
/// paragraph separators. Non-breaking spaces and NEL are not separators.
fn is_separator(c: char) -> bool {
    matches!(c, '\t'..='\r' | '\u{1c}'..='\u{1f}')
        || (c.is_whitespace() && !matches!(c, '\u{85}' | '\u{a0}' | '\u{2007}' | '\u{202f}'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_no_token() {
        let lexer = Lexer::new("abc");
        assert_eq!(lexer.current_token(), Token::None);
        assert_eq!(lexer.current_content(), None);
    }

    #[test]
    fn scans_tokens_and_skips_whitespace() {
        let mut lexer = Lexer::new("  abc ( d1 )");
        lexer.next_token(&[Token::Identifier]).unwrap();
        assert_eq!(lexer.current_token(), Token::Identifier);
        assert_eq!(lexer.current_content(), Some("abc"));
        assert_eq!(lexer.position(), 5);

        lexer.next_token(&[Token::Dot, Token::Open]).unwrap();
        assert_eq!(lexer.current_token(), Token::Open);

        lexer.next_token(&[Token::Identifier]).unwrap();
        assert_eq!(lexer.current_content(), Some("d1"));

        lexer.next_token(&[Token::Close]).unwrap();
        lexer.next_token(&[Token::End]).unwrap();
        assert_eq!(lexer.current_token(), Token::End);
        assert_eq!(lexer.current_content(), Some(""));
    }

    #[test]
    fn non_breaking_spaces_are_not_skipped() {
        let mut lexer = Lexer::new("\u{1f}\u{2003}\u{3000}a");
        lexer.next_token(&[Token::Identifier]).unwrap();
        assert_eq!(lexer.current_content(), Some("a"));

        for text in ["\u{a0}a", "\u{202f}a", "\u{85}a"] {
            let mut lexer = Lexer::new(text);
            let err = lexer.next_token(&[Token::Identifier]).unwrap_err();
            assert!(
                matches!(err, FilterError::UnexpectedToken { position: 0, .. }),
                "{text:?} should not be skipped"
            );
        }
    }

    #[test]
    fn first_matching_candidate_wins() {
        let mut lexer = Lexer::new("-a");
        lexer.next_token(&[Token::Identifier, Token::Dash]).unwrap();
        assert_eq!(lexer.current_token(), Token::Dash);
    }

    #[test]
    fn failure_reports_position_and_candidates() {
        let mut lexer = Lexer::new("ab  )");
        lexer.next_token(&[Token::Identifier]).unwrap();
        let err = lexer
            .next_token(&[Token::Comma, Token::End])
            .unwrap_err();
        match err {
            FilterError::UnexpectedToken {
                specification,
                position,
                expected,
            } => {
                assert_eq!(specification, "ab  )");
                assert_eq!(position, 4);
                assert_eq!(expected, vec![Token::Comma, Token::End]);
            }
            other => panic!("unexpected error: {other}"),
        }
        // The last successful match is still reported.
        assert_eq!(lexer.current_content(), Some("ab"));
    }
}
