//! Recursive-descent parser for filter specifications.
//!
//! ```text
//! filter    := '-'? term_list END
//! term_list := term (',' term_list)?
//! term      := IDENTIFIER ('.' term)?
//!            | IDENTIFIER '(' term_list ')'
//! ```
//!
//! A leading `-` switches the whole tree to exclude mode. Without it, the
//! tree is in include mode. The grammar is LL(1) over the candidate sets the
//! parser hands to the lexer, so no backtracking is needed.

use crate::error::Result;
use crate::lexer::Lexer;
use crate::node::{FilterTree, FilterType, NodeId};
use crate::token::Token;

/// Builds [`FilterTree`]s from filter text.
pub struct Parser;

impl Parser {
    /// Parse `specification` into a filter tree.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FilterError::UnexpectedToken`] at the first position
    /// where the text stops matching the grammar. An empty string is an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use json_filter::Parser;
    ///
    /// let tree = Parser::parse("a(b,c),a.d").unwrap();
    /// assert_eq!(tree.root().to_string(), "a(b,c,d)");
    /// assert_eq!(tree.root().count_all_nodes(), 5);
    /// ```
    pub fn parse(specification: &str) -> Result<FilterTree> {
        let mut tree = FilterTree::new();
        let mut lexer = Lexer::new(specification);

        lexer.next_token(&[Token::Identifier, Token::Dash])?;
        if lexer.current_token() == Token::Dash {
            tree.set_filter_type(FilterTree::ROOT, FilterType::Exclude);
            lexer.next_token(&[Token::Identifier])?;
        } else {
            tree.set_filter_type(FilterTree::ROOT, FilterType::Include);
        }

        parse_node(&mut tree, &mut lexer, FilterTree::ROOT, Token::End)?;

        Ok(tree)
    }
}

/// Parse a term list into `root` until `ending` has been consumed.
///
/// On entry the lexer has just matched the first identifier of the list.
/// `node` walks down a dotted chain. A comma starts the sibling terms over
/// from `root`. A parenthesised group recurses with `Close` as its ending.
fn parse_node(
    tree: &mut FilterTree,
    lexer: &mut Lexer<'_>,
    root: NodeId,
    ending: Token,
) -> Result<()> {
    let mut node = root;
    while lexer.current_token() != ending {
        let name = lexer.current_content().unwrap_or_default();
        node = tree.add_or_get_child(node, name);

        lexer.next_token(&[Token::Open, Token::Comma, Token::Dot, ending])?;
        if lexer.current_token() == Token::Dot {
            lexer.next_token(&[Token::Identifier])?;
        }
        if lexer.current_token() == Token::Open {
            lexer.next_token(&[Token::Identifier])?;
            parse_node(tree, lexer, node, Token::Close)?;
            lexer.next_token(&[Token::Comma, ending])?;
        }
        if lexer.current_token() == Token::Comma {
            lexer.next_token(&[Token::Identifier])?;
            parse_node(tree, lexer, root, ending)?;
        }
    }
    Ok(())
}
