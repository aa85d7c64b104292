//! # json-filter
//!
//! A small filter language for pruning JSON documents.
//!
//! A filter specification names the fields to keep, or with a leading `-`
//! the fields to remove:
//!
//! ```text
//! a.b.c              keep a → b → c
//! a.b.c,x.y.z        keep two paths
//! a(b,c(d))          keep a.b and a.c.d
//! -a(b,c(d))         remove a.b and a.c.d, keep everything else
//! ```
//!
//! Arrays are transparent: a node applies to every element of an array it
//! meets.
//!
//! ## Quick start
//!
//! ```rust
//! use json_filter::{apply_filter, FilterSpecification};
//! use serde_json::json;
//!
//! let fs = FilterSpecification::parse("key1,key3(key31,key32)").unwrap();
//! let mut doc = json!({
//!     "key1": 1,
//!     "key2": 2,
//!     "key3": {"key31": 31, "key32": 32, "key33": 33},
//! });
//! apply_filter(&mut doc, &fs);
//! assert_eq!(doc, json!({"key1": 1, "key3": {"key31": 31, "key32": 32}}));
//! ```
//!
//! ## Modules
//!
//! - [`token`]: lexical categories and their anchored patterns
//! - [`lexer`]: on-demand scanner
//! - [`parser`]: recursive-descent parser producing a [`FilterTree`]
//! - [`node`]: arena-backed filter tree and the [`NodeRef`] view
//! - [`specification`]: [`FilterSpecification`], canonical form, sub-filters
//! - [`filter`]: the in-place filter engine
//! - [`extract`]: typed field extraction with validation
//! - [`error`]: error types

pub mod error;
pub mod extract;
pub mod filter;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod specification;
pub mod token;

pub use error::{FilterError, ParsingError};
pub use filter::{apply_filter, filter_json, JsonFilter, JsonObjectFilter};
pub use node::{FilterTree, FilterType, NodeId, NodeRef};
pub use parser::Parser;
pub use specification::FilterSpecification;
pub use token::Token;
