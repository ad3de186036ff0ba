//! Front end for enum declaration files.
//!
//! ```text
//! enum Color {
//!   Red,
//!   Green,
//!   Blue = 10,
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use enumgen_core::parser::parse_source;
//!
//! let (config, diagnostics) = parse_source("enum Color { Red, Green }", Path::new("colors.enumgen"));
//! assert!(diagnostics.is_empty());
//! assert_eq!(config.enums[0].members.len(), 2);
//! ```

pub mod ast;
pub mod lexer;
#[allow(clippy::module_inception)]
pub mod parser;

pub use ast::{ConfigFile, EnumDecl, MemberDecl};
pub use lexer::{Token, TokenKind, TokenStream, tokenize};
pub use parser::{ParseError, Parser};

use crate::diagnostic::Diagnostic;
use std::path::Path;

/// Lex and parse the source of one declaration file.
///
/// Never fails: lex and parse errors come back as diagnostics next to every
/// declaration that could still be parsed.
pub fn parse_source(source: &str, file: &Path) -> (ConfigFile, Vec<Diagnostic>) {
    parser::parse(source, file)
}
