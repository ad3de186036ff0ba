//! Recursive-descent parser with panic-mode recovery.
//!
//! ```text
//! file       := { enumDecl } ;
//! enumDecl   := "enum" IDENT "{" { memberDecl } "}" ;
//! memberDecl := IDENT [ "=" INTEGER ] "," ;
//! ```
//!
//! The `,` after the last member of a block may be left out.

use super::ast::{ConfigFile, EnumDecl, MemberDecl};
use super::lexer::{Token, TokenKind, TokenStream, tokenize};
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use std::fmt;
use std::path::Path;

/// Parse error with location information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error at {}:{}: {}", self.line, self.column, self.message)
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    pub fn into_diagnostic(self, file: &Path) -> Diagnostic {
        Diagnostic::error(DiagnosticKind::Parse, file, self.line, self.column, self.message)
    }
}

/// Parser state.
pub struct Parser<'src> {
    tokens: TokenStream<'src>,
    current: Option<Token<'src>>,
    file: &'src Path,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Parser<'src> {
    pub fn new(tokens: TokenStream<'src>) -> Self {
        let file = tokens.file();
        let mut parser = Self {
            tokens,
            current: None,
            file,
            diagnostics: Vec::new(),
        };
        parser.current = parser.pull();
        parser
    }

    /// Parse the whole file. Lex and parse diagnostics are returned together;
    /// every declaration that parsed cleanly is kept.
    pub fn parse(mut self) -> (ConfigFile, Vec<Diagnostic>) {
        let mut config = ConfigFile::new();

        while let Some(kind) = self.peek_kind() {
            let result = match kind {
                TokenKind::Enum => self.parse_enum(),
                _ => Err(self.unexpected(&[TokenKind::Enum])),
            };

            match result {
                Ok(decl) => config.enums.push(decl),
                Err(error) => {
                    self.diagnostics.push(error.into_diagnostic(self.file));
                    self.synchronize();
                }
            }
        }

        (config, self.diagnostics)
    }

    fn parse_enum(&mut self) -> Result<EnumDecl, ParseError> {
        let keyword = self.expect(TokenKind::Enum)?;
        let name = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::LBrace)?;

        let mut members = Vec::new();
        loop {
            match self.peek_kind() {
                Some(TokenKind::RBrace) => {
                    self.advance();
                    break;
                }
                Some(TokenKind::Identifier) => {
                    members.push(self.parse_member()?);
                    match self.peek_kind() {
                        Some(TokenKind::Comma) => {
                            self.advance();
                        }
                        Some(TokenKind::RBrace) => {}
                        _ => return Err(self.unexpected(&[TokenKind::Comma, TokenKind::RBrace])),
                    }
                }
                _ => return Err(self.unexpected(&[TokenKind::Identifier, TokenKind::RBrace])),
            }
        }

        Ok(EnumDecl {
            name: name.text.to_string(),
            members,
            source_file: self.file.to_path_buf(),
            source_line: keyword.line,
            source_column: keyword.column,
        })
    }

    fn parse_member(&mut self) -> Result<MemberDecl, ParseError> {
        let name = self.expect(TokenKind::Identifier)?;

        let explicit_value = if self.peek_kind() == Some(TokenKind::Equals) {
            self.advance();
            Some(self.expect_integer()?)
        } else {
            None
        };

        Ok(MemberDecl {
            name: name.text.to_string(),
            explicit_value,
            source_line: name.line,
            source_column: name.column,
        })
    }

    /// Skip to the next `}` (consumed) or `enum` (left for the caller).
    fn synchronize(&mut self) {
        let mut skipped = 0usize;
        while let Some(kind) = self.peek_kind() {
            match kind {
                TokenKind::RBrace => {
                    self.advance();
                    break;
                }
                TokenKind::Enum => break,
                _ => {
                    self.advance();
                    skipped += 1;
                }
            }
        }
        tracing::trace!(skipped, "parser resync");
    }

    // Helper methods

    fn pull(&mut self) -> Option<Token<'src>> {
        loop {
            match self.tokens.next()? {
                Ok(token) => return Some(token),
                Err(diagnostic) => self.diagnostics.push(diagnostic),
            }
        }
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.current.map(|t| t.kind)
    }

    fn advance(&mut self) -> Option<Token<'src>> {
        let token = self.current.take();
        if token.is_some() {
            self.current = self.pull();
        }
        token
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token<'src>, ParseError> {
        match self.current {
            Some(token) if token.kind == expected => {
                self.advance();
                Ok(token)
            }
            _ => Err(self.unexpected(&[expected])),
        }
    }

    fn expect_integer(&mut self) -> Result<i64, ParseError> {
        match self.current {
            Some(token) if token.kind.is_integer() => {
                let value = token.integer_value().ok_or_else(|| ParseError {
                    message: format!("integer literal `{}` does not fit in 64 bits", token.text),
                    line: token.line,
                    column: token.column,
                })?;
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected(&[TokenKind::Integer])),
        }
    }

    fn unexpected(&self, expected: &[TokenKind]) -> ParseError {
        let expected = describe_expected(expected);
        match self.current {
            Some(token) => ParseError {
                message: format!("expected {}, found {}", expected, token.describe()),
                line: token.line,
                column: token.column,
            },
            None => {
                let (line, column) = self.tokens.end_position();
                ParseError {
                    message: format!("expected {}, found end of file", expected),
                    line,
                    column,
                }
            }
        }
    }
}

fn describe_expected(expected: &[TokenKind]) -> String {
    let names: Vec<&str> = expected.iter().map(|k| k.describe()).collect();
    match names.split_last() {
        None => "token".to_string(),
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

/// Lex and parse one file's source.
pub fn parse(source: &str, file: &Path) -> (ConfigFile, Vec<Diagnostic>) {
    let (config, diagnostics) = Parser::new(tokenize(source, file)).parse();
    tracing::debug!(
        file = %file.display(),
        enums = config.enums.len(),
        diagnostics = diagnostics.len(),
        "Parsed declaration file"
    );
    (config, diagnostics)
}
