//! Lexer for enum declaration files, built on logos.

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use logos::Logos;
use std::path::Path;

/// Token kinds of the declaration language.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    // Keywords
    #[token("enum")]
    Enum,

    // Punctuation
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("=")]
    Equals,

    #[token(",")]
    Comma,

    /// Never valid in the grammar. Lexed so that a stray `;` is reported by
    /// the parser at its position instead of discarding the rest of the line.
    #[token(";")]
    Semicolon,

    // Literals
    #[regex(r"[+-]?[0-9]+")]
    Integer,

    #[regex(r"[+-]?0[xX][0-9a-fA-F]+")]
    HexInteger,

    // Identifiers (must come after keywords)
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    // Comments
    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/")]
    BlockComment,

    /// A `/*` with no closing `*/`. A closed comment is the longer match and
    /// always wins.
    #[token("/*")]
    UnterminatedComment,
}

impl TokenKind {
    /// How the kind reads in an "expected ..." message.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Enum => "`enum`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Equals => "`=`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Integer | TokenKind::HexInteger => "integer",
            TokenKind::Identifier => "identifier",
            TokenKind::LineComment
            | TokenKind::BlockComment
            | TokenKind::UnterminatedComment => "comment",
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, TokenKind::Integer | TokenKind::HexInteger)
    }
}

/// A token with its text and 1-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub line: usize,
    pub column: usize,
}

impl Token<'_> {
    /// The value of an integer token, `None` for other kinds or when the
    /// literal does not fit in an `i64`.
    pub fn integer_value(&self) -> Option<i64> {
        if self.kind.is_integer() {
            parse_integer(self.text)
        } else {
            None
        }
    }

    /// How the token reads in a "found ..." message.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Identifier => format!("identifier `{}`", self.text),
            TokenKind::Integer | TokenKind::HexInteger => format!("integer `{}`", self.text),
            kind => kind.describe().to_string(),
        }
    }
}

/// Parse a decimal or `0x` hexadecimal literal with an optional sign.
pub fn parse_integer(text: &str) -> Option<i64> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let magnitude = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => i128::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<i128>().ok()?,
    };

    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

/// Lazy token sequence over one file.
///
/// Comments are dropped. An unrecognized character yields a lex diagnostic
/// and the rest of its line is skipped before lexing resumes; an unclosed
/// block comment yields one diagnostic and ends the stream. Cloning the
/// stream snapshots its position, and [`tokenize`] restarts it from the top.
#[derive(Clone)]
pub struct TokenStream<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    source: &'src str,
    file: &'src Path,
    line: usize,
    line_start: usize,
    scanned: usize,
}

/// Start lexing `source`, attributing positions to `file`.
pub fn tokenize<'src>(source: &'src str, file: &'src Path) -> TokenStream<'src> {
    TokenStream {
        inner: TokenKind::lexer(source),
        source,
        file,
        line: 1,
        line_start: 0,
        scanned: 0,
    }
}

impl<'src> TokenStream<'src> {
    pub fn file(&self) -> &'src Path {
        self.file
    }

    /// Position just past the last byte of the source; used for
    /// "end of file" messages.
    pub fn end_position(&self) -> (usize, usize) {
        let mut probe = self.clone();
        probe.position(self.source.len())
    }

    fn position(&mut self, offset: usize) -> (usize, usize) {
        if offset > self.scanned {
            for (i, byte) in self.source[self.scanned..offset].bytes().enumerate() {
                if byte == b'\n' {
                    self.line += 1;
                    self.line_start = self.scanned + i + 1;
                }
            }
            self.scanned = offset;
        }
        let column = self.source[self.line_start..offset].chars().count() + 1;
        (self.line, column)
    }
}

impl<'src> Iterator for TokenStream<'src> {
    type Item = Result<Token<'src>, Diagnostic>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let result = self.inner.next()?;
            let span = self.inner.span();
            let (line, column) = self.position(span.start);

            match result {
                Ok(TokenKind::LineComment | TokenKind::BlockComment) => continue,
                Ok(TokenKind::UnterminatedComment) => {
                    let rest = self.inner.remainder().len();
                    self.inner.bump(rest);
                    tracing::trace!(
                        line,
                        column,
                        skipped = rest,
                        "unterminated comment runs to end of file"
                    );

                    return Some(Err(Diagnostic::error(
                        DiagnosticKind::Lex,
                        self.file,
                        line,
                        column,
                        "unterminated block comment, ignoring the rest of the file",
                    )));
                }
                Ok(kind) => {
                    return Some(Ok(Token {
                        kind,
                        text: self.inner.slice(),
                        line,
                        column,
                    }));
                }
                Err(()) => {
                    let found = self.inner.slice().chars().next().unwrap_or('\0');
                    let rest = self.inner.remainder();
                    let skip = rest.find('\n').unwrap_or(rest.len());
                    self.inner.bump(skip);
                    tracing::trace!(line, column, skipped = skip, "lexer resync to end of line");

                    return Some(Err(Diagnostic::error(
                        DiagnosticKind::Lex,
                        self.file,
                        line,
                        column,
                        format!("unexpected character {:?}, skipping to end of line", found),
                    )));
                }
            }
        }
    }
}

/// Lex a whole file eagerly, splitting tokens from diagnostics.
pub fn lex_all<'src>(source: &'src str, file: &'src Path) -> (Vec<Token<'src>>, Vec<Diagnostic>) {
    let mut tokens = Vec::new();
    let mut diagnostics = Vec::new();
    for item in tokenize(source, file) {
        match item {
            Ok(token) => tokens.push(token),
            Err(diagnostic) => diagnostics.push(diagnostic),
        }
    }
    (tokens, diagnostics)
}
