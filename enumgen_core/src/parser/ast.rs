//! Syntax tree of a declaration file.

use std::path::PathBuf;

/// One `enum` block as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    pub name: String,
    pub members: Vec<MemberDecl>,
    pub source_file: PathBuf,
    pub source_line: usize,
    pub source_column: usize,
}

/// One member line inside an `enum` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDecl {
    pub name: String,
    pub explicit_value: Option<i64>,
    pub source_line: usize,
    pub source_column: usize,
}

/// Everything parsed from a single file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigFile {
    pub enums: Vec<EnumDecl>,
}

impl ConfigFile {
    pub fn new() -> Self {
        Self::default()
    }
}
