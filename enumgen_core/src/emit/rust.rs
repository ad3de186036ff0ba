//! Rust `#[repr(i64)]` enums.

use super::EnumTemplate;
use crate::validator::EnumModel;
use std::borrow::Cow;

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "extern", "false", "fn",
    "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
    "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where", "while",
    "abstract", "become", "box", "do", "final", "gen", "macro", "override", "priv", "try",
    "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NON_RAW: &[&str] = &["crate", "self", "Self", "super"];

pub struct RustTemplate;

fn identifier(name: &str) -> Cow<'_, str> {
    if NON_RAW.contains(&name) {
        Cow::Owned(format!("{}_", name))
    } else if KEYWORDS.contains(&name) {
        Cow::Owned(format!("r#{}", name))
    } else {
        Cow::Borrowed(name)
    }
}

impl EnumTemplate for RustTemplate {
    fn extension(&self) -> &'static str {
        "rs"
    }

    fn type_identifier(&self, model: &EnumModel) -> String {
        identifier(&model.name).into_owned()
    }

    fn member_identifier(&self, _model: &EnumModel, member: &str) -> String {
        identifier(member).into_owned()
    }

    fn render_enum(&self, model: &EnumModel, out: &mut String) {
        // `repr` is rejected on zero-variant enums.
        if !model.members.is_empty() {
            out.push_str("#[repr(i64)]\n");
        }
        out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]\n");
        out.push_str(&format!("pub enum {} {{\n", self.type_identifier(model)));
        for member in &model.members {
            out.push_str(&format!(
                "    {} = {},\n",
                self.member_identifier(model, &member.name),
                member.value
            ));
        }
        out.push_str("}\n");
    }
}
