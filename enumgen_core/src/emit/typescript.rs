//! TypeScript `export enum` declarations.

use super::{EnumTemplate, suffix_reserved};
use crate::validator::EnumModel;

/// Reserved words that cannot name an enum. Member names are property names
/// and may be reserved words.
const RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "export", "extends", "false", "finally", "for", "function", "if", "implements",
    "import", "in", "instanceof", "interface", "let", "new", "null", "package", "private",
    "protected", "public", "return", "static", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with", "yield",
];

pub struct TypescriptTemplate;

impl EnumTemplate for TypescriptTemplate {
    fn extension(&self) -> &'static str {
        "ts"
    }

    fn type_identifier(&self, model: &EnumModel) -> String {
        suffix_reserved(&model.name, RESERVED).into_owned()
    }

    fn member_identifier(&self, _model: &EnumModel, member: &str) -> String {
        member.to_string()
    }

    fn render_enum(&self, model: &EnumModel, out: &mut String) {
        out.push_str(&format!("export enum {} {{\n", self.type_identifier(model)));
        for member in &model.members {
            out.push_str(&format!(
                "  {} = {},\n",
                self.member_identifier(model, &member.name),
                member.value
            ));
        }
        out.push_str("}\n");
    }
}
