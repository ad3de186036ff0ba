//! C `typedef enum` declarations behind an include guard.
//!
//! Enumerators live in the file scope in C, so each one is prefixed with its
//! enum name (`Color_Red`). Values outside the `int` range need a C23
//! compiler.

use super::{
    EnumTemplate, NameScope, RenderContext, c_integer_literal, suffix_reserved, upper_snake,
};
use crate::validator::EnumModel;

const KEYWORDS: &[&str] = &[
    "auto", "bool", "break", "case", "char", "const", "continue", "default", "do", "double",
    "else", "extern", "false", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "true",
    "typedef", "union", "unsigned", "void", "volatile", "while",
];

pub struct CTemplate;

fn include_guard(context: &RenderContext) -> String {
    format!("ENUMGEN_{}_H", upper_snake(&context.identifier_stem()))
}

impl EnumTemplate for CTemplate {
    fn extension(&self) -> &'static str {
        "h"
    }

    fn line_comment(&self, text: &str) -> String {
        format!("/* {} */\n", text)
    }

    fn prelude(&self, context: &RenderContext) -> String {
        let guard = include_guard(context);
        format!("#ifndef {guard}\n#define {guard}\n")
    }

    fn type_identifier(&self, model: &EnumModel) -> String {
        suffix_reserved(&model.name, KEYWORDS).into_owned()
    }

    fn member_identifier(&self, model: &EnumModel, member: &str) -> String {
        format!("{}_{}", self.type_identifier(model), member)
    }

    fn member_scope(&self) -> NameScope {
        NameScope::Artifact
    }

    fn render_enum(&self, model: &EnumModel, out: &mut String) {
        let name = self.type_identifier(model);

        // C has no empty enums.
        if model.members.is_empty() {
            out.push_str(&format!("typedef int {}; /* no members */\n", name));
            return;
        }

        let enumerators: Vec<String> = model
            .members
            .iter()
            .map(|m| {
                format!(
                    "    {} = {}",
                    self.member_identifier(model, &m.name),
                    c_integer_literal(m.value)
                )
            })
            .collect();
        out.push_str(&format!("typedef enum {} {{\n", name));
        out.push_str(&enumerators.join(",\n"));
        out.push_str(&format!("\n}} {};\n", name));
    }

    fn epilogue(&self, context: &RenderContext) -> String {
        format!("#endif /* {} */\n", include_guard(context))
    }
}
