//! C# enums backed by `long`.

use super::EnumTemplate;
use crate::validator::EnumModel;
use std::borrow::Cow;

const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

pub struct CsharpTemplate;

/// Verbatim identifier (`@class`) for keywords.
fn identifier(name: &str) -> Cow<'_, str> {
    if KEYWORDS.contains(&name) {
        Cow::Owned(format!("@{}", name))
    } else {
        Cow::Borrowed(name)
    }
}

impl EnumTemplate for CsharpTemplate {
    fn extension(&self) -> &'static str {
        "cs"
    }

    fn type_identifier(&self, model: &EnumModel) -> String {
        identifier(&model.name).into_owned()
    }

    fn member_identifier(&self, _model: &EnumModel, member: &str) -> String {
        identifier(member).into_owned()
    }

    fn render_enum(&self, model: &EnumModel, out: &mut String) {
        out.push_str(&format!(
            "public enum {} : long\n{{\n",
            self.type_identifier(model)
        ));
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
