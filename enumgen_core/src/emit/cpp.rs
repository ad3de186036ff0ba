//! C++11 scoped enums with a fixed 64-bit underlying type.

use super::{EnumTemplate, RenderContext, c_integer_literal, suffix_reserved};
use crate::validator::EnumModel;

const KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "explicit", "export", "extern", "false", "float", "for", "friend", "goto", "if",
    "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

pub struct CppTemplate;

impl EnumTemplate for CppTemplate {
    fn extension(&self) -> &'static str {
        "hpp"
    }

    fn prelude(&self, _context: &RenderContext) -> String {
        "#pragma once\n\n#include <cstdint>\n".to_string()
    }

    fn type_identifier(&self, model: &EnumModel) -> String {
        suffix_reserved(&model.name, KEYWORDS).into_owned()
    }

    fn member_identifier(&self, _model: &EnumModel, member: &str) -> String {
        suffix_reserved(member, KEYWORDS).into_owned()
    }

    fn render_enum(&self, model: &EnumModel, out: &mut String) {
        out.push_str(&format!(
            "enum class {} : std::int64_t {{\n",
            self.type_identifier(model)
        ));
        for member in &model.members {
            out.push_str(&format!(
                "    {} = {},\n",
                self.member_identifier(model, &member.name),
                c_integer_literal(member.value)
            ));
        }
        out.push_str("};\n");
    }
}
