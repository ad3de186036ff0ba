//! Python `IntEnum` classes.

use super::{EnumTemplate, suffix_reserved};
use crate::validator::EnumModel;

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

pub struct PythonTemplate;

impl EnumTemplate for PythonTemplate {
    fn extension(&self) -> &'static str {
        "py"
    }

    fn line_comment(&self, text: &str) -> String {
        format!("# {}\n", text)
    }

    fn prelude(&self, _context: &super::RenderContext) -> String {
        "from enum import IntEnum\n".to_string()
    }

    // Two blank lines around top-level classes.
    fn separator(&self) -> &'static str {
        "\n\n"
    }

    fn type_identifier(&self, model: &EnumModel) -> String {
        suffix_reserved(&model.name, KEYWORDS).into_owned()
    }

    fn member_identifier(&self, _model: &EnumModel, member: &str) -> String {
        suffix_reserved(member, KEYWORDS).into_owned()
    }

    // `_sunder_` names are reserved by `enum`; `__dunder__` and `__private`
    // names never become members.
    fn rejects_member(&self, name: &str) -> Option<&'static str> {
        let sunder = name.len() > 2 && name.starts_with('_') && name.ends_with('_');
        (sunder || name.starts_with("__"))
            .then_some("IntEnum reserves names that start with `__` or are wrapped in `_`")
    }

    fn render_enum(&self, model: &EnumModel, out: &mut String) {
        out.push_str(&format!("class {}(IntEnum):\n", self.type_identifier(model)));
        if model.members.is_empty() {
            out.push_str("    pass\n");
        }
        for member in &model.members {
            out.push_str(&format!(
                "    {} = {}\n",
                self.member_identifier(model, &member.name),
                member.value
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{color, context, model};
    use super::super::render_with;
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generate_simple_enum() {
        let output = render_with(&PythonTemplate, &context(), &[&color()]);
        assert_eq!(
            output,
            "# Code generated by enumgen from colors.enumgen. DO NOT EDIT.

from enum import IntEnum


class Color(IntEnum):
    Red = 0
    Green = 1
    Blue = 10
"
        );
    }

    #[test]
    fn test_two_classes_and_empty_body() {
        let a = model("A", &[("X", 1)]);
        let empty = model("Empty", &[]);
        let output = render_with(&PythonTemplate, &context(), &[&a, &empty]);
        assert!(output.ends_with("    X = 1\n\n\nclass Empty(IntEnum):\n    pass\n"));
    }

    #[test]
    fn test_keywords_get_trailing_underscore() {
        let output = render_with(
            &PythonTemplate,
            &context(),
            &[&model("Flags", &[("None", 0), ("pass", 1)])],
        );
        assert!(output.contains("    None_ = 0\n    pass_ = 1\n"));
    }
}
