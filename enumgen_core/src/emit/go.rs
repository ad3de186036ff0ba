//! Go named integer types with a typed `const` block.

use super::{EnumTemplate, NameScope, RenderContext, suffix_reserved};
use crate::validator::EnumModel;

const KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range", "return",
    "select", "struct", "switch", "type", "var",
];

pub struct GoTemplate;

/// Package clause name: the lowercased alphanumerics of the artifact's
/// package, so every file of one directory agrees on it.
fn package_name(context: &RenderContext) -> String {
    let name: String = context
        .package
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("enums{}", name)
    } else {
        suffix_reserved(&name, KEYWORDS).into_owned()
    }
}

impl EnumTemplate for GoTemplate {
    fn extension(&self) -> &'static str {
        "go"
    }

    fn prelude(&self, context: &RenderContext) -> String {
        format!("package {}\n", package_name(context))
    }

    fn type_identifier(&self, model: &EnumModel) -> String {
        suffix_reserved(&model.name, KEYWORDS).into_owned()
    }

    // Enumerators share the package scope, so they carry the type name.
    fn member_identifier(&self, model: &EnumModel, member: &str) -> String {
        format!("{}{}", self.type_identifier(model), member)
    }

    fn type_scope(&self) -> NameScope {
        NameScope::Package
    }

    fn member_scope(&self) -> NameScope {
        NameScope::Package
    }

    fn render_enum(&self, model: &EnumModel, out: &mut String) {
        let type_name = self.type_identifier(model);
        out.push_str(&format!("type {} int64\n", type_name));
        if model.members.is_empty() {
            return;
        }

        let constants: Vec<String> = model
            .members
            .iter()
            .map(|m| self.member_identifier(model, &m.name))
            .collect();
        let width = constants.iter().map(String::len).max().unwrap_or(0);

        out.push_str("\nconst (\n");
        for (constant, member) in constants.iter().zip(&model.members) {
            out.push_str(&format!(
                "\t{:<width$} {} = {}\n",
                constant,
                type_name,
                member.value,
                width = width
            ));
        }
        out.push_str(")\n");
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
        let output = render_with(&GoTemplate, &context(), &[&color()]);
        assert_eq!(
            output,
            "// Code generated by enumgen from colors.enumgen. DO NOT EDIT.

package colors

type Color int64

const (
\tColorRed   Color = 0
\tColorGreen Color = 1
\tColorBlue  Color = 10
)
"
        );
    }

    #[test]
    fn test_package_name_from_package() {
        let ctx = |package: &str| RenderContext::new("colors", vec![]).with_package(package);
        assert_eq!(package_name(&ctx("My-Colors")), "mycolors");
        assert_eq!(package_name(&ctx("2d_shapes")), "enums2dshapes");
        assert_eq!(package_name(&ctx("type")), "type_");
        assert_eq!(package_name(&ctx("")), "enums");
    }

    #[test]
    fn test_files_of_one_package_share_the_clause() {
        let colors = RenderContext::new("colors", vec![]).with_package("defs");
        let shapes = RenderContext::new("shapes", vec![]).with_package("defs");
        let a = render_with(&GoTemplate, &colors, &[&color()]);
        let b = render_with(&GoTemplate, &shapes, &[&model("Shape", &[("Circle", 0)])]);
        assert!(a.contains("\npackage defs\n"));
        assert!(b.contains("\npackage defs\n"));
    }

    #[test]
    fn test_empty_enum_is_bare_type() {
        let output = render_with(&GoTemplate, &context(), &[&model("Unit", &[])]);
        assert!(output.ends_with("\ntype Unit int64\n"));
        assert!(!output.contains("const"));
    }
}
