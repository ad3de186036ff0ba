//! Rendering of validated enums into target-language source.
//!
//! Every target implements [`EnumTemplate`]; [`Target`] is the closed set of
//! templates and dispatches to them with a `match`. Rendering only walks
//! slices in declaration order, so identical input always renders to
//! identical bytes.

pub mod c;
pub mod cpp;
pub mod csharp;
pub mod go;
pub mod python;
pub mod rust;
pub mod typescript;

use crate::validator::EnumModel;
use convert_case::{Case, Casing};
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use strum::{Display, EnumIter, EnumString};

/// Language the generated enums are written in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Target {
    C,
    Cpp,
    Csharp,
    Go,
    Python,
    #[default]
    Rust,
    #[serde(alias = "typescript")]
    #[strum(to_string = "ts", serialize = "typescript")]
    Ts,
}

impl Target {
    /// File extension of generated artifacts, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Target::C => c::CTemplate.extension(),
            Target::Cpp => cpp::CppTemplate.extension(),
            Target::Csharp => csharp::CsharpTemplate.extension(),
            Target::Go => go::GoTemplate.extension(),
            Target::Python => python::PythonTemplate.extension(),
            Target::Rust => rust::RustTemplate.extension(),
            Target::Ts => typescript::TypescriptTemplate.extension(),
        }
    }

    /// The construct each enum is rendered as, for `enumgen targets`.
    pub fn construct(self) -> &'static str {
        match self {
            Target::C => "typedef enum with prefixed enumerators",
            Target::Cpp => "enum class : std::int64_t",
            Target::Csharp => "enum : long",
            Target::Go => "named int64 type with a const block",
            Target::Python => "enum.IntEnum subclass",
            Target::Rust => "#[repr(i64)] enum",
            Target::Ts => "export enum",
        }
    }

    /// Render one artifact containing `enums`, in the given order.
    pub fn render(self, context: &RenderContext, enums: &[&EnumModel]) -> String {
        tracing::debug!(
            target_language = %self,
            stem = %context.stem,
            enum_count = enums.len(),
            "Rendering artifact"
        );
        match self {
            Target::C => render_with(&c::CTemplate, context, enums),
            Target::Cpp => render_with(&cpp::CppTemplate, context, enums),
            Target::Csharp => render_with(&csharp::CsharpTemplate, context, enums),
            Target::Go => render_with(&go::GoTemplate, context, enums),
            Target::Python => render_with(&python::PythonTemplate, context, enums),
            Target::Rust => render_with(&rust::RustTemplate, context, enums),
            Target::Ts => render_with(&typescript::TypescriptTemplate, context, enums),
        }
    }

    /// Every identifier `model` declares in this target, its own name first.
    pub fn emitted_names<'m>(self, model: &'m EnumModel) -> Vec<EmittedName<'m>> {
        match self {
            Target::C => emitted_names_with(&c::CTemplate, model),
            Target::Cpp => emitted_names_with(&cpp::CppTemplate, model),
            Target::Csharp => emitted_names_with(&csharp::CsharpTemplate, model),
            Target::Go => emitted_names_with(&go::GoTemplate, model),
            Target::Python => emitted_names_with(&python::PythonTemplate, model),
            Target::Rust => emitted_names_with(&rust::RustTemplate, model),
            Target::Ts => emitted_names_with(&typescript::TypescriptTemplate, model),
        }
    }

    /// Why a member called `name` cannot be emitted, if the target refuses it.
    pub fn rejects_member(self, name: &str) -> Option<&'static str> {
        match self {
            Target::C => c::CTemplate.rejects_member(name),
            Target::Cpp => cpp::CppTemplate.rejects_member(name),
            Target::Csharp => csharp::CsharpTemplate.rejects_member(name),
            Target::Go => go::GoTemplate.rejects_member(name),
            Target::Python => python::PythonTemplate.rejects_member(name),
            Target::Rust => rust::RustTemplate.rejects_member(name),
            Target::Ts => typescript::TypescriptTemplate.rejects_member(name),
        }
    }
}

/// What a template needs to know about the artifact besides its enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    /// File stem of the artifact (`colors` for `colors.rs`).
    pub stem: String,
    /// Module the artifact belongs to: its directory name, or the stem for
    /// an aggregate artifact.
    pub package: String,
    /// Declaration files the artifact is generated from, as shown in the banner.
    pub sources: Vec<String>,
}

impl RenderContext {
    pub fn new(stem: impl Into<String>, sources: Vec<String>) -> Self {
        let stem = stem.into();
        Self {
            package: stem.clone(),
            stem,
            sources,
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// The stem reduced to `[A-Za-z0-9_]`, for include guards.
    pub fn identifier_stem(&self) -> String {
        let cleaned: String = self
            .stem
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
            format!("_{}", cleaned)
        } else {
            cleaned
        }
    }

    fn banner_text(&self) -> String {
        format!(
            "Code generated by enumgen from {}. DO NOT EDIT.",
            self.sources.join(", ")
        )
    }
}

/// One target language's way of writing an enum.
pub trait EnumTemplate {
    /// Artifact extension, without the dot.
    fn extension(&self) -> &'static str;

    /// A one-line comment in the target's syntax, newline included.
    fn line_comment(&self, text: &str) -> String {
        format!("// {}\n", text)
    }

    /// Package clauses, imports, include guards.
    fn prelude(&self, _context: &RenderContext) -> String {
        String::new()
    }

    /// Emitted before every enum.
    fn separator(&self) -> &'static str {
        "\n"
    }

    /// Identifier the enum itself is declared under.
    fn type_identifier(&self, model: &EnumModel) -> String;

    /// Identifier `member` of `model` is emitted under.
    fn member_identifier(&self, model: &EnumModel, member: &str) -> String;

    /// Where enum names are declared.
    fn type_scope(&self) -> NameScope {
        NameScope::Artifact
    }

    /// Where member identifiers are declared.
    fn member_scope(&self) -> NameScope {
        NameScope::Enum
    }

    /// Why a member called `name` cannot be emitted, if the target refuses it.
    fn rejects_member(&self, _name: &str) -> Option<&'static str> {
        None
    }

    fn render_enum(&self, model: &EnumModel, out: &mut String);

    /// Closes whatever the prelude opened.
    fn epilogue(&self, _context: &RenderContext) -> String {
        String::new()
    }
}

/// Assemble a whole artifact with `template`.
pub fn render_with<T: EnumTemplate>(
    template: &T,
    context: &RenderContext,
    enums: &[&EnumModel],
) -> String {
    let mut out = template.line_comment(&context.banner_text());

    let prelude = template.prelude(context);
    if !prelude.is_empty() {
        out.push('\n');
        out.push_str(&prelude);
    }

    for model in enums {
        out.push_str(template.separator());
        template.render_enum(model, &mut out);
    }

    let epilogue = template.epilogue(context);
    if !epilogue.is_empty() {
        out.push('\n');
        out.push_str(&epilogue);
    }
    out
}

/// Where an emitted identifier is declared, and so what it can clash with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameScope {
    /// Inside the enum body.
    Enum,
    /// At the top level of one artifact.
    Artifact,
    /// Shared by every artifact written to the same directory.
    Package,
}

/// One identifier that generated code declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedName<'m> {
    pub identifier: String,
    /// Member the identifier is emitted for; `None` for the enum's own name.
    pub member: Option<&'m str>,
    pub scope: NameScope,
}

pub fn emitted_names_with<'m, T: EnumTemplate>(
    template: &T,
    model: &'m EnumModel,
) -> Vec<EmittedName<'m>> {
    let mut names = Vec::with_capacity(model.members.len() + 1);
    names.push(EmittedName {
        identifier: template.type_identifier(model),
        member: None,
        scope: template.type_scope(),
    });
    for member in &model.members {
        names.push(EmittedName {
            identifier: template.member_identifier(model, &member.name),
            member: Some(member.name.as_str()),
            scope: template.member_scope(),
        });
    }
    names
}

/// Identifiers declared by the enums admitted so far, used to keep two
/// enums (or two members) from being emitted under the same name.
#[derive(Debug)]
pub struct NameRegistry {
    target: Target,
    artifact: HashMap<String, String>,
    package: HashMap<(PathBuf, String), String>,
}

impl NameRegistry {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            artifact: HashMap::new(),
            package: HashMap::new(),
        }
    }

    /// Forget artifact-level names before the next artifact is checked.
    pub fn start_artifact(&mut self) {
        self.artifact.clear();
    }

    /// Record the names `model` declares in an artifact written to
    /// `directory`. Nothing is recorded when one of them is unusable or
    /// already taken, and the reason is returned instead.
    pub fn admit(&mut self, directory: &Path, model: &EnumModel) -> Result<(), String> {
        for member in &model.members {
            if let Some(reason) = self.target.rejects_member(&member.name) {
                return Err(format!(
                    "{} cannot be emitted in {} output: {}",
                    describe_owner(model, Some(member.name.as_str())),
                    self.target,
                    reason
                ));
            }
        }

        let names = self.target.emitted_names(model);
        let mut own: HashMap<(bool, &str), &EmittedName<'_>> = HashMap::new();
        for name in &names {
            let key = (name.scope == NameScope::Enum, name.identifier.as_str());
            if let Some(earlier) = own.insert(key, name) {
                return Err(format!(
                    "{} and {} are both emitted as `{}` in {} output",
                    describe_owner(model, earlier.member),
                    describe_owner(model, name.member),
                    name.identifier,
                    self.target
                ));
            }

            let taken = match name.scope {
                NameScope::Enum => None,
                NameScope::Artifact => self.artifact.get(&name.identifier),
                NameScope::Package => self
                    .package
                    .get(&(directory.to_path_buf(), name.identifier.clone())),
            };
            if let Some(owner) = taken {
                return Err(format!(
                    "{} is emitted as `{}` in {} output, which {} already declares",
                    describe_owner(model, name.member),
                    name.identifier,
                    self.target,
                    owner
                ));
            }
        }

        for name in names {
            let owner = describe_owner(model, name.member);
            match name.scope {
                NameScope::Enum => {}
                NameScope::Artifact => {
                    self.artifact.insert(name.identifier, owner);
                }
                NameScope::Package => {
                    self.package
                        .insert((directory.to_path_buf(), name.identifier), owner);
                }
            }
        }
        Ok(())
    }
}

fn describe_owner(model: &EnumModel, member: Option<&str>) -> String {
    match member {
        Some(member) => format!("member `{}` of enum `{}`", member, model.name),
        None => format!("enum `{}`", model.name),
    }
}

/// `name_` when `name` is reserved in the target language.
pub(crate) fn suffix_reserved<'a>(name: &'a str, reserved: &[&str]) -> Cow<'a, str> {
    if reserved.contains(&name) {
        Cow::Owned(format!("{}_", name))
    } else {
        Cow::Borrowed(name)
    }
}

/// Integer literal that C and C++ accept for every `i64`.
pub(crate) fn c_integer_literal(value: i64) -> String {
    if value == i64::MIN {
        "(-9223372036854775807 - 1)".to_string()
    } else {
        value.to_string()
    }
}

pub(crate) fn upper_snake(text: &str) -> String {
    text.to_case(Case::UpperSnake)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::validator::{EnumModel, ResolvedMember};
    use std::path::PathBuf;

    pub fn model(name: &str, members: &[(&str, i64)]) -> EnumModel {
        EnumModel {
            name: name.to_string(),
            members: members
                .iter()
                .map(|(n, v)| ResolvedMember {
                    name: n.to_string(),
                    value: *v,
                })
                .collect(),
            source_file: PathBuf::from("colors.enumgen"),
            source_line: 1,
            source_column: 1,
        }
    }

    pub fn color() -> EnumModel {
        model("Color", &[("Red", 0), ("Green", 1), ("Blue", 10)])
    }

    pub fn context() -> super::RenderContext {
        super::RenderContext::new("colors", vec!["colors.enumgen".to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{color, context, model};
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_target_names_round_trip() {
        for target in Target::iter() {
            let name = target.to_string();
            assert_eq!(Target::from_str(&name).unwrap(), target);
        }
        assert_eq!(Target::from_str("typescript").unwrap(), Target::Ts);
        assert_eq!(Target::Csharp.to_string(), "csharp");
        assert!(Target::from_str("cobol").is_err());
    }

    #[test]
    fn test_target_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Holder {
            target: Target,
        }
        let holder: Holder = toml::from_str("target = \"go\"").unwrap();
        assert_eq!(holder.target, Target::Go);
        let holder: Holder = toml::from_str("target = \"typescript\"").unwrap();
        assert_eq!(holder.target, Target::Ts);
    }

    #[test]
    fn test_extensions_are_distinct() {
        let mut extensions: Vec<&str> = Target::iter().map(Target::extension).collect();
        extensions.sort_unstable();
        extensions.dedup();
        assert_eq!(extensions.len(), Target::iter().count());
    }

    #[test]
    fn test_every_target_starts_with_banner() {
        let enums = [&color()];
        for target in Target::iter() {
            let output = target.render(&context(), &enums);
            let first_line = output.lines().next().unwrap();
            assert!(
                first_line.contains("Code generated by enumgen from colors.enumgen. DO NOT EDIT."),
                "{} banner: {}",
                target,
                first_line
            );
            assert!(output.ends_with('\n'), "{} output must end with a newline", target);
        }
    }

    #[test]
    fn test_members_rendered_in_declaration_order() {
        let shuffled = model("Order", &[("Zed", 3), ("Alpha", 1), ("Mid", 2)]);
        for target in Target::iter() {
            let output = target.render(&context(), &[&shuffled]);
            let zed = output.find("Zed").unwrap();
            let alpha = output.find("Alpha").unwrap();
            let mid = output.find("Mid").unwrap();
            assert!(zed < alpha && alpha < mid, "{} reordered members", target);
        }
    }

    #[test]
    fn test_identifier_stem() {
        assert_eq!(RenderContext::new("my-colors.v2", vec![]).identifier_stem(), "my_colors_v2");
        assert_eq!(RenderContext::new("2d", vec![]).identifier_stem(), "_2d");
    }

    #[test]
    fn test_pasted_go_constants_clash_across_enums() {
        let mut registry = NameRegistry::new(Target::Go);
        let dir = Path::new("out");
        registry.admit(dir, &model("A", &[("BC", 0)])).unwrap();
        let err = registry.admit(dir, &model("AB", &[("C", 0)])).unwrap_err();
        assert_eq!(
            err,
            "member `C` of enum `AB` is emitted as `ABC` in go output, which member `BC` of enum `A` already declares"
        );
    }

    #[test]
    fn test_go_names_are_shared_by_one_directory() {
        let mut registry = NameRegistry::new(Target::Go);
        registry.admit(Path::new("a"), &model("A", &[("BC", 0)])).unwrap();
        registry.start_artifact();
        assert!(registry.admit(Path::new("b"), &model("AB", &[("C", 0)])).is_ok());
        assert!(registry.admit(Path::new("a"), &model("ABC", &[])).is_err());
    }

    #[test]
    fn test_c_enumerator_clashes_with_typedef() {
        let mut registry = NameRegistry::new(Target::C);
        let dir = Path::new("out");
        registry.admit(dir, &model("A", &[("B_C", 0)])).unwrap();
        let err = registry.admit(dir, &model("A_B", &[("C", 0)])).unwrap_err();
        assert!(err.contains("emitted as `A_B_C`"), "{}", err);

        registry.start_artifact();
        assert!(registry.admit(dir, &model("A_B", &[("C", 0)])).is_ok());
    }

    #[test]
    fn test_rejected_enum_declares_nothing() {
        let mut registry = NameRegistry::new(Target::Go);
        let dir = Path::new("out");
        registry.admit(dir, &model("A", &[("BC", 0)])).unwrap();
        assert!(registry.admit(dir, &model("AB", &[("X", 1), ("C", 0)])).is_err());
        assert!(registry.admit(dir, &model("ABX", &[])).is_ok());
    }

    #[test]
    fn test_escaped_member_clashes_with_member() {
        let mixed = model("E", &[("Self", 0), ("Self_", 1)]);
        let err = NameRegistry::new(Target::Rust)
            .admit(Path::new("out"), &mixed)
            .unwrap_err();
        assert_eq!(
            err,
            "member `Self` of enum `E` and member `Self_` of enum `E` are both emitted as `Self_` in rust output"
        );
        assert!(NameRegistry::new(Target::Ts).admit(Path::new("out"), &mixed).is_ok());
    }

    #[test]
    fn test_escaped_enum_name_clashes_with_enum() {
        let mut registry = NameRegistry::new(Target::Python);
        let dir = Path::new("out");
        registry.admit(dir, &model("None", &[("A", 0)])).unwrap();
        let err = registry.admit(dir, &model("None_", &[("B", 0)])).unwrap_err();
        assert!(err.contains("which enum `None` already declares"), "{}", err);
    }

    #[test]
    fn test_member_named_like_its_enum_is_fine() {
        for target in Target::iter() {
            let own = model("Unit", &[("Unit", 0)]);
            assert!(
                NameRegistry::new(target).admit(Path::new("out"), &own).is_ok(),
                "{}",
                target
            );
        }
    }

    #[test]
    fn test_python_refuses_reserved_member_names() {
        let mut registry = NameRegistry::new(Target::Python);
        let err = registry
            .admit(Path::new("out"), &model("E", &[("A", 0), ("_ignore_", 1)]))
            .unwrap_err();
        assert!(err.starts_with("member `_ignore_` of enum `E` cannot be emitted in python output"));
        assert!(
            registry
                .admit(Path::new("out"), &model("P", &[("__hidden", 0)]))
                .is_err()
        );
        assert!(
            registry
                .admit(Path::new("out"), &model("Q", &[("_single", 0), ("_", 1)]))
                .is_ok()
        );
        assert_eq!(Target::Rust.rejects_member("_ignore_"), None);
    }

    #[test]
    fn test_i64_min_literal() {
        assert_eq!(c_integer_literal(i64::MIN), "(-9223372036854775807 - 1)");
        assert_eq!(c_integer_literal(-5), "-5");
    }

    proptest! {
        #[test]
        fn prop_rendering_is_deterministic(values in proptest::collection::vec(any::<i64>(), 0..16)) {
            let members: Vec<(String, i64)> = values
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("M{}", i), *v))
                .collect();
            let borrowed: Vec<(&str, i64)> = members.iter().map(|(n, v)| (n.as_str(), *v)).collect();
            let m = model("Prop", &borrowed);
            for target in Target::iter() {
                let first = target.render(&context(), &[&m]);
                let second = target.render(&context(), &[&m.clone()]);
                prop_assert_eq!(first, second);
            }
        }
    }
}
