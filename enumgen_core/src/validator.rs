//! Cross-file semantic validation and member value resolution.
//!
//! Runs once every file has been parsed, because duplicate enum names can
//! only be detected over the whole run.

use crate::diagnostic::{Diagnostic, DiagnosticKind, format_location};
use crate::parser::ast::{EnumDecl, MemberDecl};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use tracing::{debug, info};

/// A member with its final value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMember {
    pub name: String,
    pub value: i64,
}

/// A validated enum, ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumModel {
    pub name: String,
    pub members: Vec<ResolvedMember>,
    pub source_file: PathBuf,
    pub source_line: usize,
    pub source_column: usize,
}

/// Valid enums keyed by name, iterated in declaration order.
#[derive(Debug, Clone, Default)]
pub struct EnumSet {
    enums: Vec<EnumModel>,
    index: HashMap<String, usize>,
}

impl EnumSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, model: EnumModel) {
        self.index.insert(model.name.clone(), self.enums.len());
        self.enums.push(model);
    }

    pub fn get(&self, name: &str) -> Option<&EnumModel> {
        self.index.get(name).map(|&i| &self.enums[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EnumModel> {
        self.enums.iter()
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }

}

impl<'a> IntoIterator for &'a EnumSet {
    type Item = &'a EnumModel;
    type IntoIter = std::slice::Iter<'a, EnumModel>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A declaration that was dropped, and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEnum {
    pub name: String,
    pub source_file: PathBuf,
    pub source_line: usize,
}

/// Result of validating a whole run.
#[derive(Debug, Clone, Default)]
pub struct Validation {
    pub enums: EnumSet,
    pub rejected: Vec<RejectedEnum>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Validate every declaration of the run.
///
/// `decls` must already be in run order (files by path, declarations in
/// source order); that order is kept in the returned [`EnumSet`].
pub fn validate(decls: Vec<EnumDecl>) -> Validation {
    info!(declarations = decls.len(), "Validating enum declarations");

    let mut validation = Validation::default();
    let duplicated = report_duplicate_names(&decls, &mut validation.diagnostics);

    for decl in &decls {
        let resolved = resolve(decl, &mut validation.diagnostics);

        match resolved {
            Some(model) if !duplicated.contains(decl.name.as_str()) => {
                debug!(name = %model.name, members = model.members.len(), "Enum validated");
                validation.enums.insert(model);
            }
            _ => {
                debug!(name = %decl.name, file = %decl.source_file.display(), "Enum rejected");
                validation.rejected.push(RejectedEnum {
                    name: decl.name.clone(),
                    source_file: decl.source_file.clone(),
                    source_line: decl.source_line,
                });
            }
        }
    }

    info!(
        valid = validation.enums.len(),
        rejected = validation.rejected.len(),
        "Validation complete"
    );
    validation
}

/// One diagnostic per duplicated name, placed at its last declaration and
/// citing every site. Returns the duplicated names.
fn report_duplicate_names<'a>(
    decls: &'a [EnumDecl],
    diagnostics: &mut Vec<Diagnostic>,
) -> HashSet<&'a str> {
    let mut sites: HashMap<&str, Vec<&EnumDecl>> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();
    for decl in decls {
        let entry = sites.entry(decl.name.as_str()).or_default();
        if entry.is_empty() {
            first_seen.push(decl.name.as_str());
        }
        entry.push(decl);
    }

    let mut duplicated = HashSet::new();
    for name in first_seen {
        let occurrences = &sites[name];
        let Some((last, _)) = occurrences.split_last() else {
            continue;
        };
        if occurrences.len() < 2 {
            continue;
        }

        let locations: Vec<String> = occurrences
            .iter()
            .map(|d| format_location(&d.source_file, d.source_line, d.source_column))
            .collect();
        diagnostics.push(Diagnostic::error(
            DiagnosticKind::Semantic,
            &last.source_file,
            last.source_line,
            last.source_column,
            format!(
                "duplicate enum `{}` declared at {}; every declaration is excluded",
                name,
                join_list(&locations)
            ),
        ));
        duplicated.insert(name);
    }
    duplicated
}

/// Resolve member values left to right and check the per-enum invariants.
fn resolve(decl: &EnumDecl, diagnostics: &mut Vec<Diagnostic>) -> Option<EnumModel> {
    let mut valid = true;
    let mut names: HashMap<&str, &MemberDecl> = HashMap::new();
    let mut values: HashMap<i64, &MemberDecl> = HashMap::new();
    let mut collisions: Vec<(&MemberDecl, &MemberDecl, i64)> = Vec::new();
    let mut members = Vec::with_capacity(decl.members.len());
    let mut previous: Option<i64> = None;

    if decl.members.is_empty() {
        diagnostics.push(Diagnostic::warning(
            DiagnosticKind::Semantic,
            &decl.source_file,
            decl.source_line,
            decl.source_column,
            format!("enum `{}` has no members", decl.name),
        ));
    }

    for member in &decl.members {
        let value = match (member.explicit_value, previous) {
            (Some(explicit), _) => explicit,
            (None, None) => 0,
            (None, Some(prev)) => match prev.checked_add(1) {
                Some(next) => next,
                None => {
                    diagnostics.push(member_error(
                        decl,
                        member,
                        format!(
                            "value of member `{}` in enum `{}` overflows a 64-bit integer",
                            member.name, decl.name
                        ),
                    ));
                    valid = false;
                    break;
                }
            },
        };
        previous = Some(value);

        if let Some(first) = names.get(member.name.as_str()) {
            diagnostics.push(member_error(
                decl,
                member,
                format!(
                    "duplicate member `{}` in enum `{}` (first declared on line {})",
                    member.name, decl.name, first.source_line
                ),
            ));
            valid = false;
            continue;
        }
        names.insert(member.name.as_str(), member);

        match values.get(&value) {
            Some(&holder) => collisions.push((member, holder, value)),
            None => {
                values.insert(value, member);
            }
        }

        members.push(ResolvedMember {
            name: member.name.clone(),
            value,
        });
    }

    // One diagnostic per enum, at the first member whose value was taken.
    if let Some(&(first, _, _)) = collisions.first() {
        let pairs: Vec<String> = collisions
            .iter()
            .map(|(member, holder, value)| {
                format!(
                    "`{}` = {} collides with `{}` (line {})",
                    member.name, value, holder.name, holder.source_line
                )
            })
            .collect();
        diagnostics.push(member_error(
            decl,
            first,
            format!(
                "enum `{}` has colliding member values: {}",
                decl.name,
                join_list(&pairs)
            ),
        ));
        valid = false;
    }

    valid.then(|| EnumModel {
        name: decl.name.clone(),
        members,
        source_file: decl.source_file.clone(),
        source_line: decl.source_line,
        source_column: decl.source_column,
    })
}

fn member_error(decl: &EnumDecl, member: &MemberDecl, message: String) -> Diagnostic {
    Diagnostic::error(
        DiagnosticKind::Semantic,
        &decl.source_file,
        member.source_line,
        member.source_column,
        message,
    )
}

fn join_list(items: &[String]) -> String {
    match items.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}
