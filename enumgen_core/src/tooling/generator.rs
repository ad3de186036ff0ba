//! The generation run: discover, parse in parallel, validate, emit.

use super::discovery::{DiscoveredFile, discover};
use super::writer::{WriteOutcome, write_if_changed};
use crate::config::{EmptyFileSeverity, EnumgenConfig, check_aggregate_stem, normalize_extension};
use crate::diagnostic::{Diagnostic, DiagnosticKind, Reporter, RunStatus, Severity};
use crate::emit::{NameRegistry, RenderContext, Target};
use crate::error::Result;
use crate::parser::{EnumDecl, parse_source};
use crate::validator::{EnumModel, validate};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use strum::Display;
use tracing::{debug, info};

/// Where a declaration file ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FileStage {
    Discovered,
    Loaded,
    /// Lexed and parsed; the parser consumes tokens as they are produced.
    Parsed,
    /// Passed validation; nothing was written (check mode).
    Validated,
    /// Its artifact was written or already up to date.
    Emitted,
    /// None of its declarations made it to an artifact.
    Rejected,
    /// Empty, or holds no declarations.
    Skipped,
}

/// Options of one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub roots: Vec<PathBuf>,

    /// Extension of declaration files, without the dot.
    pub extension: String,

    pub recursive: bool,

    pub target: Target,

    /// Artifacts go next to their inputs when unset.
    pub out_dir: Option<PathBuf>,

    /// Write every valid enum into `<out_dir>/<stem>.<ext>`.
    pub aggregate: Option<String>,

    pub empty_file: EmptyFileSeverity,

    /// Validate only; leave the file system untouched.
    pub check_only: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            extension: crate::config::DEFAULT_EXTENSION.to_string(),
            recursive: false,
            target: Target::default(),
            out_dir: None,
            aggregate: None,
            empty_file: EmptyFileSeverity::default(),
            check_only: false,
        }
    }
}

impl GeneratorOptions {
    pub fn builder() -> GeneratorOptionsBuilder {
        GeneratorOptionsBuilder::new()
    }

    /// Options carrying the values of `enumgen.toml`.
    pub fn from_config(config: &EnumgenConfig) -> Self {
        Self {
            extension: config.general.extension.clone(),
            recursive: config.general.recursive,
            target: config.output.target,
            out_dir: config.output.out_dir.as_ref().map(PathBuf::from),
            aggregate: config.output.aggregate.clone(),
            empty_file: config.output.empty_file,
            ..Self::default()
        }
    }
}

/// Builder for [`GeneratorOptions`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptionsBuilder {
    options: GeneratorOptions,
}

impl GeneratorOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the values of `enumgen.toml`.
    pub fn from_config(config: &EnumgenConfig) -> Self {
        Self {
            options: GeneratorOptions::from_config(config),
        }
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.options.roots.push(root.into());
        self
    }

    pub fn roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.options.roots.extend(roots);
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.options.extension = extension.into();
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.options.recursive = recursive;
        self
    }

    pub fn target(mut self, target: Target) -> Self {
        self.options.target = target;
        self
    }

    pub fn out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.options.out_dir = Some(out_dir.into());
        self
    }

    pub fn aggregate(mut self, stem: impl Into<String>) -> Self {
        self.options.aggregate = Some(stem.into());
        self
    }

    pub fn empty_file(mut self, empty_file: EmptyFileSeverity) -> Self {
        self.options.empty_file = empty_file;
        self
    }

    pub fn check_only(mut self, check_only: bool) -> Self {
        self.options.check_only = check_only;
        self
    }

    pub fn build(self) -> GeneratorOptions {
        self.options
    }
}

/// Final state of one declaration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub stage: FileStage,
}

/// An artifact of the run.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub bytes_written: usize,
    pub enum_count: usize,
    pub outcome: WriteOutcome,
}

/// Everything a run produced.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// In discovery order.
    pub files: Vec<FileReport>,
    pub artifacts: Vec<GeneratedFile>,
    pub enums_valid: usize,
    pub enums_rejected: usize,
    pub reporter: Reporter,
}

impl GenerationReport {
    pub fn status(&self) -> RunStatus {
        self.reporter.status()
    }

    pub fn stage_of(&self, path: &Path) -> Option<FileStage> {
        self.files.iter().find(|f| f.path == path).map(|f| f.stage)
    }
}

/// A file after the parallel load/lex/parse phase.
struct ParsedFile {
    file: DiscoveredFile,
    stage: FileStage,
    decls: Vec<EnumDecl>,
    diagnostics: Vec<Diagnostic>,
}

/// An artifact to render.
struct PlannedArtifact<'a> {
    path: PathBuf,
    context: RenderContext,
    enums: Vec<&'a EnumModel>,
    /// Indices into the parsed files it is generated from.
    inputs: Vec<usize>,
}

/// Runs the pipeline over a set of roots.
pub struct Generator {
    options: GeneratorOptions,
}

impl Generator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Run the whole pipeline.
    ///
    /// Only environment problems (an invalid root, bad options) are errors;
    /// everything wrong with the inputs is in the report's diagnostics.
    pub fn run(&self) -> Result<GenerationReport> {
        let extension = normalize_extension(&self.options.extension)?;
        if let Some(stem) = &self.options.aggregate {
            check_aggregate_stem(stem)?;
        }

        info!(
            roots = self.options.roots.len(),
            target = %self.options.target,
            check_only = self.options.check_only,
            "Starting enum generation"
        );
        let discovery = discover(&self.options.roots, &extension, self.options.recursive)?;

        let mut report = GenerationReport::default();
        report.reporter.extend(discovery.diagnostics);

        let empty_severity = self.options.empty_file.severity();
        let mut parsed: Vec<ParsedFile> = discovery
            .files
            .into_par_iter()
            .map(|file| load_and_parse(file, empty_severity))
            .collect();

        let decls: Vec<EnumDecl> = parsed
            .iter_mut()
            .flat_map(|p| std::mem::take(&mut p.decls))
            .collect();
        let declared = decls.len();
        for file in &mut parsed {
            report.reporter.extend(std::mem::take(&mut file.diagnostics));
        }

        let validation = validate(decls);
        report.reporter.extend(validation.diagnostics);
        report.enums_valid = validation.enums.len();
        report.enums_rejected = declared - validation.enums.len();

        // Files holding at least one valid enum.
        for file in &mut parsed {
            if file.stage == FileStage::Parsed {
                let has_valid = validation
                    .enums
                    .iter()
                    .any(|model| model.source_file == file.file.path);
                file.stage = if has_valid {
                    FileStage::Validated
                } else {
                    FileStage::Rejected
                };
            }
        }

        let enums: Vec<&EnumModel> = validation.enums.iter().collect();
        let mut artifacts = self.plan(&parsed, &enums, &extension, &mut report.reporter);
        let excluded = self.check_names(&mut artifacts, &mut report.reporter);
        report.enums_valid -= excluded;
        report.enums_rejected += excluded;

        // Files none of whose enums made it into an artifact.
        let planned: HashSet<&Path> = artifacts
            .iter()
            .flat_map(|a| a.enums.iter().map(|m| m.source_file.as_path()))
            .collect();
        for file in &mut parsed {
            if file.stage == FileStage::Validated && !planned.contains(file.file.path.as_path()) {
                file.stage = FileStage::Rejected;
            }
        }

        if self.options.check_only {
            info!("Check only, {} artifacts not written", artifacts.len());
        } else {
            self.emit(artifacts, &mut parsed, &mut report);
            // Inputs whose artifact could not be planned.
            for file in &mut parsed {
                if file.stage == FileStage::Validated {
                    file.stage = FileStage::Rejected;
                }
            }
        }

        report.files = parsed
            .into_iter()
            .map(|p| FileReport {
                path: p.file.path,
                stage: p.stage,
            })
            .collect();

        info!(
            files = report.files.len(),
            artifacts = report.artifacts.len(),
            errors = report.reporter.error_count(),
            warnings = report.reporter.warning_count(),
            "Enum generation complete"
        );
        Ok(report)
    }

    /// Decide which artifacts the run produces and where they go.
    fn plan<'a>(
        &self,
        parsed: &[ParsedFile],
        enums: &[&'a EnumModel],
        extension: &str,
        reporter: &mut Reporter,
    ) -> Vec<PlannedArtifact<'a>> {
        let target_ext = self.options.target.extension();
        let mut candidates = Vec::new();

        match &self.options.aggregate {
            Some(stem) => {
                let inputs: Vec<usize> = parsed
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.stage == FileStage::Validated)
                    .map(|(i, _)| i)
                    .collect();
                if inputs.is_empty() {
                    info!("No valid enums, aggregate artifact not produced");
                    return Vec::new();
                }
                let base = match &self.options.out_dir {
                    Some(out_dir) => out_dir.clone(),
                    None => parsed[inputs[0]].file.root.clone(),
                };
                let sources = inputs.iter().map(|&i| source_name(&parsed[i].file)).collect();
                candidates.push(PlannedArtifact {
                    path: base.join(format!("{}.{}", stem, target_ext)),
                    context: RenderContext::new(stem.clone(), sources),
                    enums: enums.to_vec(),
                    inputs,
                });
            }
            None => {
                let mut by_file: HashMap<&Path, Vec<&'a EnumModel>> = HashMap::new();
                for &model in enums {
                    by_file.entry(model.source_file.as_path()).or_default().push(model);
                }

                for (index, p) in parsed.iter().enumerate() {
                    let Some(models) = by_file.remove(p.file.path.as_path()) else {
                        continue;
                    };
                    let stem = artifact_stem(&p.file.relative, extension);
                    let relative = p.file.relative.with_file_name(format!("{}.{}", stem, target_ext));
                    let base = self.options.out_dir.as_ref().unwrap_or(&p.file.root);
                    let path = base.join(relative);
                    let package = package_of(&path).unwrap_or_else(|| stem.clone());
                    candidates.push(PlannedArtifact {
                        context: RenderContext::new(stem, vec![source_name(&p.file)])
                            .with_package(package),
                        path,
                        enums: models,
                        inputs: vec![index],
                    });
                }
            }
        }

        let declaration_files: HashSet<&Path> =
            parsed.iter().map(|p| p.file.path.as_path()).collect();
        let mut produced: HashMap<PathBuf, PathBuf> = HashMap::new();
        let mut planned = Vec::with_capacity(candidates.len());

        for artifact in candidates {
            let first_input = &parsed[artifact.inputs[0]].file.path;
            let conflict = if declaration_files.contains(artifact.path.as_path()) {
                Some(format!(
                    "output path {} would overwrite a declaration file",
                    artifact.path.display()
                ))
            } else {
                produced.get(&artifact.path).map(|other| {
                    format!(
                        "output path {} is already produced from {}",
                        artifact.path.display(),
                        other.display()
                    )
                })
            };

            if let Some(message) = conflict {
                debug!("{}", message);
                reporter.push(Diagnostic::for_file(
                    Severity::Error,
                    DiagnosticKind::Io,
                    first_input,
                    message,
                ));
                continue;
            }

            produced.insert(artifact.path.clone(), first_input.clone());
            debug!("Planned {:?} with {} enums", artifact.path, artifact.enums.len());
            planned.push(artifact);
        }
        planned
    }

    /// Drop enums whose generated identifiers are unusable or already taken
    /// by an earlier enum. Returns how many were dropped.
    fn check_names(
        &self,
        artifacts: &mut Vec<PlannedArtifact<'_>>,
        reporter: &mut Reporter,
    ) -> usize {
        let mut registry = NameRegistry::new(self.options.target);
        let mut excluded = 0;

        for artifact in artifacts.iter_mut() {
            registry.start_artifact();
            let directory = artifact.path.parent().unwrap_or(Path::new("")).to_path_buf();
            let path = &artifact.path;
            artifact.enums.retain(|model| match registry.admit(&directory, model) {
                Ok(()) => true,
                Err(reason) => {
                    debug!(name = %model.name, "Enum excluded from {:?}", path);
                    reporter.push(Diagnostic::error(
                        DiagnosticKind::Semantic,
                        &model.source_file,
                        model.source_line,
                        model.source_column,
                        format!("{}; enum `{}` is not generated", reason, model.name),
                    ));
                    excluded += 1;
                    false
                }
            });
        }

        artifacts.retain(|artifact| !artifact.enums.is_empty());
        excluded
    }

    /// Render and write every planned artifact.
    fn emit(
        &self,
        artifacts: Vec<PlannedArtifact<'_>>,
        parsed: &mut [ParsedFile],
        report: &mut GenerationReport,
    ) {
        let target = self.options.target;
        let results: Vec<(PlannedArtifact<'_>, std::io::Result<(usize, WriteOutcome)>)> = artifacts
            .into_par_iter()
            .map(|artifact| {
                let contents = target.render(&artifact.context, &artifact.enums);
                let result = write_if_changed(&artifact.path, contents.as_bytes())
                    .map(|outcome| (contents.len(), outcome));
                (artifact, result)
            })
            .collect();

        for (artifact, result) in results {
            match result {
                Ok((bytes_written, outcome)) => {
                    for &i in &artifact.inputs {
                        parsed[i].stage = FileStage::Emitted;
                    }
                    report.artifacts.push(GeneratedFile {
                        path: artifact.path,
                        bytes_written,
                        enum_count: artifact.enums.len(),
                        outcome,
                    });
                }
                Err(e) => {
                    for &i in &artifact.inputs {
                        parsed[i].stage = FileStage::Rejected;
                    }
                    report.reporter.push(Diagnostic::for_file(
                        Severity::Error,
                        DiagnosticKind::Io,
                        &artifact.path,
                        format!("cannot write artifact: {}", e),
                    ));
                }
            }
        }
    }
}

/// Load, lex and parse one file. Runs on the rayon pool.
fn load_and_parse(file: DiscoveredFile, empty_severity: Severity) -> ParsedFile {
    let mut parsed = ParsedFile {
        file,
        stage: FileStage::Discovered,
        decls: Vec::new(),
        diagnostics: Vec::new(),
    };
    let path = parsed.file.path.clone();

    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            parsed.diagnostics.push(Diagnostic::for_file(
                Severity::Error,
                DiagnosticKind::Io,
                &path,
                format!("cannot read file: {}", e),
            ));
            parsed.stage = FileStage::Rejected;
            return parsed;
        }
    };
    parsed.stage = FileStage::Loaded;

    if bytes.is_empty() {
        parsed.diagnostics.push(Diagnostic::for_file(
            empty_severity,
            DiagnosticKind::Io,
            &path,
            "empty declaration file, skipped",
        ));
        parsed.stage = FileStage::Skipped;
        return parsed;
    }

    let source = match String::from_utf8(bytes) {
        Ok(source) => source,
        Err(e) => {
            parsed.diagnostics.push(Diagnostic::for_file(
                Severity::Error,
                DiagnosticKind::Io,
                &path,
                format!(
                    "file is not valid UTF-8 (invalid byte at offset {})",
                    e.utf8_error().valid_up_to()
                ),
            ));
            parsed.stage = FileStage::Rejected;
            return parsed;
        }
    };

    let (config, diagnostics) = parse_source(&source, &path);
    let had_errors = diagnostics.iter().any(Diagnostic::is_error);
    parsed.diagnostics = diagnostics;
    parsed.decls = config.enums;
    parsed.stage = match (parsed.decls.is_empty(), had_errors) {
        (false, _) => FileStage::Parsed,
        (true, true) => FileStage::Rejected,
        (true, false) => FileStage::Skipped,
    };
    parsed
}

/// The relative file name minus its `.<extension>` suffix.
fn artifact_stem(relative: &Path, extension: &str) -> String {
    let name = relative
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = format!(".{}", extension);
    name.strip_suffix(&suffix).unwrap_or(&name).to_string()
}

/// Name of the directory an artifact is written to.
fn package_of(path: &Path) -> Option<String> {
    path.parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
}

/// How a declaration file is named in banners: relative to its root,
/// `/`-separated.
fn source_name(file: &DiscoveredFile) -> String {
    file.relative.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    fn options(root: &Path) -> GeneratorOptionsBuilder {
        GeneratorOptions::builder().root(root)
    }

    #[test]
    fn test_artifact_stem() {
        assert_eq!(artifact_stem(Path::new("dir/colors.enumgen"), "enumgen"), "colors");
        assert_eq!(artifact_stem(Path::new("a.b.enums"), "enums"), "a.b");
    }

    #[test]
    fn test_artifact_next_to_input() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "colors.enumgen", "enum Color { Red, Green, Blue = 10 }");

        let report = Generator::new(options(dir.path()).build()).run().unwrap();
        assert_eq!(report.status(), RunStatus::Success);
        assert_eq!(report.artifacts.len(), 1);
        let output = fs::read_to_string(dir.path().join("colors.rs")).unwrap();
        assert!(output.contains("Code generated by enumgen from colors.enumgen. DO NOT EDIT."));
        assert!(output.contains("    Blue = 10,\n"));
        assert_eq!(
            report.stage_of(&dir.path().join("colors.enumgen")),
            Some(FileStage::Emitted)
        );
    }

    #[test]
    fn test_out_dir_mirrors_relative_paths() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("defs");
        let out = dir.path().join("out");
        write(&root, "net/status.enumgen", "enum Status { Ok, Fail = 5, Pending }");

        let report = Generator::new(
            options(&root)
                .recursive(true)
                .target(Target::Python)
                .out_dir(&out)
                .build(),
        )
        .run()
        .unwrap();
        assert_eq!(report.status(), RunStatus::Success);
        let output = fs::read_to_string(out.join("net").join("status.py")).unwrap();
        assert!(output.contains("    Ok = 0\n    Fail = 5\n    Pending = 6\n"));
        assert!(output.contains("from net/status.enumgen."));
    }

    #[test]
    fn test_check_only_writes_nothing() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "colors.enumgen", "enum Color { Red }");

        let report = Generator::new(options(dir.path()).check_only(true).build())
            .run()
            .unwrap();
        assert!(report.artifacts.is_empty());
        assert!(!dir.path().join("colors.rs").exists());
        assert_eq!(
            report.stage_of(&dir.path().join("colors.enumgen")),
            Some(FileStage::Validated)
        );
    }

    #[test]
    fn test_empty_file_severity() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "empty.enumgen", "");

        let report = Generator::new(options(dir.path()).build()).run().unwrap();
        assert_eq!(report.status(), RunStatus::Success);
        assert_eq!(report.reporter.warning_count(), 1);
        assert_eq!(
            report.stage_of(&dir.path().join("empty.enumgen")),
            Some(FileStage::Skipped)
        );

        let report = Generator::new(options(dir.path()).empty_file(EmptyFileSeverity::Error).build())
            .run()
            .unwrap();
        assert_eq!(report.status(), RunStatus::Errors);
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.enumgen"), [b'e', 0xff, 0xfe]).unwrap();

        let report = Generator::new(options(dir.path()).build()).run().unwrap();
        let diagnostics = report.reporter.sorted();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::Io);
        assert!(diagnostics[0].message.contains("offset 1"));
    }

    #[test]
    fn test_aggregate_collects_every_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        write(dir.path(), "a.enumgen", "enum A { X }");
        write(dir.path(), "b.enumgen", "enum B { Y }");

        let report = Generator::new(
            options(dir.path())
                .target(Target::Ts)
                .out_dir(&out)
                .aggregate("all_enums")
                .build(),
        )
        .run()
        .unwrap();
        assert_eq!(report.artifacts.len(), 1);
        let output = fs::read_to_string(out.join("all_enums.ts")).unwrap();
        assert!(output.contains("from a.enumgen, b.enumgen."));
        assert!(output.find("enum A").unwrap() < output.find("enum B").unwrap());
    }

    #[test]
    fn test_output_over_input_is_rejected() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "colors.rs", "enum Color { Red }");

        let report = Generator::new(options(dir.path()).extension("rs").build())
            .run()
            .unwrap();
        assert_eq!(report.status(), RunStatus::Errors);
        assert!(report.artifacts.is_empty());
        assert_eq!(
            report.stage_of(&dir.path().join("colors.rs")),
            Some(FileStage::Rejected)
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("colors.rs")).unwrap(),
            "enum Color { Red }"
        );
    }

    #[test]
    fn test_go_files_of_one_directory_share_a_package() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("defs");
        write(&root, "colors.enumgen", "enum Color { Red }");
        write(&root, "shapes.enumgen", "enum Shape { Circle }");

        let report = Generator::new(options(&root).target(Target::Go).build())
            .run()
            .unwrap();
        assert_eq!(report.status(), RunStatus::Success);
        for name in ["colors.go", "shapes.go"] {
            let output = fs::read_to_string(root.join(name)).unwrap();
            assert!(output.contains("\npackage defs\n"), "{}: {}", name, output);
        }
    }

    #[test]
    fn test_aggregate_go_package_is_the_stem() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("defs");
        write(&root, "a.enumgen", "enum A { X }");

        Generator::new(options(&root).target(Target::Go).aggregate("all_enums").build())
            .run()
            .unwrap();
        let output = fs::read_to_string(root.join("all_enums.go")).unwrap();
        assert!(output.contains("\npackage allenums\n"));
    }

    #[test]
    fn test_clashing_go_constants_exclude_the_later_enum() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("defs");
        write(&root, "a.enumgen", "enum A { BC }");
        write(&root, "b.enumgen", "\nenum AB { C }");

        let report = Generator::new(options(&root).target(Target::Go).build())
            .run()
            .unwrap();
        assert_eq!(report.status(), RunStatus::Errors);
        let diagnostics = report.reporter.sorted();
        assert_eq!(diagnostics.len(), 1);
        let d = &diagnostics[0];
        assert_eq!(d.kind, DiagnosticKind::Semantic);
        assert_eq!(d.file, root.join("b.enumgen"));
        assert_eq!((d.line, d.column), (2, 1));
        assert_eq!(
            d.message,
            "member `C` of enum `AB` is emitted as `ABC` in go output, which member `BC` of enum `A` already declares; enum `AB` is not generated"
        );

        assert!(root.join("a.go").exists());
        assert!(!root.join("b.go").exists());
        assert_eq!((report.enums_valid, report.enums_rejected), (1, 1));
        assert_eq!(report.stage_of(&root.join("b.enumgen")), Some(FileStage::Rejected));
    }

    #[test]
    fn test_clash_in_one_artifact_keeps_other_enums() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "m.enumgen", "enum A_B { C }\nenum A { B_C }\nenum D { E }");

        let report = Generator::new(options(dir.path()).target(Target::C).build())
            .run()
            .unwrap();
        assert_eq!(report.reporter.error_count(), 1);
        let output = fs::read_to_string(dir.path().join("m.h")).unwrap();
        assert!(output.contains("typedef enum A_B {"));
        assert!(output.contains("typedef enum D {"));
        assert!(!output.contains("typedef enum A {"));
        assert_eq!(
            report.stage_of(&dir.path().join("m.enumgen")),
            Some(FileStage::Emitted)
        );
    }

    #[test]
    fn test_python_private_member_is_reported() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "p.enumgen", "enum P { __secret, Open }");

        let report = Generator::new(
            options(dir.path())
                .target(Target::Python)
                .check_only(true)
                .build(),
        )
        .run()
        .unwrap();
        assert_eq!(report.status(), RunStatus::Errors);
        assert!(report.reporter.sorted()[0].message.contains("`__secret`"));
        assert_eq!(
            report.stage_of(&dir.path().join("p.enumgen")),
            Some(FileStage::Rejected)
        );
    }

    #[test]
    fn test_file_with_only_comments_is_skipped() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "notes.enumgen", "// nothing yet\n");

        let report = Generator::new(options(dir.path()).build()).run().unwrap();
        assert!(report.reporter.is_empty());
        assert_eq!(
            report.stage_of(&dir.path().join("notes.enumgen")),
            Some(FileStage::Skipped)
        );
    }
}
