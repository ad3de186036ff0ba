use crate::diagnostic::Severity;
use crate::emit::Target;
use crate::error::{EnumgenError, Result};
use crate::tooling::writer::write_atomic;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, error, info, trace, warn};

pub const CONFIG_FILE_NAME: &str = "enumgen.toml";

pub const DEFAULT_EXTENSION: &str = "enumgen";

/// Written by `enumgen init`.
pub const DEFAULT_TEMPLATE: &str = r#"# enumgen configuration

[general]
# Declaration files are the files ending in `.<extension>`.
extension = "enumgen"
# Descend into subdirectories of every root.
recursive = false

[output]
# c | cpp | csharp | go | python | rust | ts
target = "rust"
# Artifacts are written next to their inputs when unset.
# ${VAR} and ${VAR:-default} are substituted.
out_dir = "${ENUMGEN_OUT:-generated}"
# Uncomment to write every enum of the run into one artifact.
# aggregate = "all_enums"
# warning | error
empty_file = "warning"
"#;

/// How a 0-byte declaration file is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmptyFileSeverity {
    #[default]
    Warning,
    Error,
}

impl EmptyFileSeverity {
    pub fn severity(self) -> Severity {
        match self {
            EmptyFileSeverity::Warning => Severity::Warning,
            EmptyFileSeverity::Error => Severity::Error,
        }
    }
}

/// Discovery settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Extension of declaration files, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default)]
    pub recursive: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            recursive: false,
        }
    }
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

/// Emission settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub target: Target,

    #[serde(default)]
    pub out_dir: Option<String>,

    /// Stem of the single artifact in aggregate mode.
    #[serde(default)]
    pub aggregate: Option<String>,

    #[serde(default)]
    pub empty_file: EmptyFileSeverity,
}

/// Contents of `enumgen.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct EnumgenConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl EnumgenConfig {
    /// Load the configuration for a run started in the current directory.
    ///
    /// `explicit` comes from `--config` or `ENUMGEN_CONFIG` and must exist.
    /// Without it, the nearest `enumgen.toml` in the current directory or its
    /// ancestors is used, and the defaults when there is none.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let start_dir = env::current_dir()?;
        Self::load_from(explicit, &start_dir)
    }

    /// [`EnumgenConfig::load`] with an explicit search start.
    pub fn load_from(explicit: Option<&Path>, start_dir: &Path) -> Result<Self> {
        dotenv::dotenv().ok();
        debug!("Environment variables loaded from .env if present");

        let config_path = match explicit {
            Some(path) if path.is_file() => path.to_path_buf(),
            Some(path) => {
                error!("Configuration file {:?} does not exist", path);
                return Err(EnumgenError::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            None => match Self::find_config_file(start_dir) {
                Some(path) => path,
                None => {
                    info!("No {} found, using defaults", CONFIG_FILE_NAME);
                    return Ok(Self::default());
                }
            },
        };
        info!("Found configuration file at: {:?}", config_path);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            error!("Failed to read configuration file: {}", e);
            EnumgenError::from(e)
        })?;
        debug!("Configuration file size: {} bytes", contents.len());

        Self::from_toml_str(&contents).map_err(|e| match e {
            EnumgenError::Toml(e) => {
                EnumgenError::config(format!("{}: {}", config_path.display(), e.message()))
            }
            other => other,
        })
    }

    /// Parse and check configuration text, substituting environment
    /// variables in `out_dir`.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut config: EnumgenConfig = toml::from_str(contents).map_err(|e| {
            error!("Failed to parse TOML configuration: {}", e);
            EnumgenError::from(e)
        })?;

        if let Some(out_dir) = &config.output.out_dir {
            config.output.out_dir = Some(Self::substitute_env_vars(out_dir)?);
        }

        config.general.extension = normalize_extension(&config.general.extension)?;
        if let Some(stem) = &config.output.aggregate {
            check_aggregate_stem(stem)?;
        }

        Ok(config)
    }

    /// Nearest `enumgen.toml` in `start_dir` or one of its ancestors.
    pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
        debug!("Starting config file search from: {:?}", start_dir);

        for path in start_dir.ancestors() {
            let config_path = path.join(CONFIG_FILE_NAME);
            trace!("Checking for config at: {:?}", config_path);
            if config_path.is_file() {
                return Some(config_path);
            }
        }
        None
    }

    /// Substitute environment variables in config strings.
    /// Supports `${VAR_NAME}` and `${VAR_NAME:-default}`.
    pub fn substitute_env_vars(value: &str) -> Result<String> {
        trace!("Substituting environment variables in: {}", value);
        let mut result = value.to_string();

        let re = regex::Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}")
            .map_err(|e| EnumgenError::config(e.to_string()))?;

        for cap in re.captures_iter(value) {
            let var_name = &cap[1];
            let default_value = cap.get(2).map(|m| m.as_str());

            let replacement = match env::var(var_name) {
                Ok(val) => {
                    debug!("Resolved environment variable: {}", var_name);
                    val
                }
                Err(_) => match default_value {
                    Some(default) => {
                        warn!(
                            "Environment variable {} not set, using default: {}",
                            var_name, default
                        );
                        default.to_string()
                    }
                    None => {
                        error!(
                            "Environment variable {} not set and no default provided",
                            var_name
                        );
                        return Err(EnumgenError::EnvVarNotSet(var_name.to_string()));
                    }
                },
            };

            result = result.replace(&cap[0], &replacement);
        }

        Ok(result)
    }
}

/// Strip a leading dot; reject empty extensions and path separators.
pub fn normalize_extension(extension: &str) -> Result<String> {
    let trimmed = extension.strip_prefix('.').unwrap_or(extension);
    if trimmed.is_empty() || trimmed.contains(['/', '\\']) {
        return Err(EnumgenError::config(format!(
            "invalid declaration file extension {:?}",
            extension
        )));
    }
    Ok(trimmed.to_string())
}

pub fn check_aggregate_stem(stem: &str) -> Result<()> {
    if stem.is_empty() || stem.contains(['/', '\\']) || stem == "." || stem == ".." {
        return Err(EnumgenError::config(format!(
            "invalid aggregate artifact name {:?}",
            stem
        )));
    }
    Ok(())
}

/// Write [`DEFAULT_TEMPLATE`] to `dir/enumgen.toml`.
pub fn write_default_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        return Err(EnumgenError::AlreadyExists { path });
    }
    write_atomic(&path, DEFAULT_TEMPLATE.as_bytes())?;
    info!("Wrote default configuration to {:?}", path);
    Ok(path)
}
