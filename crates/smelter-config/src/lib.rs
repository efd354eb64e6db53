//! Configuration model and discovery for smelter
//!
//! Configuration has three layers with strict precedence:
//! CLI flags > `smelter.toml` in the working directory > built-in defaults.
//! The CLI performs the flag merge; this crate owns the file model, the
//! defaults, and a [`ConfigBuilder`] for programmatic construction.
//!
//! ```toml
//! translator = "./main"
//!
//! [toolchain]
//! program = "gcc"
//! flags = ["-g", "-no-pie"]
//!
//! [timeouts]
//! translate_secs = 30
//! link_secs = 15
//! execute_secs = 10
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "smelter.toml";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Per-stage time budgets.
///
/// Translation gets the most time by default, execution the least.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageBudgets {
    pub translate: Duration,
    pub link: Duration,
    pub execute: Duration,
}

impl StageBudgets {
    /// Default translate budget in seconds
    pub const DEFAULT_TRANSLATE_SECS: u64 = 30;
    /// Default link budget in seconds
    pub const DEFAULT_LINK_SECS: u64 = 15;
    /// Default execute budget in seconds
    pub const DEFAULT_EXECUTE_SECS: u64 = 10;
}

impl Default for StageBudgets {
    fn default() -> Self {
        Self {
            translate: Duration::from_secs(Self::DEFAULT_TRANSLATE_SECS),
            link: Duration::from_secs(Self::DEFAULT_LINK_SECS),
            execute: Duration::from_secs(Self::DEFAULT_EXECUTE_SECS),
        }
    }
}

/// The assembler/linker toolchain invocation: program plus leading flags.
///
/// The full stage invocation is
/// `<program> <flags...> <artifact> -o <binary>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub program: String,
    pub flags: Vec<String>,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            program: "gcc".to_string(),
            flags: vec!["-g".to_string(), "-no-pie".to_string()],
        }
    }
}

/// Effective smelter configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Path to the external translator, if configured
    pub translator: Option<PathBuf>,
    /// Assembler/linker toolchain
    pub toolchain: Toolchain,
    /// Per-stage time budgets
    pub budgets: StageBudgets,
}

impl Config {
    /// Start building a configuration programmatically.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Load configuration from an explicit TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(file.into())
    }

    /// Discover configuration from `smelter.toml` in the given directory.
    ///
    /// A missing file is not an error; defaults are returned.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Builder for programmatic configuration, useful when embedding the
/// pipeline without a config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    translator: Option<PathBuf>,
    toolchain: Option<Toolchain>,
    budgets: Option<StageBudgets>,
}

impl ConfigBuilder {
    /// Set the translator path.
    #[must_use]
    pub fn translator(mut self, path: impl Into<PathBuf>) -> Self {
        self.translator = Some(path.into());
        self
    }

    /// Set the toolchain program and flags.
    #[must_use]
    pub fn toolchain(mut self, program: impl Into<String>, flags: Vec<String>) -> Self {
        self.toolchain = Some(Toolchain {
            program: program.into(),
            flags,
        });
        self
    }

    /// Set all stage budgets at once.
    #[must_use]
    pub fn budgets(mut self, budgets: StageBudgets) -> Self {
        self.budgets = Some(budgets);
        self
    }

    /// Build the effective configuration.
    #[must_use]
    pub fn build(self) -> Config {
        Config {
            translator: self.translator,
            toolchain: self.toolchain.unwrap_or_default(),
            budgets: self.budgets.unwrap_or_default(),
        }
    }
}

// File-level model; converted into the effective Config so partial files
// inherit defaults field by field.

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    translator: Option<String>,
    #[serde(default)]
    toolchain: Option<ToolchainFile>,
    #[serde(default)]
    timeouts: Option<TimeoutsFile>,
}

#[derive(Debug, Deserialize)]
struct ToolchainFile {
    program: Option<String>,
    flags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct TimeoutsFile {
    translate_secs: Option<u64>,
    link_secs: Option<u64>,
    execute_secs: Option<u64>,
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        let default_toolchain = Toolchain::default();
        let toolchain = match file.toolchain {
            Some(t) => Toolchain {
                program: t.program.unwrap_or(default_toolchain.program),
                flags: t.flags.unwrap_or(default_toolchain.flags),
            },
            None => default_toolchain,
        };

        let default_budgets = StageBudgets::default();
        let budgets = match file.timeouts {
            Some(t) => StageBudgets {
                translate: t
                    .translate_secs
                    .map_or(default_budgets.translate, Duration::from_secs),
                link: t.link_secs.map_or(default_budgets.link, Duration::from_secs),
                execute: t
                    .execute_secs
                    .map_or(default_budgets.execute, Duration::from_secs),
            },
            None => default_budgets,
        };

        Self {
            translator: file.translator.map(PathBuf::from),
            toolchain,
            budgets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_budgets() {
        let config = Config::default();
        assert_eq!(config.budgets.translate, Duration::from_secs(30));
        assert_eq!(config.budgets.link, Duration::from_secs(15));
        assert_eq!(config.budgets.execute, Duration::from_secs(10));
        assert_eq!(config.toolchain.program, "gcc");
        assert_eq!(config.toolchain.flags, vec!["-g", "-no-pie"]);
        assert!(config.translator.is_none());
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = Config::builder()
            .translator("./main")
            .toolchain("cc", vec!["-static".to_string()])
            .budgets(StageBudgets {
                translate: Duration::from_secs(5),
                link: Duration::from_secs(5),
                execute: Duration::from_secs(1),
            })
            .build();
        assert_eq!(config.translator, Some(PathBuf::from("./main")));
        assert_eq!(config.toolchain.program, "cc");
        assert_eq!(config.budgets.execute, Duration::from_secs(1));
    }

    #[test]
    fn load_full_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"
translator = "./translator"

[toolchain]
program = "clang"
flags = ["-g"]

[timeouts]
translate_secs = 60
link_secs = 20
execute_secs = 5
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.translator, Some(PathBuf::from("./translator")));
        assert_eq!(config.toolchain.program, "clang");
        assert_eq!(config.toolchain.flags, vec!["-g"]);
        assert_eq!(config.budgets.translate, Duration::from_secs(60));
        assert_eq!(config.budgets.link, Duration::from_secs(20));
        assert_eq!(config.budgets.execute, Duration::from_secs(5));
    }

    #[test]
    fn partial_file_inherits_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[timeouts]\nexecute_secs = 2\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.translator.is_none());
        assert_eq!(config.toolchain.program, "gcc");
        assert_eq!(config.budgets.translate, Duration::from_secs(30));
        assert_eq!(config.budgets.execute, Duration::from_secs(2));
    }

    #[test]
    fn discover_without_file_returns_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::discover(dir.path()).unwrap();
        assert!(config.translator.is_none());
        assert_eq!(config.budgets, StageBudgets::default());
    }

    #[test]
    fn discover_with_file_loads_it() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "translator = \"./t\"\n").unwrap();
        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.translator, Some(PathBuf::from("./t")));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "translator = [not toml").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_explicit_file_is_a_read_error() {
        let result = Config::load(Path::new("/nonexistent/smelter.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
