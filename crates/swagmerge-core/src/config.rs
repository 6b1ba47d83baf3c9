use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::transform::type_hint::DEFAULT_MARKER;

/// Name of the generated Go file inside the docs directory.
pub const DOCS_FILE_NAME: &str = "docs.go";

/// Separator between extension files in the single-string form.
pub const EXTENSION_FILE_SEPARATOR: char = '|';

/// Top-level project configuration loaded from `.swagmerge.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SwagmergeConfig {
    /// Directory holding the generated `docs.go`.
    pub docs_dir: String,
    /// Extension files merged into `definitions`, in order.
    pub extension_files: Vec<String>,
    /// Marker tag that flags a response description as naming a definition.
    pub marker: String,
    pub build: BuildConfig,
}

impl Default for SwagmergeConfig {
    fn default() -> Self {
        Self {
            docs_dir: "./docs".to_string(),
            extension_files: vec!["./docs/common/extands.json".to_string()],
            marker: DEFAULT_MARKER.to_string(),
            build: BuildConfig::default(),
        }
    }
}

impl SwagmergeConfig {
    /// Path of the generated `docs.go`.
    pub fn docs_file(&self) -> PathBuf {
        Path::new(&self.docs_dir).join(DOCS_FILE_NAME)
    }

    pub fn extension_paths(&self) -> Vec<PathBuf> {
        self.extension_files.iter().map(PathBuf::from).collect()
    }
}

/// The spec generation step run before merging.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub program: String,
    /// Arguments passed to `program`. `-o <docs_dir>` is appended.
    pub args: Vec<String>,
    pub skip: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            program: "swag".to_string(),
            args: vec!["init".to_string()],
            skip: false,
        }
    }
}

/// Split a `|`-delimited list of extension files. Blank entries are dropped.
pub fn split_extension_files(value: &str) -> Vec<String> {
    value
        .split(EXTENSION_FILE_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".swagmerge.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<SwagmergeConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: SwagmergeConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# swagmerge configuration
docs_dir: ./docs

# Merged into `definitions` in order; later files win.
extension_files:
  - ./docs/common/extands.json

# Responses described as "<marker><anything>-<TypeName>" become $refs.
marker: third-lib-

build:
  program: swag
  args: [init]    # `-o <docs_dir>` is appended
  skip: false
"#
}
