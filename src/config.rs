//! Configuration module for filegraph.
//!
//! Layered configuration:
//! - Default values
//! - TOML configuration file (`.filegraph/settings.toml`)
//! - Environment variable overrides
//! - CLI argument overrides (applied by the command layer)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `FG_` and use double underscores
//! to separate nested levels:
//! - `FG_INDEXING__PARALLEL_THREADS=8` sets `indexing.parallel_threads`
//! - `FG_INDEXING__FINGERPRINT_MAX_BYTES=1048576` sets `indexing.fingerprint_max_bytes`
//! - `FG_LOGGING__DEFAULT=debug` sets `logging.default`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Name of the per-project configuration directory.
pub const CONFIG_DIR: &str = ".filegraph";

const ENV_PREFIX: &str = "FG_";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Directory holding persisted project indexes
    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,

    /// Workspace root directory (where `.filegraph` is located)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,

    #[serde(default)]
    pub indexing: IndexingConfig,

    /// Extractor toggles keyed by language family
    #[serde(default = "default_languages")]
    pub languages: HashMap<String, LanguageConfig>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IndexingConfig {
    /// Worker threads for scanning and extraction
    #[serde(default = "default_parallel_threads")]
    pub parallel_threads: usize,

    /// Files at or above this size are recorded without a fingerprint
    #[serde(default = "default_fingerprint_max_bytes")]
    pub fingerprint_max_bytes: u64,

    /// Files above this size contribute no relations
    #[serde(default = "default_max_parse_bytes")]
    pub max_parse_bytes: u64,

    /// Patterns excluded in addition to the built-in table.
    /// Literal names or paths, or a single `*` wildcard (e.g. `*.min.js`).
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LanguageConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Logging configuration, see [`crate::logging`].
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default level: error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-target overrides, e.g. `scanner = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_index_path() -> PathBuf {
    PathBuf::from(".filegraph/index")
}
fn default_parallel_threads() -> usize {
    num_cpus::get()
}
fn default_fingerprint_max_bytes() -> u64 {
    100 * 1024 * 1024
}
fn default_max_parse_bytes() -> u64 {
    4 * 1024 * 1024
}
fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            index_path: default_index_path(),
            workspace_root: None,
            indexing: IndexingConfig::default(),
            languages: default_languages(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            parallel_threads: default_parallel_threads(),
            fingerprint_max_bytes: default_fingerprint_max_bytes(),
            max_parse_bytes: default_max_parse_bytes(),
            exclude_patterns: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

fn default_languages() -> HashMap<String, LanguageConfig> {
    ["javascript", "jvm", "python"]
        .into_iter()
        .map(|key| (key.to_string(), LanguageConfig { enabled: true }))
        .collect()
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join("settings.toml"));

        Self::figment(&config_path)
            .extract()
            .map_err(Box::new)
            .map(|mut settings: Settings| {
                if settings.workspace_root.is_none() {
                    settings.workspace_root = Self::workspace_root();
                }
                settings
            })
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(path.as_ref()).extract().map_err(Box::new)
    }

    fn figment(config_path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_path))
            // Double underscore separates nested levels; single underscores stay in field names
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
    }

    /// Whether the extractor family `key` is enabled. Unknown keys default to enabled.
    pub fn language_enabled(&self, key: &str) -> bool {
        self.languages.get(key).map(|c| c.enabled).unwrap_or(true)
    }

    /// Index directory, anchored at the workspace root when relative
    pub fn resolved_index_path(&self) -> PathBuf {
        match &self.workspace_root {
            Some(root) if self.index_path.is_relative() => root.join(&self.index_path),
            _ => self.index_path.clone(),
        }
    }

    /// Find `.filegraph/settings.toml` searching from the current directory up
    fn find_workspace_config() -> Option<PathBuf> {
        Self::workspace_root().map(|root| root.join(CONFIG_DIR).join("settings.toml"))
    }

    /// Get the workspace root directory (where `.filegraph` is located)
    pub fn workspace_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .find(|ancestor| ancestor.join(CONFIG_DIR).is_dir())
            .map(Path::to_path_buf)
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file under `dir/.filegraph`
    pub fn init_config_file(dir: &Path, force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = dir.join(CONFIG_DIR).join("settings.toml");

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        let settings = Settings {
            workspace_root: Some(dir.to_path_buf()),
            ..Settings::default()
        };
        settings.save(&config_path)?;

        Ok(config_path)
    }
}
