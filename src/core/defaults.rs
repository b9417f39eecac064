use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::ConflictRule;
use crate::utils::io;
use crate::utils::template::{self, TemplateVars};

/// Name of the optional per-repository config file.
pub const CONFIG_FILE: &str = "create-si.json";

/// Root configuration structure for create-si.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    #[serde(default = "default_icons_dir")]
    pub icons_dir: String,

    #[serde(default = "default_optimizer")]
    pub optimizer: ToolConfig,

    #[serde(default = "default_linter")]
    pub linter: ToolConfig,

    #[serde(default = "default_precisions")]
    pub precisions: Vec<u8>,

    #[serde(default = "default_precision")]
    pub default_precision: u8,

    #[serde(default)]
    pub conflict_rule: ConflictRule,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            icons_dir: default_icons_dir(),
            optimizer: default_optimizer(),
            linter: default_linter(),
            precisions: default_precisions(),
            default_precision: default_precision(),
            conflict_rule: ConflictRule::default(),
        }
    }
}

/// An external program and its argument template.
///
/// Arguments may reference `{{input}}`, `{{file}}` and `{{precision}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_catalog_path() -> String {
    "_data/simple-icons.json".to_string()
}

fn default_icons_dir() -> String {
    "icons".to_string()
}

fn default_optimizer() -> ToolConfig {
    ToolConfig {
        program: "node_modules/.bin/svgo".to_string(),
        args: vec![
            "--precision".to_string(),
            "{{precision}}".to_string(),
            "--input".to_string(),
            "{{input}}".to_string(),
            "--output".to_string(),
            "-".to_string(),
        ],
    }
}

fn default_linter() -> ToolConfig {
    ToolConfig {
        program: "node_modules/.bin/svglint".to_string(),
        args: vec!["{{file}}".to_string(), "--ci".to_string()],
    }
}

fn default_precisions() -> Vec<u8> {
    vec![3, 4, 5]
}

fn default_precision() -> u8 {
    3
}

// =============================================================================
// Loading functions
// =============================================================================

impl Config {
    /// Catalog path resolved against the repository root.
    pub fn catalog_path_in(&self, root: &Path) -> PathBuf {
        resolve(root, &self.catalog_path)
    }

    /// Icons directory resolved against the repository root.
    pub fn icons_dir_in(&self, root: &Path) -> PathBuf {
        resolve(root, &self.icons_dir)
    }

    fn validate(self, path: &Path) -> crate::Result<Self> {
        if self.precisions.is_empty() {
            return Err(crate::Error::config_invalid_value(
                "precisions",
                None,
                format!("{} must list at least one precision", path.display()),
            ));
        }

        if !self.precisions.contains(&self.default_precision) {
            return Err(crate::Error::config_invalid_value(
                "defaultPrecision",
                Some(self.default_precision.to_string()),
                "must be one of the configured precisions",
            ));
        }

        for (key, tool) in [("optimizer", &self.optimizer), ("linter", &self.linter)] {
            if !tool.references_file() {
                return Err(crate::Error::config_invalid_value(
                    key,
                    Some(tool.args.join(" ")),
                    "args must reference {{input}} or {{file}}",
                ));
            }
        }

        Ok(self)
    }
}

impl ToolConfig {
    /// Whether any argument names the icon file.
    pub fn references_file(&self) -> bool {
        self.args.iter().any(|arg| {
            template::is_present(arg, TemplateVars::INPUT) || template::is_present(arg, TemplateVars::FILE)
        })
    }
}

/// Expand `~` and anchor relative paths at `root`.
pub fn resolve(root: &Path, path: &str) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(path).to_string());
    if expanded.is_absolute() {
        expanded
    } else {
        root.join(expanded)
    }
}

/// Path of the config file for a repository root.
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Load create-si.json from `root`, falling back to built-in defaults when absent.
///
/// A present but malformed file is an error rather than a silent fallback.
pub fn load_config(root: &Path) -> crate::Result<Config> {
    let path = config_path(root);

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = io::read_file(&path, &format!("read {}", path.display()))?;

    let config: Config = serde_json::from_str(&content)
        .map_err(|e| crate::Error::config_invalid_json(path.display().to_string(), e))?;

    config.validate(&path)
}

/// Get built-in defaults (ignoring any file config)
pub fn builtin_config() -> Config {
    Config::default()
}
