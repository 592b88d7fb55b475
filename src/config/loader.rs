//! Configuration file discovery and loading.

use crate::config::schema::{CheckConfig, CONFIG_FILE_NAME};
use crate::error::{EnvCheckError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Find the project config at `.envcheck.yml`.
pub fn find_project_config(project_root: &Path) -> Option<PathBuf> {
    let path = project_root.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load the configuration for a project.
///
/// An explicit path must exist. Without one, `.envcheck.yml` in the project
/// root is used when present, and the built-in defaults otherwise.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<CheckConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_project_config(project_root),
    };

    match path {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        None => {
            tracing::debug!("No config file found, using defaults");
            Ok(CheckConfig::default())
        }
    }
}

/// Load and parse a single configuration file.
pub fn load_config_file(path: &Path) -> Result<CheckConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EnvCheckError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            EnvCheckError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`CheckConfig`].
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<CheckConfig> {
    if content.trim().is_empty() {
        return Ok(CheckConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| EnvCheckError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
