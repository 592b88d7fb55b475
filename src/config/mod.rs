//! Configuration loading and the per-run check context.
//!
//! - Schema and defaults in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Interpreter resolution and the context passed to checks in [`context`]
//!
//! # Example
//!
//! ```
//! use envcheck::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".envcheck.yml"), "source_dirs: [src]").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.source_dirs, vec!["src".to_string()]);
//! ```

pub mod context;
pub mod loader;
pub mod schema;

pub use context::{CheckContext, InterpreterStatus};
pub use loader::{find_project_config, load_config, load_config_file, parse_config};
pub use schema::{CheckConfig, CONFIG_FILE_NAME};
