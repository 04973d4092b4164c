//! Client configuration
//!
//! A small toml file under the platform config directory. Everything
//! is optional; a missing file means defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Client configuration loaded from `grimoire.toml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    /// Override for the database directory
    pub data_dir: Option<PathBuf>,
    /// Default pen name used when contributing segments
    pub pen_name: Option<String>,
}

impl ClientConfig {
    /// Load configuration from the platform config directory, falling
    /// back to defaults if no file exists.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| Error::Config(e.to_string()))
    }

    /// Resolve the directory the database lives in
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let dirs = project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "grimoire", "grimoire")
            .map(|dirs| dirs.config_dir().join("grimoire.toml"))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "grimoire", "grimoire").ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine data directory",
        ))
    })
}
