//! Configuration management for envscope
//!
//! Stores settings in ~/.config/envscope/config.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data file used when `--data` is not given
    pub data_file: Option<PathBuf>,
    /// Project opened when neither a project nor an address is given
    pub last_project: Option<String>,
    /// Seconds between re-fetches of the environment list (0 disables)
    pub refresh_interval_secs: u64,
    /// Drop the open environment when switching projects from the project prompt
    pub close_drawer_on_project_switch: bool,
    /// Where tracing output goes; nothing is logged when unset
    pub log_file: Option<PathBuf>,
    /// File this config was loaded from; defaults are never written back
    #[serde(skip)]
    location: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            last_project: None,
            refresh_interval_secs: 5,
            close_drawer_on_project_switch: true,
            log_file: None,
            location: None,
        }
    }
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("envscope").join("config.json"))
    }

    /// Load config from the user config directory, or return defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load config from `path`. Missing or corrupt files yield defaults; a
    /// corrupt file is moved aside first.
    pub fn load_from(path: &Path) -> Self {
        let mut config = match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Config>(&content) {
                Ok(config) => config,
                Err(err) => {
                    preserve_corrupt_config(path, &content);
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "config file was corrupted; a backup was saved and defaults were loaded"
                    );
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };
        config.location = Some(path.to_path_buf());
        config
    }

    /// Save config to where it was loaded from. A config that was never loaded
    /// from disk is not saved.
    pub fn save(&self) -> Result<(), String> {
        let Some(path) = &self.location else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        #[cfg(unix)]
        {
            write_config_atomic(path, &content)
                .map_err(|e| format!("Failed to write config: {}", e))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(path, content).map_err(|e| format!("Failed to write config: {}", e))?;
        }

        Ok(())
    }

    /// Remember the project for next launch (best-effort)
    pub fn remember_project(&mut self, project: &str) {
        if self.last_project.as_deref() == Some(project) {
            return;
        }
        self.last_project = Some(project.to_string());
        if let Err(err) = self.save() {
            warn!(error = %err, "could not persist last project");
        }
    }

    /// Get the config file location for display
    pub fn config_location() -> String {
        Self::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "~/.config/envscope/config.json".to_string())
    }
}

fn preserve_corrupt_config(path: &Path, content: &str) {
    let corrupt_path = path.with_extension("json.corrupt");
    if fs::rename(path, &corrupt_path).is_err() {
        let _ = fs::write(&corrupt_path, content);
    }
}

#[cfg(unix)]
fn write_config_atomic(path: &Path, content: &str) -> Result<(), String> {
    use std::fs::OpenOptions;
    use std::os::unix::fs::PermissionsExt;

    let tmp_path = path.with_extension("tmp");
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&tmp_path)
        .map_err(|e| e.to_string())?;

    if let Err(e) = file.set_permissions(fs::Permissions::from_mode(0o600)) {
        warn!(error = %e, "failed to set temp config file permissions");
    }

    file.write_all(content.as_bytes())
        .map_err(|e| e.to_string())?;

    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err.to_string());
    }
    Ok(())
}
