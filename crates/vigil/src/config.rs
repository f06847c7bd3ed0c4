use std::{env, fmt, fs, path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::DEFAULT_PROBE_TIMEOUT_MS;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config file")]
    ReadFailed(()),
    #[error("failed to write config file")]
    WriteFailed(()),
    #[error("failed to parse config file")]
    ParseFailed(()),
    #[error("no usable config path (set XDG_CONFIG_HOME or HOME)")]
    ConfigPathUnavailable,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: Server,
    pub storage: Storage,
    pub monitoring: Monitoring,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Storage {
    /// Snapshot file holding registered monitors and their histories.
    pub data_file: path::PathBuf,
    /// Save after every completed probe, not just on create/delete.
    pub persist_probes: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Monitoring {
    pub probe_timeout_ms: u64,
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Resolve `$XDG_CONFIG_HOME`-style base directories with a `$HOME` fallback.
fn xdg_dir(env_var: &str, home_fallback: &str) -> Result<path::PathBuf, Error> {
    if let Ok(dir) = env::var(env_var) {
        Ok(path::PathBuf::from(dir))
    } else if let Some(home_dir) = env::home_dir() {
        Ok(home_dir.join(home_fallback))
    } else {
        Err(Error::ConfigPathUnavailable)
    }
}

/// Get default config path ($XDG_CONFIG_HOME/vigil/config.toml or
/// $HOME/.config/...)
fn default_config_path() -> Result<path::PathBuf, Error> {
    Ok(xdg_dir("XDG_CONFIG_HOME", ".config")?.join("vigil/config.toml"))
}

/// Default snapshot location ($XDG_DATA_HOME/vigil/state.json or
/// $HOME/.local/share/...), falling back to the working directory when no
/// home is known.
fn default_data_path() -> path::PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share")
        .map(|dir| dir.join("vigil/state.json"))
        .unwrap_or_else(|_| path::PathBuf::from("vigil-state.json"))
}

impl Default for Server {
    fn default() -> Self {
        Self { bind: "0.0.0.0".into(), port: 8080 }
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self { data_file: default_data_path(), persist_probes: true }
    }
}

impl Default for Monitoring {
    fn default() -> Self {
        Self { probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { server: Server::default(), storage: Storage::default(), monitoring: Monitoring::default() }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);

        writeln!(f, "Current Internal Configuration State:")?;
        write_title_1(f, "Server")?;
        write_1(f, "Bind Address", &self.server.bind)?;
        write_1(f, "Port", &self.server.port)?;
        write_title_1(f, "Storage")?;
        write_1(f, "Data File", &self.storage.data_file.display())?;
        write_1(f, "Persist Probes", &self.storage.persist_probes)?;
        write_title_1(f, "Monitoring")?;
        write_1(f, "Probe Timeout (ms)", &self.monitoring.probe_timeout_ms)?;

        Ok(())
    }
}

impl Config {
    /// Generate Config structure from file
    ///
    /// Creates a default config in ~/.config/vigil/config.toml
    ///  or the specified path, with the name config.toml if one does not exist
    pub fn from_config(optional_path: Option<impl AsRef<path::Path>>) -> Result<Self, Error> {
        let config_path: path::PathBuf = if let Some(path) = optional_path {
            normalize_toml_path(path.as_ref())
        } else {
            default_config_path()?
        };

        if config_path.exists() {
            let raw_string =
                fs::read_to_string(&config_path).map_err(|_err| Error::ReadFailed(()))?;
            toml::from_str(raw_string.as_str()).map_err(|_err| Error::ParseFailed(()))
        } else {
            let config = Self::default();
            config.write_config(&config_path)?;
            Ok(config)
        }
    }

    /// Serialize and write a config to a file
    pub fn write_config(&self, path: &std::path::Path) -> Result<(), Error> {
        let config_str: String =
            toml::to_string_pretty(self).map_err(|_err| Error::ParseFailed(()))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|_err| Error::WriteFailed(()))?;
        }

        std::fs::write(path, config_str).map_err(|_err| Error::WriteFailed(()))
    }
}
