//! # PMOMusic Configuration Module
//!
//! This module provides configuration management for PMOMusic sources:
//! - Loading configuration from a YAML file
//! - Merging with the embedded default configuration
//! - Path-based getters and setters for configuration values
//!
//! Keys are case-insensitive: they are lowercased on load and on lookup.
//! Values are never read from environment variables.
//!
//! ## Usage
//!
//! ```no_run
//! use pmoconfig::Config;
//!
//! let config = Config::load_config("")?;
//! let server = config.get_string(&["sources", "audiobookshelf", "server_url"])?;
//! println!("Server: {:?}", server);
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Result, anyhow};
use dirs::home_dir;
use serde_yaml::{Mapping, Value};
use std::{
    fs,
    path::Path,
    sync::{Mutex, MutexGuard},
};
use tracing::{debug, info};

// Configuration par défaut intégrée
const DEFAULT_CONFIG: &str = include_str!("pmomusic.yaml");

const CONFIG_DIR_NAME: &str = ".pmomusic";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Configuration manager
///
/// A `Config` is either file-backed (built by [`Config::load_config`], every
/// [`set_value`](Config::set_value) is persisted) or purely in memory (built
/// by [`Config::from_yaml_str`]).
#[derive(Debug)]
pub struct Config {
    path: Option<String>,
    data: Mutex<Value>,
}

impl Config {
    /// Finds a config directory by trying different locations in order
    fn find_config_dir(directory: &str) -> String {
        // 1. Try provided directory
        if !directory.is_empty() {
            return directory.to_string();
        }

        // 2. Try current directory
        if Path::new(CONFIG_DIR_NAME).exists() {
            return CONFIG_DIR_NAME.to_string();
        }

        // 3. Try home directory
        if let Some(home) = home_dir() {
            let home_config = home.join(CONFIG_DIR_NAME);
            if home_config.exists() {
                return home_config.to_string_lossy().to_string();
            }
        }

        // Default fallback
        CONFIG_DIR_NAME.to_string()
    }

    /// Loads the configuration from the specified directory
    ///
    /// The directory is searched in the following order:
    /// 1. The provided `directory` parameter if not empty
    /// 2. `.pmomusic` in the current directory
    /// 3. `.pmomusic` in the user's home directory
    ///
    /// The directory is created if needed. A missing `config.yaml` is not an
    /// error: the embedded defaults are used and written on the next save.
    pub fn load_config(directory: &str) -> Result<Self> {
        let config_dir = Self::find_config_dir(directory);
        let dir_path = Path::new(&config_dir);
        if !dir_path.exists() {
            fs::create_dir_all(dir_path)?;
        }
        if !dir_path.is_dir() {
            return Err(anyhow!("{} is not a directory", config_dir));
        }
        info!(config_dir=%config_dir, "Using config directory");

        let path = dir_path.join(CONFIG_FILE_NAME).to_string_lossy().to_string();

        let external = match fs::read(&path) {
            Ok(data) => {
                info!(config_file=%path, "Loaded config file");
                Some(serde_yaml::from_slice::<Value>(&data)?)
            }
            Err(_) => {
                info!(config_file=%path, "Config file not found, using default embedded config");
                None
            }
        };

        Ok(Self {
            path: Some(path),
            data: Mutex::new(Self::merged_with_defaults(external)?),
        })
    }

    /// Builds an in-memory configuration from a YAML document
    ///
    /// Nothing is ever written to disk.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let external: Value = serde_yaml::from_str(yaml)?;
        Ok(Self {
            path: None,
            data: Mutex::new(Self::merged_with_defaults(Some(external))?),
        })
    }

    fn merged_with_defaults(external: Option<Value>) -> Result<Value> {
        let mut value: Value = serde_yaml::from_str(DEFAULT_CONFIG)?;
        if let Some(external) = external {
            // Un fichier vide est lu comme Null
            if !external.is_null() {
                merge_yaml(&mut value, &lower_keys_value(external));
            }
        }
        Ok(lower_keys_value(value))
    }

    /// Path of the backing file, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    fn data(&self) -> Result<MutexGuard<'_, Value>> {
        self.data
            .lock()
            .map_err(|_| anyhow!("Configuration lock poisoned"))
    }

    /// Saves the current configuration to its file
    ///
    /// Does nothing for in-memory configurations.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let yaml = serde_yaml::to_string(&*self.data()?)?;
        fs::write(path, yaml)?;
        debug!(config_file=%path, "Configuration saved");
        Ok(())
    }

    /// Sets a configuration value at the specified path and saves it
    ///
    /// Intermediate mappings are created as needed.
    ///
    /// # Arguments
    ///
    /// * `path` - Array of keys representing the path (e.g., `&["sources", "audiobookshelf", "username"]`)
    /// * `value` - The YAML value to set
    pub fn set_value(&self, path: &[&str], value: Value) -> Result<()> {
        {
            let mut data = self.data()?;
            set_value_internal(&mut data, path, value)?;
        }
        self.save()
    }

    /// Gets a configuration value at the specified path
    ///
    /// Returns an error if the path doesn't exist.
    pub fn get_value(&self, path: &[&str]) -> Result<Value> {
        let data = self.data()?;
        get_value_internal(&data, path)
    }

    /// Gets a string value, `None` if the path is missing, null or empty
    ///
    /// Numbers and booleans are rendered as strings.
    pub fn get_string(&self, path: &[&str]) -> Result<Option<String>> {
        match self.get_value(path) {
            Ok(Value::String(s)) if s.is_empty() => Ok(None),
            Ok(Value::String(s)) => Ok(Some(s)),
            Ok(Value::Number(n)) => Ok(Some(n.to_string())),
            Ok(Value::Bool(b)) => Ok(Some(b.to_string())),
            Ok(Value::Null) | Err(_) => Ok(None),
            Ok(_) => Err(anyhow!("{} is not a scalar value", path.join("."))),
        }
    }
}

fn set_value_internal(data: &mut Value, path: &[&str], value: Value) -> Result<()> {
    if path.is_empty() {
        *data = value;
        return Ok(());
    }
    if data.is_null() {
        *data = Value::Mapping(Mapping::new());
    }
    if let Value::Mapping(map) = data {
        let key_value = Value::String(path[0].to_lowercase());
        if path.len() == 1 {
            map.insert(key_value, value);
        } else {
            let entry = map
                .entry(key_value)
                .or_insert(Value::Mapping(Mapping::new()));
            set_value_internal(entry, &path[1..], value)?;
        }
        Ok(())
    } else {
        Err(anyhow!("Current node is not a map"))
    }
}

fn get_value_internal(data: &Value, path: &[&str]) -> Result<Value> {
    let mut current = data;
    for (i, key) in path.iter().enumerate() {
        if let Value::Mapping(map) = current {
            match map.get(&Value::String(key.to_lowercase())) {
                Some(next) => current = next,
                None => return Err(anyhow!("Path {} does not exist", path[..=i].join("."))),
            }
        } else {
            return Err(anyhow!("Path {} is not a Config", path[..i].join(".")));
        }
    }
    Ok(current.clone())
}

fn lower_keys_value(value: Value) -> Value {
    match value {
        Value::Mapping(map) => {
            let mut new_map = Mapping::new();
            for (k, v) in map {
                let key = match k {
                    Value::String(s) => Value::String(s.to_lowercase()),
                    other => other,
                };
                new_map.insert(key, lower_keys_value(v));
            }
            Value::Mapping(new_map)
        }
        Value::Sequence(seq) => Value::Sequence(seq.into_iter().map(lower_keys_value).collect()),
        _ => value,
    }
}

/// Merges external YAML configuration into default configuration
///
/// Mappings are merged key by key; scalars and sequences from `external`
/// replace the defaults.
fn merge_yaml(default: &mut Value, external: &Value) {
    match (default, external) {
        (Value::Mapping(dmap), Value::Mapping(emap)) => {
            for (k, v) in emap {
                match dmap.get_mut(k) {
                    Some(dv) => merge_yaml(dv, v),
                    None => {
                        dmap.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (d, e) => *d = e.clone(), // pour les scalaires ou séquences, on remplace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_present() {
        let config = Config::from_yaml_str("{}").unwrap();
        assert!(config.get_value(&["sources", "audiobookshelf"]).is_ok());
        assert_eq!(
            config
                .get_string(&["sources", "audiobookshelf", "server_url"])
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let config = Config::from_yaml_str("Sources:\n  AudioBookShelf:\n    Username: alice\n")
            .unwrap();
        assert_eq!(
            config
                .get_string(&["SOURCES", "audiobookshelf", "USERNAME"])
                .unwrap()
                .as_deref(),
            Some("alice")
        );
        // les valeurs par défaut de la section sont conservées
        assert!(
            config
                .get_value(&["sources", "audiobookshelf", "password"])
                .is_ok()
        );
    }

    #[test]
    fn test_set_then_get() {
        let config = Config::from_yaml_str("").unwrap();
        config
            .set_value(&["host", "name"], Value::String("salon".to_string()))
            .unwrap();
        assert_eq!(
            config.get_string(&["host", "name"]).unwrap().as_deref(),
            Some("salon")
        );
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let config = Config::from_yaml_str("a: 1").unwrap();
        let err = config.get_value(&["a", "b"]).unwrap_err();
        assert!(err.to_string().contains("is not a Config"));
        let err = config.get_value(&["nope"]).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_numbers_render_as_strings() {
        let config = Config::from_yaml_str("port: 13378").unwrap();
        assert_eq!(
            config.get_string(&["port"]).unwrap().as_deref(),
            Some("13378")
        );
    }

    #[test]
    fn test_file_backed_config_persists() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_string_lossy().to_string();

        let config = Config::load_config(&dir_str).unwrap();
        config
            .set_value(
                &["sources", "audiobookshelf", "username"],
                Value::String("bob".to_string()),
            )
            .unwrap();

        let reloaded = Config::load_config(&dir_str).unwrap();
        assert_eq!(
            reloaded
                .get_string(&["sources", "audiobookshelf", "username"])
                .unwrap()
                .as_deref(),
            Some("bob")
        );
    }

    #[test]
    fn test_merge_replaces_scalars() {
        let mut base: Value = serde_yaml::from_str("a:\n  b: 1\n  c: 2\n").unwrap();
        let ext: Value = serde_yaml::from_str("a:\n  c: 3\n  d: 4\n").unwrap();
        merge_yaml(&mut base, &ext);
        let expected: Value = serde_yaml::from_str("a:\n  b: 1\n  c: 3\n  d: 4\n").unwrap();
        assert_eq!(base, expected);
    }
}
