//! Extension pour intégrer la configuration Audiobookshelf dans pmoconfig
//!
//! Ce module fournit le trait `AudiobookshelfConfigExt` qui ajoute à
//! `pmoconfig::Config` la lecture et l'écriture de la section
//! `sources.audiobookshelf`.

use anyhow::{Result, anyhow};
use pmoconfig::Config;
use pmosource::PluginConfig;
use serde_yaml::Value;

const SERVER_URL: &[&str] = &["sources", "audiobookshelf", "server_url"];
const USERNAME: &[&str] = &["sources", "audiobookshelf", "username"];
const PASSWORD: &[&str] = &["sources", "audiobookshelf", "password"];

/// Trait d'extension pour gérer la configuration Audiobookshelf dans pmoconfig
///
/// # Exemple
///
/// ```rust,ignore
/// use pmoconfig::Config;
/// use pmoaudiobookshelf::AudiobookshelfConfigExt;
///
/// let config = Config::load_config("")?;
/// config.set_audiobookshelf_server_url("books.example.org")?;
/// let plugin_config = config.get_audiobookshelf_config()?;
/// ```
pub trait AudiobookshelfConfigExt {
    /// Récupère l'URL du serveur
    ///
    /// # Errors
    ///
    /// Retourne une erreur si l'URL n'est pas configurée
    fn get_audiobookshelf_server_url(&self) -> Result<String>;

    /// Définit l'URL du serveur (stockée telle quelle, normalisée à l'initialisation)
    fn set_audiobookshelf_server_url(&self, server_url: &str) -> Result<()>;

    /// Récupère le nom d'utilisateur
    ///
    /// # Errors
    ///
    /// Retourne une erreur si le nom d'utilisateur n'est pas configuré
    fn get_audiobookshelf_username(&self) -> Result<String>;

    fn set_audiobookshelf_username(&self, username: &str) -> Result<()>;

    /// Récupère le mot de passe
    ///
    /// # Errors
    ///
    /// Retourne une erreur si le mot de passe n'est pas configuré
    fn get_audiobookshelf_password(&self) -> Result<String>;

    fn set_audiobookshelf_password(&self, password: &str) -> Result<()>;

    /// Builds the plugin configuration from the section
    ///
    /// Unset values come back as empty strings, so that the plugin itself
    /// reports which fields are missing.
    fn get_audiobookshelf_config(&self) -> Result<PluginConfig>;
}

impl AudiobookshelfConfigExt for Config {
    fn get_audiobookshelf_server_url(&self) -> Result<String> {
        self.get_string(SERVER_URL)?
            .ok_or_else(|| anyhow!("Audiobookshelf server URL not configured"))
    }

    fn set_audiobookshelf_server_url(&self, server_url: &str) -> Result<()> {
        self.set_value(SERVER_URL, Value::String(server_url.to_string()))
    }

    fn get_audiobookshelf_username(&self) -> Result<String> {
        self.get_string(USERNAME)?
            .ok_or_else(|| anyhow!("Audiobookshelf username not configured"))
    }

    fn set_audiobookshelf_username(&self, username: &str) -> Result<()> {
        self.set_value(USERNAME, Value::String(username.to_string()))
    }

    fn get_audiobookshelf_password(&self) -> Result<String> {
        self.get_string(PASSWORD)?
            .ok_or_else(|| anyhow!("Audiobookshelf password not configured"))
    }

    fn set_audiobookshelf_password(&self, password: &str) -> Result<()> {
        self.set_value(PASSWORD, Value::String(password.to_string()))
    }

    fn get_audiobookshelf_config(&self) -> Result<PluginConfig> {
        Ok(PluginConfig::new(
            self.get_string(SERVER_URL)?.unwrap_or_default(),
            self.get_string(USERNAME)?.unwrap_or_default(),
            self.get_string(PASSWORD)?.unwrap_or_default(),
        ))
    }
}
