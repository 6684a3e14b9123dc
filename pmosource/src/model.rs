//! Host-facing value types
//!
//! Field names on the wire follow what the host reads (`type`, `duration`,
//! `thumbnail`, `url`, `isContinuous`), which is why most structs carry
//! explicit serde renames.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-form filters passed by the host
pub type Filters = serde_json::Map<String, serde_json::Value>;

/// Configuration handed to [`MediaPlugin::initialize`](crate::MediaPlugin::initialize)
///
/// All three fields are required. Missing keys deserialize to empty strings
/// so that validation can report every missing field at once.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    /// Server address as typed by the user (scheme optional)
    #[serde(default)]
    pub server_url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl PluginConfig {
    pub fn new(
        server_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server_url: server_url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Names of the required fields that are empty or whitespace-only
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("serverUrl", &self.server_url),
            ("username", &self.username),
            ("password", &self.password),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

// Le mot de passe ne doit jamais apparaître dans les logs
impl fmt::Debug for PluginConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginConfig")
            .field("server_url", &self.server_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Media type requested by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    Audio,
    Other(String),
}

impl ContentType {
    pub fn as_str(&self) -> &str {
        match self {
            ContentType::Audio => "AUDIO",
            ContentType::Other(s) => s,
        }
    }
}

impl From<&str> for ContentType {
    fn from(value: &str) -> Self {
        match value {
            "AUDIO" => ContentType::Audio,
            other => ContentType::Other(other.to_string()),
        }
    }
}

impl From<String> for ContentType {
    fn from(value: String) -> Self {
        ContentType::from(value.as_str())
    }
}

impl From<ContentType> for String {
    fn from(value: ContentType) -> Self {
        value.as_str().to_string()
    }
}

/// Sort order requested by the host
///
/// Unknown values are preserved in [`SortOrder::Other`]; each source decides
/// how to fall back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortOrder {
    Relevance,
    Date,
    Name,
    Other(String),
}

impl SortOrder {
    pub fn as_str(&self) -> &str {
        match self {
            SortOrder::Relevance => "RELEVANCE",
            SortOrder::Date => "DATE",
            SortOrder::Name => "NAME",
            SortOrder::Other(s) => s,
        }
    }
}

impl From<&str> for SortOrder {
    fn from(value: &str) -> Self {
        match value {
            "RELEVANCE" => SortOrder::Relevance,
            "DATE" => SortOrder::Date,
            "NAME" => SortOrder::Name,
            other => SortOrder::Other(other.to_string()),
        }
    }
}

impl From<String> for SortOrder {
    fn from(value: String) -> Self {
        SortOrder::from(value.as_str())
    }
}

impl From<SortOrder> for String {
    fn from(value: SortOrder) -> Self {
        value.as_str().to_string()
    }
}

/// Types and sort orders a surface advertises
///
/// Advertising is documentation for the host; a source is not required to
/// forward these values to its server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub types: Vec<ContentType>,
    pub sorts: Vec<SortOrder>,
}

impl Capabilities {
    /// Audio-only capabilities with the given sort orders
    pub fn audio(sorts: &[SortOrder]) -> Self {
        Self {
            types: vec![ContentType::Audio],
            sorts: sorts.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Audio,
}

/// Uniform representation of a playable entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub name: String,
    pub author: String,
    /// Whole seconds, floored
    #[serde(rename = "duration")]
    pub duration_seconds: u64,
    /// Absolute cover URL
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: Option<String>,
    /// Absolute URL; its exact form depends on the view that produced it
    #[serde(rename = "url")]
    pub play_url: String,
}

impl CatalogItem {
    pub fn audio(
        name: impl Into<String>,
        author: impl Into<String>,
        duration_seconds: u64,
        thumbnail_url: Option<String>,
        play_url: impl Into<String>,
    ) -> Self {
        Self {
            kind: ItemKind::Audio,
            name: name.into(),
            author: author.into(),
            duration_seconds,
            thumbnail_url,
            play_url: play_url.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    List,
}

/// Named group of items on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    #[serde(rename = "isContinuous")]
    pub is_continuous: bool,
    pub items: Vec<CatalogItem>,
}

impl Section {
    /// Continuous list section
    pub fn list(name: impl Into<String>, items: Vec<CatalogItem>) -> Self {
        Self {
            name: name.into(),
            kind: SectionKind::List,
            is_continuous: true,
            items,
        }
    }

    /// Section kept in place of a library whose content could not be loaded
    pub fn empty(name: impl Into<String>) -> Self {
        Self::list(name, Vec::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeView {
    pub sections: Vec<Section>,
}

/// Flat listing returned by search, channel and playlist views
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemList {
    pub items: Vec<CatalogItem>,
}

impl From<Vec<CatalogItem>> for ItemList {
    fn from(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    /// The URL can be handed straight to the player
    Direct,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    #[serde(rename = "type")]
    pub kind: StreamKind,
    pub url: String,
}

/// Detail view of one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDetails {
    pub name: String,
    pub author: String,
    pub duration: u64,
    pub thumbnail: Option<String>,
    pub video: StreamDescriptor,
}

impl VideoDetails {
    /// Builds the detail view from an item whose `play_url` is the resolved stream
    pub fn direct(item: CatalogItem) -> Self {
        Self {
            name: item.name,
            author: item.author,
            duration: item.duration_seconds,
            thumbnail: item.thumbnail_url,
            video: StreamDescriptor {
                kind: StreamKind::Direct,
                url: item.play_url,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields() {
        let config = PluginConfig::new("abs.local", "  ", "");
        assert_eq!(config.missing_fields(), vec!["username", "password"]);
        assert!(PluginConfig::new("a", "b", "c").missing_fields().is_empty());
    }

    #[test]
    fn test_config_from_host_json() {
        let config: PluginConfig =
            serde_json::from_value(json!({"serverUrl": "abs.local", "username": "me"})).unwrap();
        assert_eq!(config.server_url, "abs.local");
        assert_eq!(config.missing_fields(), vec!["password"]);
    }

    #[test]
    fn test_config_debug_hides_password() {
        let config = PluginConfig::new("abs.local", "me", "hunter2");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!(SortOrder::from("DATE"), SortOrder::Date);
        assert_eq!(SortOrder::from("NAME"), SortOrder::Name);
        assert_eq!(SortOrder::from("RELEVANCE"), SortOrder::Relevance);
        // comparaison sensible à la casse
        assert_eq!(SortOrder::from("date"), SortOrder::Other("date".to_string()));
    }

    #[test]
    fn test_capabilities_serialization() {
        let caps = Capabilities::audio(&[SortOrder::Date, SortOrder::Name]);
        assert_eq!(
            serde_json::to_value(&caps).unwrap(),
            json!({"types": ["AUDIO"], "sorts": ["DATE", "NAME"]})
        );
    }

    #[test]
    fn test_catalog_item_wire_format() {
        let item = CatalogItem::audio("T", "A", 125, None, "https://x/api/items/42");
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({
                "type": "audio",
                "name": "T",
                "author": "A",
                "duration": 125,
                "thumbnail": null,
                "url": "https://x/api/items/42"
            })
        );
    }

    #[test]
    fn test_empty_section() {
        let section = Section::empty("Podcasts");
        assert_eq!(
            serde_json::to_value(&section).unwrap(),
            json!({"name": "Podcasts", "type": "list", "isContinuous": true, "items": []})
        );
    }

    #[test]
    fn test_video_details_from_item() {
        let item = CatalogItem::audio(
            "T",
            "A",
            10,
            Some("https://x/c.jpg".to_string()),
            "https://x/api/items/42/play",
        );
        let details = VideoDetails::direct(item);
        assert_eq!(details.video.kind, StreamKind::Direct);
        assert_eq!(details.video.url, "https://x/api/items/42/play");
        assert_eq!(details.thumbnail.as_deref(), Some("https://x/c.jpg"));
    }
}
