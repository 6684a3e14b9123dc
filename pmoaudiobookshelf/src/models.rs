//! Payloads returned by the Audiobookshelf REST API
//!
//! Only the fields the adapter reads are modelled. Servers are lenient about
//! what they omit, so nearly everything is optional.

use serde::{Deserialize, Deserializer};

/// Accepte un ID sous forme de string ou de nombre
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(Error::custom("ID must be a string or number")),
    }
}

/// A library on the server
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Library {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// `/api/libraries` answers either with a bare array or wrapped in `libraries`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LibrariesResponse {
    Bare(Vec<Library>),
    Wrapped { libraries: Vec<Library> },
}

impl From<LibrariesResponse> for Vec<Library> {
    fn from(response: LibrariesResponse) -> Self {
        match response {
            LibrariesResponse::Bare(libraries) => libraries,
            LibrariesResponse::Wrapped { libraries } => libraries,
        }
    }
}

/// One item, as found in listings, search hits, playlists and detail views
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LibraryItem {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub media: Media,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[serde(default)]
    pub metadata: MediaMetadata,
    /// Seconds, possibly fractional
    #[serde(default)]
    pub duration: Option<f64>,
    /// Server-relative path, e.g. `/metadata/items/li_1/cover.jpg`
    #[serde(default)]
    pub cover_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// `/api/libraries/{id}/items`
#[derive(Debug, Deserialize)]
pub(crate) struct ItemsPage {
    pub results: Vec<LibraryItem>,
}

/// `/api/playlists/{id}`
#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistResponse {
    pub items: Vec<LibraryItem>,
}

/// Sort key accepted by the items endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSort {
    Recent,
    Alpha,
}

impl ItemSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemSort::Recent => "recent",
            ItemSort::Alpha => "alpha",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_with_numeric_id() {
        let item: LibraryItem = serde_json::from_value(json!({
            "id": 42,
            "media": {
                "metadata": {"title": "T", "author": "A"},
                "duration": 125.9,
                "coverPath": "/c.jpg"
            }
        }))
        .unwrap();
        assert_eq!(item.id, "42");
        assert_eq!(item.media.metadata.title.as_deref(), Some("T"));
        assert_eq!(item.media.cover_path.as_deref(), Some("/c.jpg"));
        assert_eq!(item.media.duration, Some(125.9));
    }

    #[test]
    fn test_item_with_null_fields() {
        let item: LibraryItem = serde_json::from_value(json!({
            "id": "li_1",
            "media": {"metadata": {"title": null}, "duration": null, "coverPath": null}
        }))
        .unwrap();
        assert_eq!(item.media.metadata.title, None);
        assert_eq!(item.media.duration, None);
        assert_eq!(item.media.cover_path, None);
    }

    #[test]
    fn test_item_without_media() {
        let item: LibraryItem = serde_json::from_value(json!({"id": "li_2"})).unwrap();
        assert_eq!(item.media, Media::default());
    }

    #[test]
    fn test_libraries_response_shapes() {
        let bare: LibrariesResponse =
            serde_json::from_value(json!([{"id": "l1", "name": "Books"}])).unwrap();
        let wrapped: LibrariesResponse =
            serde_json::from_value(json!({"libraries": [{"id": "l1", "name": "Books"}]})).unwrap();
        assert_eq!(Vec::<Library>::from(bare), Vec::<Library>::from(wrapped));
    }

    #[test]
    fn test_listing_without_list_rejected() {
        assert!(serde_json::from_value::<ItemsPage>(json!({"total": 0})).is_err());
        assert!(serde_json::from_value::<PlaylistResponse>(json!({})).is_err());
        let page: ItemsPage = serde_json::from_value(json!({"results": []})).unwrap();
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_invalid_id_rejected() {
        let result: Result<Library, _> = serde_json::from_value(json!({"id": true, "name": "x"}));
        assert!(result.is_err());
    }
}
