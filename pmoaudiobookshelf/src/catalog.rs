//! Conversion des objets Audiobookshelf vers le format de l'hôte
//!
//! Every view returns the same [`CatalogItem`] shape. The only thing that
//! varies is the URL stored in `play_url`: listings point at the canonical
//! item endpoint, the detail view points at the playable stream.

use crate::models::LibraryItem;
use pmosource::CatalogItem;

/// Which view an item is being mapped for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlContext {
    /// Home, search, channel and playlist listings: `<base>/api/items/<id>`
    Listing,
    /// Detail view: `<base>/api/items/<id>/play`
    Detail,
}

/// Trait pour convertir un objet du serveur en entrée de catalogue
pub trait ToCatalog {
    fn to_catalog_item(&self, base_url: &str, context: UrlContext) -> CatalogItem;
}

impl ToCatalog for LibraryItem {
    fn to_catalog_item(&self, base_url: &str, context: UrlContext) -> CatalogItem {
        let metadata = &self.media.metadata;

        let thumbnail_url = self
            .media
            .cover_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| format!("{}{}", base_url, path));

        let play_url = match context {
            UrlContext::Listing => item_url(base_url, &self.id),
            UrlContext::Detail => stream_url(base_url, &self.id),
        };

        CatalogItem::audio(
            metadata.title.clone().unwrap_or_default(),
            metadata.author.clone().unwrap_or_default(),
            whole_seconds(self.media.duration),
            thumbnail_url,
            play_url,
        )
    }
}

/// Maps items in server order for a listing view
pub fn to_catalog_sequence(items: &[LibraryItem], base_url: &str) -> Vec<CatalogItem> {
    items
        .iter()
        .map(|item| item.to_catalog_item(base_url, UrlContext::Listing))
        .collect()
}

/// Canonical reference to an item
pub fn item_url(base_url: &str, item_id: &str) -> String {
    format!("{}/api/items/{}", base_url, item_id)
}

/// Playable stream of an item
pub fn stream_url(base_url: &str, item_id: &str) -> String {
    format!("{}/api/items/{}/play", base_url, item_id)
}

/// Floors a duration to whole seconds; missing, negative or non-finite gives 0
fn whole_seconds(duration: Option<f64>) -> u64 {
    match duration {
        Some(seconds) if seconds.is_finite() && seconds > 0.0 => seconds.floor() as u64,
        _ => 0,
    }
}
