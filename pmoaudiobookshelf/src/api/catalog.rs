//! Module d'accès au catalogue (bibliothèques, items, recherche, playlists)

use super::AbsApi;
use crate::error::Result;
use crate::models::{ItemSort, ItemsPage, LibrariesResponse, Library, LibraryItem, PlaylistResponse};
use tracing::debug;

impl AbsApi {
    /// Liste les bibliothèques du serveur
    pub async fn list_libraries(&self) -> Result<Vec<Library>> {
        let response: LibrariesResponse = self.get("/api/libraries", &[]).await?;
        let libraries: Vec<Library> = response.into();
        debug!("Found {} libraries", libraries.len());
        Ok(libraries)
    }

    /// Récupère une page d'items d'une bibliothèque
    pub async fn library_items(
        &self,
        library_id: &str,
        limit: u32,
        sort: ItemSort,
    ) -> Result<Vec<LibraryItem>> {
        let endpoint = format!("/api/libraries/{}/items", library_id);
        let limit = limit.to_string();
        let page: ItemsPage = self
            .get(&endpoint, &[("limit", limit.as_str()), ("sort", sort.as_str())])
            .await?;
        Ok(page.results)
    }

    /// Recherche dans le catalogue
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<LibraryItem>> {
        let limit = limit.to_string();
        self.get("/api/search", &[("q", query), ("limit", limit.as_str())])
            .await
    }

    /// Récupère les items d'une playlist, dans l'ordre du serveur
    pub async fn get_playlist(&self, playlist_id: &str) -> Result<Vec<LibraryItem>> {
        let endpoint = format!("/api/playlists/{}", playlist_id);
        let playlist: PlaylistResponse = self.get(&endpoint, &[]).await?;
        Ok(playlist.items)
    }

    /// Récupère un item par son ID
    pub async fn get_item(&self, item_id: &str) -> Result<LibraryItem> {
        let endpoint = format!("/api/items/{}", item_id);
        self.get(&endpoint, &[]).await
    }
}
