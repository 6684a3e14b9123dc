//! Plugin implementation for Audiobookshelf
//!
//! This module implements the [`pmosource::MediaPlugin`] trait on top of the
//! REST layer in [`crate::api`].
//!
//! # Session lifecycle
//!
//! [`AudiobookshelfSource::new`] returns an *uninitialized* source. A
//! successful [`initialize`](MediaPlugin::initialize) publishes a [`Session`]
//! and the source becomes *ready*. The handshake is all-or-nothing: the token
//! obtained at login is first wrapped in a candidate session, the candidate
//! is verified against the server, and only then does it replace the active
//! session. A failed `initialize` leaves whatever was there before.
//!
//! Concurrent `initialize` calls are serialized; the last one to succeed
//! wins. Queries take a snapshot of the active session and never hold a lock
//! across a network call.

use crate::api::AbsApi;
use crate::catalog::{ToCatalog, UrlContext, stream_url, to_catalog_sequence};
use crate::config_ext::AudiobookshelfConfigExt;
use crate::error::AbsError;
use crate::models::{ItemSort, Library};
use crate::resource::ResourceUrl;
use crate::session::Session;
use crate::url::normalize_server_url;
use futures::future::join_all;
use pmoconfig::Config;
use pmosource::{
    AuthPhase, Capabilities, ContentType, Filters, HomeView, ItemList, MediaPlugin, PluginConfig,
    PluginError, Result, Section, SortOrder, VideoDetails, async_trait,
};
use reqwest::Client;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Number of recent items shown per library on the home page
pub const HOME_ITEMS_LIMIT: u32 = 10;

/// Fixed page size of search and channel listings
pub const PAGE_SIZE: u32 = 20;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = concat!("pmoaudiobookshelf/", env!("CARGO_PKG_VERSION"));

/// Audiobookshelf source
///
/// Cheap to clone: clones share the same session.
///
/// # Examples
///
/// ```no_run
/// use pmoaudiobookshelf::AudiobookshelfSource;
/// use pmosource::{MediaPlugin, PluginConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let source = AudiobookshelfSource::new()?;
///     source
///         .initialize(&PluginConfig::new("books.example.org", "alice", "secret"))
///         .await?;
///
///     for section in source.get_home().await?.sections {
///         println!("{}: {} items", section.name, section.items.len());
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct AudiobookshelfSource {
    inner: Arc<SourceInner>,
}

struct SourceInner {
    /// Client HTTP partagé
    client: Client,

    /// Session publiée, absente tant que l'initialisation n'a pas réussi
    session: RwLock<Option<Arc<Session>>>,

    /// Sérialise les appels à initialize
    init_lock: tokio::sync::Mutex<()>,
}

impl std::fmt::Debug for AudiobookshelfSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudiobookshelfSource")
            .field("session", &self.session())
            .finish()
    }
}

impl AudiobookshelfSource {
    /// Creates an uninitialized source with its own HTTP client
    pub fn new() -> std::result::Result<Self, AbsError> {
        let client = Client::builder().user_agent(DEFAULT_USER_AGENT).build()?;
        Ok(Self::with_client(client))
    }

    /// Creates an uninitialized source around a custom `reqwest::Client`
    ///
    /// Useful for sharing connection pools, or for adding timeouts and proxies
    /// the source does not configure itself.
    pub fn with_client(client: Client) -> Self {
        Self {
            inner: Arc::new(SourceInner {
                client,
                session: RwLock::new(None),
                init_lock: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Snapshot of the active session
    pub fn session(&self) -> Option<Arc<Session>> {
        self.inner
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Initializes from the `sources.audiobookshelf` section of a configuration
    pub async fn initialize_from_config(&self, config: &Config) -> Result<()> {
        let plugin_config = config
            .get_audiobookshelf_config()
            .map_err(|e| PluginError::Configuration(e.to_string()))?;
        self.initialize(&plugin_config).await
    }

    fn active_session(&self) -> Result<Arc<Session>> {
        self.session().ok_or(PluginError::NotInitialized)
    }

    fn publish(&self, session: Session) {
        let mut slot = self
            .inner
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::new(session));
    }

    fn api(&self, session: &Session) -> AbsApi {
        AbsApi::for_session(self.inner.client.clone(), session)
    }

    /// Login then verification, without touching the published session
    async fn authenticate(&self, config: &PluginConfig) -> Result<Session> {
        let base_url = normalize_server_url(&config.server_url);
        info!(base_url = %base_url, "Connecting to Audiobookshelf server");

        let anonymous = AbsApi::new(self.inner.client.clone(), base_url.clone());
        let token = anonymous
            .login(&config.username, &config.password)
            .await
            .map_err(|e| e.into_auth_error(AuthPhase::Login))?;

        let candidate =
            Session::new(base_url, token).map_err(|e| e.into_auth_error(AuthPhase::Login))?;

        self.api(&candidate)
            .verify()
            .await
            .map_err(|e| e.into_auth_error(AuthPhase::Verification))?;

        Ok(candidate)
    }

    /// One home section; a failing fetch yields an empty section
    async fn library_section(&self, api: &AbsApi, library: &Library) -> Section {
        match api
            .library_items(&library.id, HOME_ITEMS_LIMIT, ItemSort::Recent)
            .await
        {
            Ok(items) => Section::list(&library.name, to_catalog_sequence(&items, api.base_url())),
            Err(e) => {
                warn!(library = %library.name, error = %e, "Failed to load library items, keeping empty section");
                Section::empty(&library.name)
            }
        }
    }
}

/// Sort key used for channel listings; anything but `DATE` sorts by title
fn channel_sort(order: &SortOrder) -> ItemSort {
    match order {
        SortOrder::Date => ItemSort::Recent,
        _ => ItemSort::Alpha,
    }
}

fn presence(value: &str) -> &'static str {
    if value.trim().is_empty() {
        "[MISSING]"
    } else {
        "[PROVIDED]"
    }
}

#[async_trait]
impl MediaPlugin for AudiobookshelfSource {
    async fn initialize(&self, config: &PluginConfig) -> Result<()> {
        info!(
            server_url = presence(&config.server_url),
            username = presence(&config.username),
            password = presence(&config.password),
            "Starting Audiobookshelf initialization"
        );

        let missing = config.missing_fields();
        if !missing.is_empty() {
            let err = PluginError::Configuration(format!(
                "Please provide server URL, username and password (missing: {})",
                missing.join(", ")
            ));
            warn!(error = %err, "Initialization failed");
            return Err(err);
        }

        let _guard = self.inner.init_lock.lock().await;

        let session = self
            .authenticate(config)
            .await
            .inspect_err(|e| warn!(error = %e, "Initialization failed"))?;

        info!(base_url = %session.base_url(), "Audiobookshelf session ready");
        self.publish(session);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.session().is_some()
    }

    async fn get_home(&self) -> Result<HomeView> {
        let session = self.active_session()?;
        let api = self.api(&session);

        let libraries = api
            .list_libraries()
            .await
            .map_err(|e| e.into_upstream_error("Load home"))?;

        // join_all conserve l'ordre des bibliothèques
        let sections = join_all(
            libraries
                .iter()
                .map(|library| self.library_section(&api, library)),
        )
        .await;

        debug!("Home assembled with {} sections", sections.len());
        Ok(HomeView { sections })
    }

    fn search_capabilities(&self) -> Capabilities {
        Capabilities::audio(&[SortOrder::Relevance, SortOrder::Date, SortOrder::Name])
    }

    async fn search(
        &self,
        query: &str,
        content_type: &ContentType,
        order: &SortOrder,
        filters: &Filters,
    ) -> Result<ItemList> {
        let session = self.active_session()?;
        // type, ordre et filtres ne sont pas transmis au serveur
        debug!(
            query,
            content_type = content_type.as_str(),
            order = order.as_str(),
            filters = filters.len(),
            "Searching"
        );

        let items = self
            .api(&session)
            .search(query, PAGE_SIZE)
            .await
            .map_err(|e| e.into_upstream_error("Search"))?;

        Ok(to_catalog_sequence(&items, session.base_url()).into())
    }

    fn channel_capabilities(&self) -> Capabilities {
        Capabilities::audio(&[SortOrder::Date, SortOrder::Name])
    }

    async fn get_channel(
        &self,
        url: &str,
        _content_type: &ContentType,
        order: &SortOrder,
        _filters: &Filters,
    ) -> Result<ItemList> {
        let session = self.active_session()?;
        let library_id = ResourceUrl::new(url)
            .trailing_id()
            .ok_or_else(|| PluginError::InvalidUrl(url.to_string()))?;

        let sort = channel_sort(order);
        debug!(library_id, sort = sort.as_str(), "Loading channel");

        let items = self
            .api(&session)
            .library_items(library_id, PAGE_SIZE, sort)
            .await
            .map_err(|e| e.into_upstream_error("Load channel"))?;

        Ok(to_catalog_sequence(&items, session.base_url()).into())
    }

    fn playlist_capabilities(&self) -> Capabilities {
        Capabilities::audio(&[SortOrder::Date, SortOrder::Name])
    }

    async fn get_playlist(
        &self,
        url: &str,
        _content_type: &ContentType,
        _order: &SortOrder,
        _filters: &Filters,
    ) -> Result<ItemList> {
        let session = self.active_session()?;
        // L'URL est l'identifiant de la playlist, telle quelle
        if url.trim().is_empty() {
            return Err(PluginError::InvalidUrl(url.to_string()));
        }

        let items = self
            .api(&session)
            .get_playlist(url)
            .await
            .map_err(|e| e.into_upstream_error("Load playlist"))?;

        Ok(to_catalog_sequence(&items, session.base_url()).into())
    }

    async fn get_video_details(&self, url: &str) -> Result<VideoDetails> {
        let session = self.active_session()?;
        let item_id = ResourceUrl::new(url)
            .trailing_id()
            .ok_or_else(|| PluginError::InvalidUrl(url.to_string()))?;

        let item = self
            .api(&session)
            .get_item(item_id)
            .await
            .map_err(|e| e.into_upstream_error("Load audio details"))?;

        // Le flux suit l'identifiant demandé, même si le serveur le réécrit
        let mut entry = item.to_catalog_item(session.base_url(), UrlContext::Detail);
        entry.play_url = stream_url(session.base_url(), item_id);

        Ok(VideoDetails::direct(entry))
    }

    fn is_channel_url(&self, url: &str) -> bool {
        ResourceUrl::new(url).is_library()
    }

    fn is_playlist_url(&self, url: &str) -> bool {
        ResourceUrl::new(url).is_playlist()
    }

    fn is_video_url(&self, url: &str) -> bool {
        ResourceUrl::new(url).is_item()
    }
}
