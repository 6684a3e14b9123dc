//! # PMOSource
//!
//! Plugin contract shared between the host media browser and its sources.
//!
//! A source is a self-contained adapter over a remote media server. The host
//! only ever talks to it through the [`MediaPlugin`] trait and only ever sees
//! the uniform value types defined in [`model`]:
//!
//! - [`CatalogItem`]: one playable audio entry, whatever its origin
//!   (library listing, search hit, playlist entry)
//! - [`Section`] / [`HomeView`]: the grouped home page
//! - [`ItemList`]: flat listings (search, channel, playlist)
//! - [`VideoDetails`]: the detail view with its resolved stream
//!
//! Failures are reported with the [`PluginError`] taxonomy. Sources never leak
//! their transport errors to the host: every operation re-wraps its internal
//! failure into one of these variants, keeping the original message.
//!
//! ## Implementing a source
//!
//! ```rust,no_run
//! use pmosource::{
//!     async_trait, Capabilities, ContentType, Filters, HomeView, ItemList, MediaPlugin,
//!     PluginConfig, PluginError, Result, SortOrder, VideoDetails,
//! };
//!
//! #[derive(Debug)]
//! struct EmptySource;
//!
//! #[async_trait]
//! impl MediaPlugin for EmptySource {
//!     async fn initialize(&self, _config: &PluginConfig) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn is_ready(&self) -> bool {
//!         true
//!     }
//!
//!     async fn get_home(&self) -> Result<HomeView> {
//!         Ok(HomeView::default())
//!     }
//!
//!     fn search_capabilities(&self) -> Capabilities {
//!         Capabilities::audio(&[SortOrder::Relevance])
//!     }
//!
//!     async fn search(
//!         &self,
//!         _query: &str,
//!         _content_type: &ContentType,
//!         _order: &SortOrder,
//!         _filters: &Filters,
//!     ) -> Result<ItemList> {
//!         Ok(ItemList::default())
//!     }
//!
//!     fn channel_capabilities(&self) -> Capabilities {
//!         Capabilities::audio(&[])
//!     }
//!
//!     async fn get_channel(
//!         &self,
//!         _url: &str,
//!         _content_type: &ContentType,
//!         _order: &SortOrder,
//!         _filters: &Filters,
//!     ) -> Result<ItemList> {
//!         Ok(ItemList::default())
//!     }
//!
//!     fn playlist_capabilities(&self) -> Capabilities {
//!         Capabilities::audio(&[])
//!     }
//!
//!     async fn get_playlist(
//!         &self,
//!         _url: &str,
//!         _content_type: &ContentType,
//!         _order: &SortOrder,
//!         _filters: &Filters,
//!     ) -> Result<ItemList> {
//!         Ok(ItemList::default())
//!     }
//!
//!     async fn get_video_details(&self, url: &str) -> Result<VideoDetails> {
//!         Err(PluginError::InvalidUrl(url.to_string()))
//!     }
//!
//!     fn is_channel_url(&self, _url: &str) -> bool {
//!         false
//!     }
//!
//!     fn is_playlist_url(&self, _url: &str) -> bool {
//!         false
//!     }
//!
//!     fn is_video_url(&self, _url: &str) -> bool {
//!         false
//!     }
//! }
//! ```

pub mod model;

use std::fmt::Debug;

pub use async_trait::async_trait;
pub use model::{
    Capabilities, CatalogItem, ContentType, Filters, HomeView, ItemKind, ItemList, PluginConfig,
    Section, SectionKind, SortOrder, StreamDescriptor, StreamKind, VideoDetails,
};

/// Errors surfaced to the host by a source
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Required configuration fields are missing or empty
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The server rejected the credentials, or the post-login probe failed
    #[error("Authentication failed during {phase}{}: {message}", status_suffix(.status))]
    Authentication {
        phase: AuthPhase,
        status: Option<u16>,
        message: String,
    },

    /// A response did not have the expected shape
    #[error("Protocol error on {endpoint}: {message}")]
    Protocol { endpoint: String, message: String },

    /// A request issued after authentication failed
    #[error("{operation} failed on {endpoint}{}: {message}", status_suffix(.status))]
    Upstream {
        operation: String,
        endpoint: String,
        status: Option<u16>,
        message: String,
    },

    /// A query was issued before a successful `initialize`
    #[error("Source is not initialized, call initialize first")]
    NotInitialized,

    /// A resource URL could not be turned into a server identifier
    #[error("Invalid resource URL: {0:?}")]
    InvalidUrl(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|code| format!(" (HTTP {})", code)).unwrap_or_default()
}

/// Step of the initialization handshake that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// Credential exchange
    Login,
    /// Probe issued with the freshly obtained token
    Verification,
}

impl std::fmt::Display for AuthPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthPhase::Login => f.write_str("login"),
            AuthPhase::Verification => f.write_str("verification"),
        }
    }
}

impl PluginError {
    /// True for errors the user can only fix by changing credentials
    pub fn is_auth_error(&self) -> bool {
        matches!(self, PluginError::Authentication { .. })
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            PluginError::Authentication { status, .. } | PluginError::Upstream { status, .. } => {
                *status
            }
            _ => None,
        }
    }
}

/// Result type for plugin operations
pub type Result<T> = std::result::Result<T, PluginError>;

/// Contract every source exposes to the host
///
/// The lifecycle is a two-state machine. A freshly built source is
/// *uninitialized*: every query fails with [`PluginError::NotInitialized`].
/// A successful [`initialize`](MediaPlugin::initialize) makes it *ready*.
/// There is no way back; calling `initialize` again replaces the session.
///
/// Capability and URL-classification methods are pure and may be called in
/// any state.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: the host may issue queries from
/// several tasks at once.
#[async_trait]
pub trait MediaPlugin: Debug + Send + Sync {
    // ============= Lifecycle =============

    /// Authenticates against the server and publishes the session
    ///
    /// On failure, the state that existed before the call is kept.
    async fn initialize(&self, config: &PluginConfig) -> Result<()>;

    /// Returns true once a session has been published
    fn is_ready(&self) -> bool;

    // ============= Browsing =============

    /// Builds the home page, one section per library
    async fn get_home(&self) -> Result<HomeView>;

    /// Types and sort orders advertised for [`search`](MediaPlugin::search)
    fn search_capabilities(&self) -> Capabilities;

    /// Full-text search over the catalog
    async fn search(
        &self,
        query: &str,
        content_type: &ContentType,
        order: &SortOrder,
        filters: &Filters,
    ) -> Result<ItemList>;

    /// Types and sort orders advertised for [`get_channel`](MediaPlugin::get_channel)
    fn channel_capabilities(&self) -> Capabilities;

    /// Lists the content of a channel (a library on the server)
    async fn get_channel(
        &self,
        url: &str,
        content_type: &ContentType,
        order: &SortOrder,
        filters: &Filters,
    ) -> Result<ItemList>;

    /// Types and sort orders advertised for [`get_playlist`](MediaPlugin::get_playlist)
    fn playlist_capabilities(&self) -> Capabilities;

    /// Lists the entries of a playlist, in server order
    async fn get_playlist(
        &self,
        url: &str,
        content_type: &ContentType,
        order: &SortOrder,
        filters: &Filters,
    ) -> Result<ItemList>;

    /// Detail view of a single item, with its playable stream
    async fn get_video_details(&self, url: &str) -> Result<VideoDetails>;

    // ============= URL classification =============

    /// Does `url` designate a channel?
    fn is_channel_url(&self, url: &str) -> bool;

    /// Does `url` designate a playlist?
    fn is_playlist_url(&self, url: &str) -> bool;

    /// Does `url` designate a single item?
    fn is_video_url(&self, url: &str) -> bool;
}
