//! # pmoaudiobookshelf - Source Audiobookshelf pour PMOMusic
//!
//! Cette crate connecte PMOMusic à un serveur
//! [Audiobookshelf](https://www.audiobookshelf.org/) auto-hébergé et expose son
//! catalogue à travers le contrat [`pmosource::MediaPlugin`].
//!
//! ## Vue d'ensemble
//!
//! - Authentification par login/mot de passe, puis vérification du token
//! - Page d'accueil : une section par bibliothèque, avec ses items récents
//! - Recherche, listing d'une bibliothèque (channel), contenu d'une playlist
//! - Détails d'un item avec son URL de lecture directe
//!
//! ## Architecture
//!
//! ```text
//! pmoaudiobookshelf/
//! ├── src/
//! │   ├── lib.rs              # Module principal (ce fichier)
//! │   ├── source.rs           # Implémentation de MediaPlugin
//! │   ├── session.rs          # Token et en-têtes d'authentification
//! │   ├── url.rs              # Normalisation de l'URL du serveur
//! │   ├── resource.rs         # Classification des URLs de ressources
//! │   ├── models.rs           # Structures de données du serveur
//! │   ├── catalog.rs          # Conversion vers les types du host
//! │   ├── config_ext.rs       # Extension pmoconfig
//! │   ├── api/
//! │   │   ├── mod.rs          # Client REST
//! │   │   ├── auth.rs         # Login et vérification
//! │   │   └── catalog.rs      # Bibliothèques, recherche, playlists, items
//! │   └── error.rs            # Gestion des erreurs
//! ```
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use pmoaudiobookshelf::AudiobookshelfSource;
//! use pmosource::{ContentType, Filters, MediaPlugin, PluginConfig, SortOrder};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let source = AudiobookshelfSource::new()?;
//!     source
//!         .initialize(&PluginConfig::new("books.example.org", "alice", "secret"))
//!         .await?;
//!
//!     let results = source
//!         .search("dune", &ContentType::Audio, &SortOrder::Relevance, &Filters::new())
//!         .await?;
//!     for item in results.items {
//!         println!("{} - {}", item.author, item.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Depuis la configuration PMOMusic
//!
//! ```rust,no_run
//! use pmoaudiobookshelf::AudiobookshelfSource;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = pmoconfig::Config::load_config("")?;
//! let source = AudiobookshelfSource::new()?;
//! source.initialize_from_config(&config).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod catalog;
pub mod config_ext;
pub mod error;
pub mod models;
pub mod resource;
pub mod session;
pub mod source;
pub mod url;

pub use catalog::{ToCatalog, UrlContext};
pub use config_ext::AudiobookshelfConfigExt;
pub use error::{AbsError, Result};
pub use resource::{ResourceKind, ResourceUrl};
pub use session::Session;
pub use source::AudiobookshelfSource;
pub use url::normalize_server_url;
