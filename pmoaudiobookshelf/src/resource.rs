//! Classification of opaque resource URLs
//!
//! The host hands URLs back to the source without saying what they point to.
//! Classification is a plain substring test, exposed as three independent
//! predicates: a URL such as `https://x/library/5/items/9` satisfies both
//! [`ResourceUrl::is_library`] and [`ResourceUrl::is_item`], and that overlap
//! is left for the caller to resolve.

const LIBRARY_MARKER: &str = "/library/";
const PLAYLIST_MARKER: &str = "/playlist/";
const ITEM_MARKER: &str = "/items/";

/// Kind of resource, as decided by [`ResourceUrl::classify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Library,
    Playlist,
    Item,
}

/// Borrowed view over a URL handed back by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceUrl<'a>(&'a str);

impl<'a> ResourceUrl<'a> {
    pub fn new(url: &'a str) -> Self {
        Self(url)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Channel URL (a library on the server)
    pub fn is_library(&self) -> bool {
        self.0.contains(LIBRARY_MARKER)
    }

    pub fn is_playlist(&self) -> bool {
        self.0.contains(PLAYLIST_MARKER)
    }

    pub fn is_item(&self) -> bool {
        self.0.contains(ITEM_MARKER)
    }

    /// First matching kind, checked in the order library, playlist, item
    pub fn classify(&self) -> Option<ResourceKind> {
        if self.is_library() {
            Some(ResourceKind::Library)
        } else if self.is_playlist() {
            Some(ResourceKind::Playlist)
        } else if self.is_item() {
            Some(ResourceKind::Item)
        } else {
            None
        }
    }

    /// Last path segment, used as server-side identifier
    ///
    /// The fragment and query string are dropped and trailing slashes are
    /// ignored. For an absolute URL only the path is considered, so a bare
    /// `https://host` has no identifier. Returns `None` when nothing is left.
    pub fn trailing_id(&self) -> Option<&'a str> {
        let url = self.0.trim();
        let url = url.split('#').next().unwrap_or_default();
        let url = url.split('?').next().unwrap_or_default();

        let path = match url.split_once("://") {
            Some((_, rest)) => rest.split_once('/').map(|(_, path)| path).unwrap_or_default(),
            None => url,
        };

        path.trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_url() {
        let url = ResourceUrl::new("https://x/library/5");
        assert!(url.is_library());
        assert!(!url.is_playlist());
        assert!(!url.is_item());
        assert_eq!(url.classify(), Some(ResourceKind::Library));
    }

    #[test]
    fn test_overlapping_predicates() {
        let url = ResourceUrl::new("https://x/library/5/items/9");
        assert!(url.is_library());
        assert!(url.is_item());
        // le premier marqueur trouvé l'emporte
        assert_eq!(url.classify(), Some(ResourceKind::Library));
    }

    #[test]
    fn test_unclassified() {
        let url = ResourceUrl::new("https://x/api/libraries");
        assert_eq!(url.classify(), None);
        assert!(!url.is_library());
    }

    #[test]
    fn test_playlist_and_item() {
        assert_eq!(
            ResourceUrl::new("https://x/playlist/pl_1").classify(),
            Some(ResourceKind::Playlist)
        );
        assert_eq!(
            ResourceUrl::new("https://x/api/items/42").classify(),
            Some(ResourceKind::Item)
        );
    }

    #[test]
    fn test_trailing_id() {
        let cases = [
            ("https://x/library/5", Some("5")),
            ("https://x/library/5/", Some("5")),
            ("https://x/library/5?sort=recent", Some("5")),
            ("https://x/api/items/li_42#top", Some("li_42")),
            ("library/7", Some("7")),
            ("42", Some("42")),
            ("https://x", None),
            ("https://x/", None),
            ("", None),
            ("   ", None),
            ("?q=1", None),
        ];
        for (raw, expected) in cases {
            assert_eq!(ResourceUrl::new(raw).trailing_id(), expected, "input {:?}", raw);
        }
    }
}
