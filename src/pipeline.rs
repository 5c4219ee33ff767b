use anyhow::{Result, bail};
use tracing::{info, warn};

use crate::cache::CacheStore;
use crate::extract::{build_catalog, document_revision};
use crate::freshness::resolve;
use crate::model::Catalog;
use crate::source::DocumentSource;

/// Read the cache, consult the source revision, re-extract when stale and write back.
///
/// With no source the cached catalog is used as-is. A failed fetch falls back
/// to the cache and is only fatal when there is nothing cached.
pub fn load_catalog(source: Option<&dyn DocumentSource>, store: &CacheStore) -> Result<Catalog> {
    let cached = store.load()?;

    let Some(source) = source else {
        return match cached {
            Some(catalog) => {
                info!(revision = catalog.revision, "offline; using cached catalog");
                Ok(catalog)
            }
            None => bail!(
                "no cached catalog at {} and offline mode is on",
                store.path().display()
            ),
        };
    };

    let document = match source.fetch() {
        Ok(document) => document,
        Err(err) => match cached {
            Some(catalog) => {
                warn!(
                    source = %source.describe(),
                    error = %err,
                    revision = catalog.revision,
                    "source unavailable; using cached catalog"
                );
                return Ok(catalog);
            }
            None => return Err(err.into()),
        },
    };

    let remote_revision = document_revision(&document);
    let resolution = resolve(cached, remote_revision, || build_catalog(&document));

    info!(
        source = %source.describe(),
        remote_revision,
        freshness = %resolution.freshness,
        "resolved catalog"
    );

    if resolution.refreshed() {
        store.store(&resolution.catalog)?;
    }

    Ok(resolution.catalog)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::fs;
    use std::io;

    use super::*;
    use crate::cache::DecodeError;
    use crate::dom::Document;
    use crate::source::SourceFetchError;

    const GOLDEN_PAGE: &str = include_str!("../testdata/http_status_page.html");

    struct StaticSource {
        markup: &'static str,
        fetches: Cell<usize>,
    }

    impl StaticSource {
        fn new(markup: &'static str) -> Self {
            Self {
                markup,
                fetches: Cell::new(0),
            }
        }
    }

    impl DocumentSource for StaticSource {
        fn fetch(&self) -> Result<Document, SourceFetchError> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(Document::parse_html(self.markup))
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    struct BrokenSource;

    impl DocumentSource for BrokenSource {
        fn fetch(&self) -> Result<Document, SourceFetchError> {
            Err(SourceFetchError::File {
                path: "unreachable.html".into(),
                source: io::Error::new(io::ErrorKind::TimedOut, "timed out"),
            })
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    fn cached_at(revision: u64) -> Catalog {
        Catalog {
            revision,
            groups: Vec::new(),
        }
    }

    #[test]
    fn missing_cache_is_filled_from_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(dir.path().join(".hst"));
        let source = StaticSource::new(GOLDEN_PAGE);

        let catalog = load_catalog(Some(&source), &store).expect("catalog");
        assert_eq!(catalog.revision, 1_317_392_915);
        assert_eq!(catalog.groups.len(), 7);
        assert_eq!(store.load().expect("load"), Some(catalog));
    }

    #[test]
    fn current_cache_is_reused_without_rewrite() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(dir.path().join(".hst"));
        store.store(&cached_at(1_317_392_915)).expect("seed");
        let before = fs::read(store.path()).expect("read");

        let catalog = load_catalog(Some(&StaticSource::new(GOLDEN_PAGE)), &store).expect("catalog");
        assert!(catalog.groups.is_empty());
        assert_eq!(fs::read(store.path()).expect("read"), before);
    }

    #[test]
    fn stale_cache_is_overwritten() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(dir.path().join(".hst"));
        store.store(&cached_at(1_317_392_914)).expect("seed");

        let catalog = load_catalog(Some(&StaticSource::new(GOLDEN_PAGE)), &store).expect("catalog");
        assert_eq!(catalog.groups.len(), 7);
        assert_eq!(store.load().expect("load").map(|c| c.record_count()), Some(19));
    }

    #[test]
    fn fetch_failure_falls_back_to_cache() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(dir.path().join(".hst"));
        store.store(&cached_at(3)).expect("seed");

        let catalog = load_catalog(Some(&BrokenSource), &store).expect("catalog");
        assert_eq!(catalog, cached_at(3));
    }

    #[test]
    fn fetch_failure_without_cache_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(dir.path().join(".hst"));

        let err = load_catalog(Some(&BrokenSource), &store).expect_err("no cache");
        assert!(err.downcast_ref::<SourceFetchError>().is_some());
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_cache_is_fatal_even_with_a_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(dir.path().join(".hst"));
        fs::write(store.path(), "@@@").expect("write");
        let source = StaticSource::new(GOLDEN_PAGE);

        let err = load_catalog(Some(&source), &store).expect_err("corrupt cache");
        assert!(err.downcast_ref::<DecodeError>().is_some());
        assert_eq!(source.fetches.get(), 0);
    }

    #[test]
    fn offline_mode_requires_a_cache() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(dir.path().join(".hst"));

        assert!(load_catalog(None, &store).is_err());

        store.store(&cached_at(5)).expect("seed");
        assert_eq!(load_catalog(None, &store).expect("catalog"), cached_at(5));
    }
}
