use std::fmt;

use crate::model::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Missing,
    Stale { cached: u64, remote: u64 },
    Current { cached: u64, remote: u64 },
}

impl Freshness {
    pub fn requires_extraction(self) -> bool {
        !matches!(self, Freshness::Current { .. })
    }
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Freshness::Missing => write!(f, "missing"),
            Freshness::Stale { cached, remote } => {
                write!(f, "stale (cached {cached}, remote {remote})")
            }
            Freshness::Current { cached, remote } => {
                write!(f, "current (cached {cached}, remote {remote})")
            }
        }
    }
}

/// Only a strictly newer remote revision invalidates a cached catalog.
pub fn assess(cached: Option<&Catalog>, remote_revision: u64) -> Freshness {
    match cached {
        None => Freshness::Missing,
        Some(catalog) if catalog.revision < remote_revision => Freshness::Stale {
            cached: catalog.revision,
            remote: remote_revision,
        },
        Some(catalog) => Freshness::Current {
            cached: catalog.revision,
            remote: remote_revision,
        },
    }
}

#[derive(Debug)]
pub struct Resolution {
    pub catalog: Catalog,
    pub freshness: Freshness,
}

impl Resolution {
    /// True when the catalog came from `extract` and has to replace the cache.
    pub fn refreshed(&self) -> bool {
        self.freshness.requires_extraction()
    }
}

pub fn resolve<F>(cached: Option<Catalog>, remote_revision: u64, extract: F) -> Resolution
where
    F: FnOnce() -> Catalog,
{
    let freshness = assess(cached.as_ref(), remote_revision);
    let catalog = match cached {
        Some(catalog) if !freshness.requires_extraction() => catalog,
        _ => extract(),
    };

    Resolution { catalog, freshness }
}
