pub mod lookup;
pub mod revision;
pub mod status;

use anyhow::Result;

use crate::cache::CacheStore;
use crate::cli::{CacheArgs, SourceArgs};
use crate::source::{DocumentSource, FileSource, HttpSource, HttpSourceConfig};

fn open_store(args: &CacheArgs) -> Result<CacheStore> {
    match &args.cache_path {
        Some(path) => Ok(CacheStore::new(path)),
        None => CacheStore::at_default_path(),
    }
}

fn open_source(args: &SourceArgs) -> Result<Box<dyn DocumentSource>> {
    if let Some(path) = &args.source_file {
        return Ok(Box::new(FileSource::new(path)));
    }

    let source = HttpSource::new(HttpSourceConfig {
        url: args.source_url.clone(),
        user_agent: args.user_agent.clone(),
        timeout_ms: args.timeout_ms,
    })?;
    Ok(Box::new(source))
}
