use anyhow::Result;
use tracing::{info, warn};

use crate::cli::StatusArgs;

use super::open_store;

pub fn run(args: StatusArgs) -> Result<()> {
    let store = open_store(&args.cache)?;
    let file = store.describe()?;

    info!(path = %file.path, "status requested");

    if !file.exists {
        warn!(path = %file.path, "cache file missing");
        return Ok(());
    }

    info!(
        path = %file.path,
        size_bytes = file.size_bytes.unwrap_or_default(),
        modified_at = %file.modified_at.unwrap_or_default(),
        "cache file present"
    );

    if let Some(catalog) = store.load()? {
        info!(
            revision = catalog.revision,
            groups = catalog.groups.len(),
            records = catalog.record_count(),
            "loaded cached catalog"
        );

        for group in &catalog.groups {
            info!(label = %group.label, records = group.records.len(), "category");
        }
    }

    Ok(())
}
