use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::RevisionArgs;
use crate::extract::document_revision;
use crate::freshness::assess;

use super::{open_source, open_store};

#[derive(Debug, Serialize)]
struct RevisionReport {
    source: String,
    remote_revision: u64,
    cached_revision: Option<u64>,
    freshness: String,
}

pub fn run(args: RevisionArgs) -> Result<()> {
    let store = open_store(&args.cache)?;
    let cached = store.load()?;
    let source = open_source(&args.source)?;

    let document = source.fetch()?;
    let remote_revision = document_revision(&document);
    let freshness = assess(cached.as_ref(), remote_revision);

    let report = RevisionReport {
        source: source.describe(),
        remote_revision,
        cached_revision: cached.as_ref().map(|catalog| catalog.revision),
        freshness: freshness.to_string(),
    };

    info!(
        remote_revision,
        freshness = %freshness,
        needs_refresh = freshness.requires_extraction(),
        "revision checked"
    );

    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, &report)
        .context("failed to serialize revision report")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}
