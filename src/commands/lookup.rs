use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::LookupArgs;
use crate::pipeline::load_catalog;
use crate::query::render;

use super::{open_source, open_store};

pub fn run(args: LookupArgs) -> Result<()> {
    let store = open_store(&args.cache)?;
    let source = if args.offline {
        None
    } else {
        Some(open_source(&args.source)?)
    };

    let catalog = load_catalog(source.as_deref(), &store)?;
    let narrowed = catalog.narrow(args.status_type.as_deref(), args.code.as_deref());

    info!(
        revision = narrowed.revision,
        groups = narrowed.groups.len(),
        records = narrowed.record_count(),
        "lookup completed"
    );

    let rendered = render(&narrowed.groups)?;
    let mut output = io::BufWriter::new(io::stdout().lock());
    writeln!(output, "{rendered}").context("failed to write lookup output")?;
    output.flush()?;
    Ok(())
}
