use tracing::{debug, info};

use crate::dom::Document;
use crate::model::{Catalog, CategoryGroup};

use super::labels::{group_label, revision_of};
use super::records::extract_records;
use super::walk::elements;

pub fn build_catalog(document: &Document) -> Catalog {
    let mut revision = None;
    let mut groups = Vec::new();

    for id in elements(document, document.root()) {
        match document.element_name(id) {
            Some("html") if revision.is_none() => {
                revision = Some(revision_of(document, id));
            }
            Some("dl") => {
                let label = group_label(document, id);
                let records = extract_records(document, document.children(id));
                debug!(label = %label, records = records.len(), "extracted category group");
                groups.push(CategoryGroup { label, records });
            }
            _ => {}
        }
    }

    groups.sort_by(|a, b| a.label.cmp(&b.label));

    let catalog = Catalog {
        revision: revision.unwrap_or(0),
        groups,
    };

    info!(
        revision = catalog.revision,
        groups = catalog.groups.len(),
        records = catalog.record_count(),
        "built status code catalog"
    );

    catalog
}
