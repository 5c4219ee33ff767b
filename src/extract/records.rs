use crate::dom::{Document, NodeId};
use crate::model::StatusRecord;

use super::text::collect_text;

#[derive(Debug, Default)]
struct PendingRecord {
    code: String,
    name: String,
    description: String,
}

impl PendingRecord {
    fn take_if_complete(&mut self) -> Option<StatusRecord> {
        if self.code.is_empty() || self.name.is_empty() || self.description.is_empty() {
            return None;
        }

        let pending = std::mem::take(self);
        Some(StatusRecord {
            code: pending.code,
            name: pending.name,
            description: pending.description,
        })
    }
}

/// Pairs `dt`/`dd` children of one definition list into records, sorted by code.
///
/// Terms without a following definition are overwritten by the next term and
/// never produce a record.
pub fn extract_records(document: &Document, children: &[NodeId]) -> Vec<StatusRecord> {
    let mut records = Vec::new();
    let mut pending = PendingRecord::default();

    for &child in children {
        match document.element_name(child) {
            Some("dt") => {
                let (code, name) = split_term(&collect_text(document, child));
                pending.code = code;
                pending.name = name;
            }
            Some("dd") => {
                pending.description = collect_text(document, child);
            }
            _ => continue,
        }

        if let Some(record) = pending.take_if_complete() {
            records.push(record);
        }
    }

    records.sort_by(|a, b| a.code.cmp(&b.code));
    records
}

/// "418 I'm a teapot" -> ("418", "I'mateapot"); tokens after the code are joined without spaces.
fn split_term(term: &str) -> (String, String) {
    let mut tokens = term.split_whitespace();
    let code = tokens.next().unwrap_or_default().to_string();
    let name = tokens.collect::<String>();
    (code, name)
}
