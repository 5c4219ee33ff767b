use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::model::{Catalog, CategoryGroup};

impl Catalog {
    /// Narrows to the first group whose label contains `needle`, ignoring case.
    ///
    /// Returns an unchanged copy when nothing matches.
    pub fn filter_by_category(&self, needle: &str) -> Catalog {
        let needle = needle.to_lowercase();
        let matched = self
            .groups
            .iter()
            .find(|group| group.label.to_lowercase().contains(&needle));

        match matched {
            Some(group) => Catalog {
                revision: self.revision,
                groups: vec![group.clone()],
            },
            None => self.clone(),
        }
    }

    /// Narrows to the first record whose code equals `code`, ignoring case,
    /// scanning groups in order. Returns an unchanged copy when nothing matches.
    pub fn filter_by_code(&self, code: &str) -> Catalog {
        let code = code.to_lowercase();

        for group in &self.groups {
            if let Some(record) = group
                .records
                .iter()
                .find(|record| record.code.to_lowercase() == code)
            {
                return Catalog {
                    revision: self.revision,
                    groups: vec![CategoryGroup {
                        label: group.label.clone(),
                        records: vec![record.clone()],
                    }],
                };
            }
        }

        self.clone()
    }

    /// Category filter first, then code filter; empty arguments are skipped.
    pub fn narrow(&self, category: Option<&str>, code: Option<&str>) -> Catalog {
        let mut narrowed = match category.filter(|value| !value.is_empty()) {
            Some(category) => self.filter_by_category(category),
            None => self.clone(),
        };

        if let Some(code) = code.filter(|value| !value.is_empty()) {
            narrowed = narrowed.filter_by_code(code);
        }

        narrowed
    }
}

/// Indented JSON array of groups for display. The revision is not part of it.
pub fn render(groups: &[CategoryGroup]) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"  "));
    groups
        .serialize(&mut serializer)
        .context("failed to serialize status code groups")?;
    String::from_utf8(buffer).context("rendered json is not valid UTF-8")
}
