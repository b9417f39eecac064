//! Icon records as stored in the catalog, and drafts assembled from user input.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::slug::{effective_slug, title_to_slug};

/// One entry of the icon catalog.
///
/// Field order is the serialization order. Fields the tool does not know
/// about (aliases, license, ...) are kept in `extra` and written back after
/// the known ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconRecord {
    pub title: String,
    pub hex: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidelines: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IconRecord {
    /// Identifier the record is known by: explicit slug, else normalized title.
    pub fn effective_slug(&self) -> String {
        effective_slug(&self.title, self.slug.as_deref())
    }

    /// Shallow union: fields present on `newer` win, absent ones keep `self`'s value.
    ///
    /// A slug carried over that now equals the merged title's own
    /// normalization is dropped.
    pub fn merged_with(&self, newer: &IconRecord) -> IconRecord {
        let mut extra = self.extra.clone();
        for (key, value) in &newer.extra {
            extra.insert(key.clone(), value.clone());
        }

        let slug = newer
            .slug
            .clone()
            .or_else(|| self.slug.clone())
            .filter(|slug| *slug != title_to_slug(&newer.title));

        IconRecord {
            title: newer.title.clone(),
            hex: newer.hex.clone(),
            source: newer.source.clone(),
            slug,
            guidelines: newer.guidelines.clone().or_else(|| self.guidelines.clone()),
            extra,
        }
    }
}

/// Candidate icon data before its slug has been resolved against the title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDraft {
    pub title: String,
    pub hex: String,
    pub source: String,
    pub guidelines: Option<String>,
}

impl IconDraft {
    pub fn new(
        title: impl Into<String>,
        hex: &str,
        source: impl Into<String>,
        guidelines: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            hex: normalize_hex(hex),
            source: source.into(),
            guidelines: guidelines.filter(|g| !g.trim().is_empty()),
        }
    }

    /// Slug suggested for this draft when the user does not override it.
    pub fn suggested_slug(&self) -> String {
        title_to_slug(&self.title)
    }

    /// Build the catalog record for this draft.
    ///
    /// The explicit slug is normalized; it is stored only when it differs
    /// from the title's own normalization.
    pub fn into_record(self, explicit_slug: &str) -> IconRecord {
        let suggested = self.suggested_slug();
        let normalized_input = title_to_slug(explicit_slug);

        IconRecord {
            title: self.title,
            hex: self.hex,
            source: self.source,
            slug: (normalized_input != suggested).then_some(normalized_input),
            guidelines: self.guidelines,
            extra: Map::new(),
        }
    }
}

/// Canonical hex form: no leading `#`, uppercase.
pub fn normalize_hex(hex: &str) -> String {
    let trimmed = hex.trim();
    trimmed
        .strip_prefix('#')
        .unwrap_or(trimmed)
        .to_ascii_uppercase()
}
