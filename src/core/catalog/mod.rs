//! The icon catalog: loading, upserting and canonical serialization.
//!
//! A catalog is a plain value. [`Catalog::upsert`] borrows it and hands
//! back an updated copy; the caller's catalog is never modified.

mod conflict;
mod sort;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, IconConflictDetails, Result};
use crate::icon::{IconDraft, IconRecord};
use crate::slug::title_to_slug;
use crate::utils::io;

pub use conflict::{find_conflict, Conflict, ConflictRule, FixedDecision, MergePolicy};
pub use sort::{is_sorted, sort_icons};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub icons: Vec<IconRecord>,
}

/// What an upsert did to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UpsertAction {
    Appended,
    Merged,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertOutcome {
    pub action: UpsertAction,
    /// The record as stored, after merging.
    pub record: IconRecord,
    /// Effective slug of the stored record.
    pub slug: String,
    /// Whether an existing record collided with the candidate.
    pub conflict: bool,
}

impl Catalog {
    pub fn new(icons: Vec<IconRecord>) -> Self {
        Self { icons }
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Parse catalog JSON. `origin` names the source in error details.
    pub fn parse(content: &str, origin: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::catalog_invalid_json(origin, e))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = io::read_file(path, &format!("read {}", path.display()))?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Canonical form: 4-space indentation and a single trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize catalog".to_string()))
        })?;

        let mut out = String::from_utf8(buf).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize catalog".to_string()))
        })?;
        out.push('\n');
        Ok(out)
    }

    pub fn save(&self, path: &Path) -> Result<String> {
        let content = self.to_json()?;
        io::write_file_atomic(path, &content, &format!("write {}", path.display()))?;
        Ok(content)
    }

    pub fn sort(&mut self) {
        sort_icons(&mut self.icons);
    }

    /// Insert `draft`, merging into or rejecting against a colliding record.
    ///
    /// On rejection the error is an `icon.conflict`. `self` is never modified.
    pub fn upsert(
        &self,
        draft: IconDraft,
        explicit_slug: &str,
        rule: ConflictRule,
        policy: &mut dyn MergePolicy,
    ) -> Result<(Catalog, UpsertOutcome)> {
        let normalized_input = title_to_slug(explicit_slug);
        let candidate = draft.into_record(explicit_slug);

        let mut updated = self.clone();
        let (action, record, conflict) =
            match find_conflict(&updated.icons, &candidate, &normalized_input, rule) {
                None => {
                    updated.icons.push(candidate.clone());
                    (UpsertAction::Appended, candidate, false)
                }
                Some(found) => {
                    if !policy.should_merge(&found) {
                        return Err(Error::icon_conflict(IconConflictDetails {
                            title: candidate.title,
                            slug: normalized_input,
                            existing_title: found.existing.title,
                            existing_slug: found.existing.slug,
                            index: found.index,
                        }));
                    }

                    let merged = found.existing.merged_with(&candidate);
                    updated.icons[found.index] = merged.clone();
                    (UpsertAction::Merged, merged, true)
                }
            };

        updated.sort();

        let outcome = UpsertOutcome {
            action,
            slug: record.effective_slug(),
            record,
            conflict,
        };
        Ok((updated, outcome))
    }

    /// Collision the candidate would hit, without mutating anything.
    pub fn find_conflict(
        &self,
        draft: &IconDraft,
        explicit_slug: &str,
        rule: ConflictRule,
    ) -> Option<Conflict> {
        let candidate = draft.clone().into_record(explicit_slug);
        find_conflict(&self.icons, &candidate, &title_to_slug(explicit_slug), rule)
    }
}

/// 1-based line of the record whose `"title"` is `title` in serialized catalog JSON.
pub fn title_line(serialized: &str, title: &str) -> Option<usize> {
    let encoded = serde_json::to_string(title).ok()?;
    let needle = format!("\"title\": {}", encoded);
    let offset = serialized.find(&needle)?;
    Some(serialized[..offset].matches('\n').count() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn record(title: &str, slug: Option<&str>) -> IconRecord {
        IconRecord {
            title: title.to_string(),
            hex: "000000".to_string(),
            source: "https://example.com".to_string(),
            slug: slug.map(str::to_string),
            guidelines: None,
            extra: Map::new(),
        }
    }

    fn draft(title: &str) -> IconDraft {
        IconDraft::new(title, "#abcdef", "https://example.org", None)
    }

    #[test]
    fn appends_when_no_conflict() {
        let catalog = Catalog::new(vec![record("Apple", None), record("Zoom", None)]);

        let (catalog, outcome) = catalog
            .upsert(draft("Node.js"), "nodedotjs", ConflictRule::default(), &mut FixedDecision::Reject)
            .unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(outcome.action, UpsertAction::Appended);
        assert!(!outcome.conflict);
        assert_eq!(outcome.slug, "nodedotjs");
        assert_eq!(outcome.record.slug, None);
        assert_eq!(catalog.icons[1].title, "Node.js");
        assert_eq!(catalog.icons[1].hex, "ABCDEF");
    }

    #[test]
    fn rejected_conflict_is_typed() {
        let catalog = Catalog::new(vec![record("Node.js", None)]);

        let err = catalog
            .upsert(draft("Node.JS"), "Node.JS", ConflictRule::default(), &mut FixedDecision::Reject)
            .unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(err.details["slug"], "nodedotjs");
        assert_eq!(err.details["existingTitle"], "Node.js");
    }

    #[test]
    fn merge_replaces_in_place() {
        let mut existing = record("Node.js", None);
        existing.guidelines = Some("https://nodejs.org/brand".to_string());
        let catalog = Catalog::new(vec![record("Apple", None), existing]);

        let (catalog, outcome) = catalog
            .upsert(draft("Node.js"), "nodedotjs", ConflictRule::default(), &mut FixedDecision::Merge)
            .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(outcome.action, UpsertAction::Merged);
        assert!(outcome.conflict);
        assert_eq!(catalog.icons[1].hex, "ABCDEF");
        assert_eq!(catalog.icons[1].source, "https://example.org");
        assert_eq!(
            catalog.icons[1].guidelines.as_deref(),
            Some("https://nodejs.org/brand")
        );
    }

    #[test]
    fn rejection_leaves_catalog_untouched() {
        let catalog = Catalog::new(vec![record("Node.js", None)]);
        let before = catalog.clone();

        let result =
            catalog.upsert(draft("Node.js"), "nodedotjs", ConflictRule::default(), &mut FixedDecision::Reject);

        assert!(result.is_err());
        assert_eq!(catalog, before);
    }

    #[test]
    fn merged_record_keeps_slug_invariant() {
        let catalog = Catalog::new(vec![record("Foo Two", Some("foo2"))]);

        let (catalog, outcome) = catalog
            .upsert(draft("Foo2"), "foo2", ConflictRule::default(), &mut FixedDecision::Merge)
            .unwrap();

        assert_eq!(outcome.action, UpsertAction::Merged);
        assert_eq!(catalog.icons[0].title, "Foo2");
        assert_eq!(catalog.icons[0].slug, None);
        assert_eq!(outcome.slug, "foo2");
    }

    #[test]
    fn policy_sees_the_conflict() {
        let catalog = Catalog::new(vec![record("Foo", Some("foo2"))]);
        let mut seen = None;
        let mut policy = |c: &Conflict| {
            seen = Some((c.index, c.slug.clone()));
            false
        };

        let result = catalog.upsert(draft("Foo Two"), "foo2", ConflictRule::default(), &mut policy);
        assert!(result.is_err());
        assert_eq!(seen, Some((0, "foo2".to_string())));
    }

    #[test]
    fn explicit_slug_stored_when_different() {
        let (catalog, outcome) = Catalog::default()
            .upsert(draft("Foo"), "Foo Bar", ConflictRule::default(), &mut FixedDecision::Reject)
            .unwrap();

        assert_eq!(outcome.slug, "foobar");
        assert_eq!(catalog.icons[0].slug.as_deref(), Some("foobar"));
    }

    #[test]
    fn degenerate_slug_is_accepted() {
        let (catalog, outcome) = Catalog::default()
            .upsert(draft("日本"), "", ConflictRule::default(), &mut FixedDecision::Reject)
            .unwrap();

        assert_eq!(outcome.slug, "");
        assert_eq!(catalog.icons[0].slug, None);
    }

    #[test]
    fn to_json_uses_four_spaces_and_one_newline() {
        let catalog = Catalog::new(vec![record("Foo", None)]);
        let json = catalog.to_json().unwrap();

        assert_eq!(
            json,
            "{\n    \"icons\": [\n        {\n            \"title\": \"Foo\",\n            \"hex\": \"000000\",\n            \"source\": \"https://example.com\"\n        }\n    ]\n}\n"
        );
    }

    #[test]
    fn empty_catalog_serializes() {
        let json = Catalog::default().to_json().unwrap();
        assert_eq!(json, "{\n    \"icons\": []\n}\n");
    }

    #[test]
    fn parse_rejects_missing_icons_key() {
        let err = Catalog::parse("{}", "inline").unwrap_err();
        assert_eq!(err.code.as_str(), "catalog.invalid_json");
    }

    #[test]
    fn title_line_finds_record() {
        let catalog = Catalog::new(vec![record("Apple", None), record("Foo \"Bar\"", None)]);
        let json = catalog.to_json().unwrap();

        assert_eq!(title_line(&json, "Apple"), Some(4));
        assert_eq!(title_line(&json, "Foo \"Bar\""), Some(9));
        assert_eq!(title_line(&json, "Missing"), None);
    }

    #[test]
    fn find_conflict_does_not_mutate() {
        let catalog = Catalog::new(vec![record("Foo", None)]);
        let before = catalog.clone();

        let conflict = catalog.find_conflict(&draft("FOO"), "foo", ConflictRule::default());
        assert!(conflict.is_some());
        assert_eq!(catalog, before);
    }
}
