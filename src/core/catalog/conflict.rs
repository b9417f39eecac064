//! Duplicate detection and the merge-or-reject decision.

use serde::{Deserialize, Serialize};

use crate::icon::IconRecord;
use crate::slug::title_to_slug;

/// Rule deciding when a candidate collides with an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictRule {
    /// Compare against the explicit slug when the record has one, else its normalized title.
    #[default]
    SlugOrTitle,
    /// Only records with an explicit slug can collide.
    SlugOnly,
    /// Same title and same explicit slug (both absent counts as the same).
    TitleAndSlug,
}

impl ConflictRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictRule::SlugOrTitle => "slug-or-title",
            ConflictRule::SlugOnly => "slug-only",
            ConflictRule::TitleAndSlug => "title-and-slug",
        }
    }

    fn matches(&self, normalized_input: &str, candidate: &IconRecord, existing: &IconRecord) -> bool {
        match self {
            ConflictRule::SlugOrTitle => match &existing.slug {
                Some(slug) => normalized_input == slug,
                None => normalized_input == title_to_slug(&existing.title),
            },
            ConflictRule::SlugOnly => existing.slug.as_deref() == Some(normalized_input),
            ConflictRule::TitleAndSlug => {
                candidate.title == existing.title && candidate.slug == existing.slug
            }
        }
    }
}

/// A detected collision between the candidate and an existing record.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    /// Position of the existing record in catalog order.
    pub index: usize,
    pub existing: IconRecord,
    pub candidate: IconRecord,
    /// The candidate's normalized explicit slug.
    pub slug: String,
}

/// First record in catalog order that collides with the candidate.
pub fn find_conflict(
    icons: &[IconRecord],
    candidate: &IconRecord,
    normalized_input: &str,
    rule: ConflictRule,
) -> Option<Conflict> {
    icons
        .iter()
        .position(|existing| rule.matches(normalized_input, candidate, existing))
        .map(|index| Conflict {
            index,
            existing: icons[index].clone(),
            candidate: candidate.clone(),
            slug: normalized_input.to_string(),
        })
}

/// Decides whether a conflicting candidate replaces the existing record.
pub trait MergePolicy {
    fn should_merge(&mut self, conflict: &Conflict) -> bool;
}

impl<F> MergePolicy for F
where
    F: FnMut(&Conflict) -> bool,
{
    fn should_merge(&mut self, conflict: &Conflict) -> bool {
        self(conflict)
    }
}

/// Fixed answer, for non-interactive runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedDecision {
    Merge,
    Reject,
}

impl MergePolicy for FixedDecision {
    fn should_merge(&mut self, _conflict: &Conflict) -> bool {
        matches!(self, FixedDecision::Merge)
    }
}
