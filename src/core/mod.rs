// Public modules
pub mod catalog;
pub mod collate;
pub mod defaults;
pub mod error;
pub mod icon;
pub mod slug;
pub mod svg;
pub mod tools;

// Re-export common types for convenience
pub use catalog::{Catalog, ConflictRule, MergePolicy, UpsertAction, UpsertOutcome};
pub use error::{Error, ErrorCode, Result};
pub use icon::{IconDraft, IconRecord};
pub use slug::title_to_slug;
