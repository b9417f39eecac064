//! Locale-aware string ordering.
//!
//! Uses the Unicode Collation Algorithm with the CLDR root collation and
//! non-ignorable variable weighting, the default of ICU-backed locale
//! comparisons: whitespace and punctuation sort before digits, digits before
//! letters, and letter differences outrank accent differences, which
//! outrank case (lowercase first).

use std::cell::RefCell;
use std::cmp::Ordering;

use feruca::{Collator, Locale, Tailoring};

thread_local! {
    static ROOT_COLLATOR: RefCell<Collator> =
        RefCell::new(Collator::new(Tailoring::Cldr(Locale::Root), false, false));
}

/// Compare two strings the way a locale-aware sort would.
///
/// Returns `Ordering::Equal` for strings that collate identically, such as
/// canonically equivalent forms.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    ROOT_COLLATOR.with(|collator| collator.borrow_mut().collate(a, b))
}
