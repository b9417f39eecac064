//! Title to slug normalization.
//!
//! A slug is the canonical identifier of an icon. It is derived from the
//! display title, or from an explicit override run through the same
//! normalization, so both sides of every identity comparison agree.

use unicode_normalization::UnicodeNormalization;

/// Literal substitutions applied after lowercasing, in order.
///
/// The letter entries cover characters that NFD does not split into an
/// ASCII base letter plus combining marks.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("+", "plus"),
    (".", "dot"),
    ("&", "and"),
    ("đ", "d"),
    ("ħ", "h"),
    ("ı", "i"),
    ("ĸ", "k"),
    ("ŀ", "l"),
    ("ł", "l"),
    ("ß", "ss"),
    ("ŧ", "t"),
];

/// Normalize a display title (or an explicit slug) into a slug.
///
/// Never fails. Input without any letters or digits yields an empty string,
/// which callers must accept as a (degenerate) identifier.
pub fn title_to_slug(title: &str) -> String {
    let mut out = title.to_lowercase();

    for (from, to) in SUBSTITUTIONS {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }

    out.nfd()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9'))
        .collect()
}

/// Identifier a record is known by: its explicit slug, else its normalized title.
pub fn effective_slug(title: &str, slug: Option<&str>) -> String {
    match slug {
        Some(slug) => slug.to_string(),
        None => title_to_slug(title),
    }
}
