//! Catalog ordering.
//!
//! Records are ordered by title. Records sharing a title are ordered by
//! slug, but only among those that carry an explicit slug: slug-less
//! records keep their position within the run of equal titles.

use std::cmp::Ordering;

use crate::collate::locale_cmp;
use crate::icon::IconRecord;

pub fn sort_icons(icons: &mut [IconRecord]) {
    // Stable, so equal titles keep input order before the slug pass.
    icons.sort_by(|a, b| locale_cmp(&a.title, &b.title));

    let mut start = 0;
    while start < icons.len() {
        let mut end = start + 1;
        while end < icons.len() && locale_cmp(&icons[start].title, &icons[end].title) == Ordering::Equal {
            end += 1;
        }
        if end - start > 1 {
            sort_slugged_in_place(&mut icons[start..end]);
        }
        start = end;
    }
}

/// Reorder the slugged records of a run among the positions they occupy.
fn sort_slugged_in_place(run: &mut [IconRecord]) {
    let positions: Vec<usize> = run
        .iter()
        .enumerate()
        .filter(|(_, icon)| icon.slug.is_some())
        .map(|(i, _)| i)
        .collect();

    if positions.len() < 2 {
        return;
    }

    let mut slugged: Vec<IconRecord> = positions.iter().map(|&i| run[i].clone()).collect();
    slugged.sort_by(|a, b| {
        locale_cmp(
            a.slug.as_deref().unwrap_or_default(),
            b.slug.as_deref().unwrap_or_default(),
        )
    });

    for (position, icon) in positions.into_iter().zip(slugged) {
        run[position] = icon;
    }
}

/// Whether `icons` already satisfies the catalog order.
pub fn is_sorted(icons: &[IconRecord]) -> bool {
    icons.windows(2).all(|pair| {
        let (a, b) = (&pair[0], &pair[1]);
        match locale_cmp(&a.title, &b.title) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => match (&a.slug, &b.slug) {
                (Some(x), Some(y)) => locale_cmp(x, y) != Ordering::Greater,
                _ => true,
            },
        }
    })
}
