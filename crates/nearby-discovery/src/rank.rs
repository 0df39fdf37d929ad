//! Rating filter and stable ordering of a result set.

use std::cmp::Ordering;

use nearby_core::{NormalizedPlace, SortKey};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Keeps places whose numeric rating is at least `min_rating`, then orders
/// them by `sort_key`.
///
/// Places without a numeric rating (`N/A` or NaN) never pass the filter,
/// even at `min_rating == 0`. The sort is stable: ties keep their input
/// order. The input is not modified.
#[must_use]
pub fn filter_and_sort(
    items: &[NormalizedPlace],
    min_rating: f64,
    sort_key: SortKey,
) -> Vec<NormalizedPlace> {
    let mut kept: Vec<NormalizedPlace> = items
        .iter()
        .filter(|p| p.rating.numeric().is_some_and(|r| r >= min_rating))
        .cloned()
        .collect();

    kept.sort_by(|a, b| compare(a, b, sort_key));
    kept
}

fn compare(a: &NormalizedPlace, b: &NormalizedPlace, sort_key: SortKey) -> Ordering {
    match sort_key {
        SortKey::Name => name_key(&a.name)
            .cmp(&name_key(&b.name))
            .then_with(|| a.name.cmp(&b.name)),
        // INFINITY sorts after every finite distance under total_cmp.
        SortKey::Distance => a.distance_meters.total_cmp(&b.distance_meters),
        SortKey::Rating => b.rating.sort_value().total_cmp(&a.rating.sort_value()),
    }
}

/// Collation key close to locale order: accents stripped, case folded.
fn name_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
