//! Title-derived identifiers for content records.

use std::collections::BTreeMap;

/// A record whose identity is derived from its display title.
pub trait Slugged {
    fn title(&self) -> &str;
}

/// Lower-cases `title` and replaces every run of whitespace with one hyphen.
///
/// Leading and trailing whitespace runs become hyphens too; no trimming.
pub fn slugify(title: &str) -> String {
    // Whole-string lowering applies context rules such as the final sigma.
    let lowered = title.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_whitespace = false;
    for ch in lowered.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(ch);
            in_whitespace = false;
        }
    }
    slug
}

/// Returns the first record whose slug equals `slug` exactly.
pub fn resolve<'a, T: Slugged>(records: &'a [T], slug: &str) -> Option<&'a T> {
    records.iter().find(|record| slugify(record.title()) == slug)
}

/// Slugs shared by more than one record, with every index that produces them.
///
/// [`resolve`] only ever reaches the first index of each entry.
pub fn duplicate_slugs<T: Slugged>(records: &[T]) -> Vec<(String, Vec<usize>)> {
    let mut seen: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (index, record) in records.iter().enumerate() {
        seen.entry(slugify(record.title())).or_default().push(index);
    }
    seen.into_iter()
        .filter(|(_, indices)| indices.len() > 1)
        .collect()
}
