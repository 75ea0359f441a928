use std::cmp::Ordering;

use super::classify::{DirEntry, EntryBuckets};

/// Order every bucket for display.
///
/// Directories and failed entries go by name. A leading `..` entry stays
/// first. Files go by the integer before their first `.`; files without one
/// keep their relative order after the numbered ones.
pub fn sort_buckets(buckets: &mut EntryBuckets) {
    sort_by_name(&mut buckets.directories);
    sort_by_name(&mut buckets.failed);
    sort_by_numeric_prefix(&mut buckets.files);
}

pub fn sort_by_name(entries: &mut [DirEntry]) {
    let skip = usize::from(entries.first().is_some_and(|e| e.name == ".."));
    entries[skip..].sort_by(|a, b| compare_names(&a.name, &b.name));
}

/// Case-insensitive comparison with a byte-wise tie-break, so that names
/// differing only in case still order deterministically.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

pub fn sort_by_numeric_prefix(entries: &mut [DirEntry]) {
    entries.sort_by_cached_key(|entry| {
        let prefix = numeric_prefix(&entry.name);
        (prefix.is_none(), prefix)
    });
}

/// Integer at the start of the part of `name` before its first `.`.
///
/// Leading whitespace and a sign are accepted; trailing non-digits are
/// ignored, so `"12abc.txt"` yields 12. Values that do not fit in `i64` count
/// as non-numeric.
pub fn numeric_prefix(name: &str) -> Option<i64> {
    let stem = name.split('.').next().unwrap_or_default().trim_start();

    let (negative, digits) = match stem.as_bytes().first() {
        Some(b'-') => (true, &stem[1..]),
        Some(b'+') => (false, &stem[1..]),
        _ => (false, stem),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
