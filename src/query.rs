//! Pure queries over catalog records. Every function is total: an empty or
//! unloaded catalog simply yields empty results.

use serde::{Deserialize, Serialize};

use crate::dates::sort_key;
use crate::types::MovieRecord;

/// Record fields free-text search can look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    /// Internal `title`, ignoring any display override.
    Title,
    /// `title_name` with the usual fallback to `title`.
    DisplayName,
    Description,
}

impl SearchField {
    fn text<'a>(&self, m: &'a MovieRecord) -> &'a str {
        match self {
            SearchField::Title => &m.title,
            SearchField::DisplayName => m.display_name(),
            SearchField::Description => &m.description,
        }
    }
}

pub const DEFAULT_SEARCH_FIELDS: &[SearchField] = &[SearchField::DisplayName, SearchField::Description];

/// Records whose category matches case-insensitively, in catalog order.
pub fn by_category<'a>(records: &'a [MovieRecord], category: &str) -> Vec<&'a MovieRecord> {
    let wanted = category.to_lowercase();
    records.iter().filter(|m| m.category.to_lowercase() == wanted).collect()
}

/// Case-insensitive substring search. A blank term means "no filtering";
/// otherwise the term is matched as typed, surrounding spaces included.
pub fn search<'a>(records: &[&'a MovieRecord], term: &str, fields: &[SearchField]) -> Vec<&'a MovieRecord> {
    if term.trim().is_empty() {
        return records.to_vec();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .copied()
        .filter(|m| fields.iter().any(|f| f.text(m).to_lowercase().contains(&needle)))
        .collect()
}

/// Newest first. Uses `date_added` when every record has one, otherwise
/// `release`. Unparseable dates sort last; ties keep their input order.
pub fn sort_by_recency<'a>(records: &[&'a MovieRecord]) -> Vec<&'a MovieRecord> {
    let use_added = !records.is_empty() && records.iter().all(|m| m.date_added().is_some());
    let mut keyed: Vec<_> = records
        .iter()
        .map(|&m| {
            let raw = if use_added { m.date_added().unwrap_or_default() } else { m.release.as_str() };
            (sort_key(raw), m)
        })
        .collect();
    // stable: equal keys keep input order
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    keyed.into_iter().map(|(_, m)| m).collect()
}

/// One page of a sequence plus the figures a pager needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page that was requested, unclamped.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slice out 1-based `page`. `total_pages` is at least 1; pages outside
/// `1..=total_pages` come back empty rather than clamped.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let size = page_size.max(1);
    let total_pages = items.len().div_ceil(size).max(1);
    let slice: &[T] = match page.checked_sub(1).and_then(|p| p.checked_mul(size)) {
        Some(start) if start < items.len() => &items[start..start.saturating_add(size).min(items.len())],
        _ => &[],
    };
    Page { items: slice.to_vec(), page, total_pages, total_items: items.len() }
}

/// First `n` items in whatever order the caller already applied.
pub fn top_n<T: Clone>(items: &[T], n: usize) -> Vec<T> {
    items.iter().take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, category: &str, release: &str) -> MovieRecord {
        MovieRecord { id: id.into(), title: id.into(), category: category.into(), release: release.into(), ..Default::default() }
    }

    fn ids(v: &[&MovieRecord]) -> Vec<String> { v.iter().map(|m| m.id.clone()).collect() }

    fn sample() -> Vec<MovieRecord> {
        vec![rec("A", "bl", "2023-01-01"), rec("B", "BL", "2024-01-01"), rec("C", "gl", "2025-01-01")]
    }

    #[test]
    fn category_is_case_insensitive_then_sorted_newest_first() {
        let all = sample();
        let bl = by_category(&all, "BL");
        assert_eq!(ids(&bl), ["A", "B"]);
        assert_eq!(ids(&sort_by_recency(&bl)), ["B", "A"]);
        assert!(by_category(&all, "").is_empty());
        assert!(by_category(&[], "bl").is_empty());
    }

    #[test]
    fn search_matches_configured_fields() {
        let mut a = rec("a", "bl", "");
        a.display_title = Some("Semantic Error".into());
        let mut b = rec("b", "bl", "");
        b.description = "A campus ERROR story".into();
        let mut c = rec("semantic-error-2022", "bl", "");
        c.display_title = Some("Sunny Days".into());
        let all = [&a, &b, &c];

        assert_eq!(ids(&search(&all, "error", DEFAULT_SEARCH_FIELDS)), ["a", "b"]);
        assert_eq!(ids(&search(&all, "semantic", &[SearchField::Title])), ["semantic-error-2022"]);
        assert_eq!(search(&all, "", DEFAULT_SEARCH_FIELDS), all.to_vec());
        assert_eq!(search(&all, "   ", DEFAULT_SEARCH_FIELDS), all.to_vec());
    }

    #[test]
    fn search_keeps_spaces_inside_the_term() {
        let mut a = rec("a", "bl", "");
        a.display_title = Some("Lovely Runner".into());
        let mut b = rec("b", "bl", "");
        b.display_title = Some("Love Syndrome".into());
        let all = [&a, &b];
        assert_eq!(ids(&search(&all, "love ", DEFAULT_SEARCH_FIELDS)), ["b"]);
        assert_eq!(ids(&search(&all, "love", DEFAULT_SEARCH_FIELDS)), ["a", "b"]);
    }

    #[test]
    fn recency_reads_month_year_releases() {
        let v = [
            rec("old", "x", "1999-01-01"),
            rec("new", "x", "October 2024"),
            rec("mid", "x", "2024-03-15T12:00:00"),
        ];
        let refs: Vec<_> = v.iter().collect();
        assert_eq!(ids(&sort_by_recency(&refs)), ["new", "mid", "old"]);
    }

    #[test]
    fn recency_prefers_date_added_only_when_all_have_it() {
        let mut a = rec("a", "x", "2020-01-01");
        a.date_added = Some("2024-06-01T09:00:00".into());
        let mut b = rec("b", "x", "2022-01-01");
        b.date_added = Some("2024-01-01T09:00:00".into());
        assert_eq!(ids(&sort_by_recency(&[&b, &a])), ["a", "b"]);

        let c = rec("c", "x", "2021-01-01");
        // c lacks date_added, so release decides for the whole set
        assert_eq!(ids(&sort_by_recency(&[&a, &b, &c])), ["b", "c", "a"]);
    }

    #[test]
    fn recency_is_stable_idempotent_and_tolerates_bad_dates() {
        let v = [
            rec("bad", "x", "someday"),
            rec("t1", "x", "2024-01-01"),
            rec("t2", "x", "2024-01-01"),
            rec("old", "x", "1999"),
        ];
        let refs: Vec<_> = v.iter().collect();
        let once = sort_by_recency(&refs);
        assert_eq!(ids(&once), ["t1", "t2", "old", "bad"]);
        assert_eq!(sort_by_recency(&once), once);
    }

    #[test]
    fn second_page_of_seventeen() {
        let items: Vec<String> = (1..=17).map(|i| format!("m{}", i)).collect();
        let p = paginate(&items, 2, 15);
        assert_eq!(p.items, ["m16", "m17"]);
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.total_items, 17);
    }

    #[test]
    fn pages_reassemble_input() {
        let items: Vec<u32> = (0..31).collect();
        let first = paginate(&items, 1, 7);
        let rebuilt: Vec<u32> = (1..=first.total_pages).flat_map(|p| paginate(&items, p, 7).items).collect();
        assert_eq!(rebuilt, items);
    }

    #[test]
    fn out_of_range_pages_are_empty_not_clamped() {
        let items = [1, 2, 3];
        let p = paginate(&items, 5, 2);
        assert!(p.items.is_empty());
        assert_eq!((p.page, p.total_pages), (5, 2));
        assert!(paginate(&items, 0, 2).items.is_empty());

        let empty: [u8; 0] = [];
        let p = paginate(&empty, 1, 15);
        assert!(p.items.is_empty());
        assert_eq!(p.total_pages, 1);
    }

    #[test]
    fn top_n_takes_prefix() {
        assert_eq!(top_n(&[1, 2, 3], 2), [1, 2]);
        assert_eq!(top_n(&[1, 2, 3], 8), [1, 2, 3]);
    }
}
