//! Search, sort, and range filters over in-memory lists.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Apply the direction to an ascending comparison.
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Whether `haystack` contains `needle`, ignoring case.
///
/// A blank needle matches everything.
#[must_use]
pub fn matches_query(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Items where any of the texts produced by `fields` matches `query`.
#[must_use]
pub fn search<'a, T, F>(items: &'a [T], query: &str, fields: F) -> Vec<&'a T>
where
    F: Fn(&T) -> Vec<&str>,
{
    items
        .iter()
        .filter(|item| fields(item).into_iter().any(|text| matches_query(text, query)))
        .collect()
}

/// Stable sort by a key in the given direction.
pub fn sort_by_key<T, K, F>(items: &mut [T], direction: SortDirection, key: F)
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    items.sort_by(|a, b| {
        let ordering = key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal);
        direction.apply(ordering)
    });
}

/// Inclusive price bounds; either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl PriceRange {
    #[must_use]
    pub const fn new(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, amount: Decimal) -> bool {
        self.min.is_none_or(|min| amount >= min) && self.max.is_none_or(|max| amount <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row {
        name: &'static str,
        sku: &'static str,
        rank: u32,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Linen Apron", sku: "AP-1", rank: 3 },
            Row { name: "Cast Iron Pan", sku: "PN-7", rank: 1 },
            Row { name: "Apricot Jam", sku: "JM-2", rank: 2 },
        ]
    }

    #[test]
    fn test_matches_query_case_insensitive() {
        assert!(matches_query("Cast Iron Pan", "iron"));
        assert!(matches_query("anything", "   "));
        assert!(!matches_query("Apron", "pan"));
    }

    #[test]
    fn test_search_over_several_fields() {
        let rows = rows();
        let hits = search(&rows, "ap", |r| vec![r.name, r.sku]);
        let names: Vec<_> = hits.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Linen Apron", "Apricot Jam"]);

        let hits = search(&rows, "pn-", |r| vec![r.name, r.sku]);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_sort_by_key_both_directions() {
        let mut rows = rows();
        sort_by_key(&mut rows, SortDirection::Ascending, |r| r.rank);
        assert_eq!(rows.first().map(|r| r.rank), Some(1));

        sort_by_key(&mut rows, SortDirection::Descending, |r| r.name);
        assert_eq!(rows.first().map(|r| r.name), Some("Linen Apron"));
    }

    #[test]
    fn test_price_range_inclusive_and_open() {
        let range = PriceRange::new(Some(Decimal::new(10, 0)), Some(Decimal::new(20, 0)));
        assert!(range.contains(Decimal::new(10, 0)));
        assert!(range.contains(Decimal::new(20, 0)));
        assert!(!range.contains(Decimal::new(2001, 2)));
        assert!(PriceRange::default().contains(Decimal::new(999_999, 0)));
    }
}
