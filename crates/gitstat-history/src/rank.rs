//! Descending ranking and the top-K display policy shared by every section.

use std::cmp::Ordering;

use crate::aggregate::{AuthorRecord, BranchRecord, ExtensionRecord};

/// Something that can be ranked: a primary value (higher first) and a
/// name used to order equal values.
pub trait Rankable {
    fn rank_value(&self) -> f64;
    fn rank_name(&self) -> &str;
}

impl Rankable for AuthorRecord {
    fn rank_value(&self) -> f64 {
        self.commit_count as f64
    }

    fn rank_name(&self) -> &str {
        &self.name
    }
}

impl Rankable for BranchRecord {
    fn rank_value(&self) -> f64 {
        self.commit_count as f64
    }

    fn rank_name(&self) -> &str {
        &self.name
    }
}

impl Rankable for ExtensionRecord {
    fn rank_value(&self) -> f64 {
        self.file_count as f64
    }

    fn rank_name(&self) -> &str {
        &self.extension
    }
}

/// Sort by value descending, then by name ascending.
///
/// # Examples
///
/// ```
/// use gitstat_history::aggregate::BranchRecord;
/// use gitstat_history::rank::rank;
///
/// let ranked = rank(vec![
///     BranchRecord { name: "b".into(), commit_count: 1 },
///     BranchRecord { name: "main".into(), commit_count: 9 },
///     BranchRecord { name: "a".into(), commit_count: 1 },
/// ]);
/// let names: Vec<&str> = ranked.iter().map(|b| b.name.as_str()).collect();
/// assert_eq!(names, ["main", "a", "b"]);
/// ```
pub fn rank<T: Rankable>(mut items: Vec<T>) -> Vec<T> {
    items.sort_by(|a, b| {
        b.rank_value()
            .partial_cmp(&a.rank_value())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.rank_name().cmp(b.rank_name()))
    });
    items
}

/// The first `k` entries of a ranked list plus how many were left out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopK<'a, T> {
    pub shown: &'a [T],
    pub omitted: usize,
}

/// Take the first `k` entries of an already ranked slice.
///
/// # Examples
///
/// ```
/// use gitstat_history::rank::top_k;
///
/// let view = top_k(&[1, 2, 3, 4, 5], 3);
/// assert_eq!(view.shown, &[1, 2, 3]);
/// assert_eq!(view.omitted, 2);
///
/// let all = top_k(&[1, 2], 10);
/// assert_eq!(all.omitted, 0);
/// ```
pub fn top_k<T>(items: &[T], k: usize) -> TopK<'_, T> {
    let shown = &items[..items.len().min(k)];
    TopK {
        shown,
        omitted: items.len() - shown.len(),
    }
}
