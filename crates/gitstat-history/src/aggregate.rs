//! Contributor, branch and file-type aggregation.
//!
//! Each function consumes one query's text output and folds it into a
//! [`CappedMap`] keyed by the exact key string. Repeat keys merge into the
//! existing entry; malformed lines are skipped.

use crate::collection::CappedMap;
use crate::parse::{file_extension, parse_branch_line, parse_shortlog_line};

/// Commit and line totals for one author.
///
/// # Examples
///
/// ```
/// use gitstat_history::aggregate::AuthorRecord;
///
/// let author = AuthorRecord::new("ada");
/// assert_eq!(author.commit_count, 0);
/// assert_eq!(author.churn(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecord {
    /// Author name exactly as git reports it.
    pub name: String,
    pub commit_count: u64,
    pub lines_added: u64,
    pub lines_deleted: u64,
}

impl AuthorRecord {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            commit_count: 0,
            lines_added: 0,
            lines_deleted: 0,
        }
    }

    /// Lines added plus lines deleted.
    pub fn churn(&self) -> u64 {
        self.lines_added + self.lines_deleted
    }
}

/// A local branch and the number of commits reachable from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRecord {
    pub name: String,
    pub commit_count: u64,
}

/// File count and line total for one extension bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionRecord {
    /// Extension without the dot, or `"no_ext"`.
    pub extension: String,
    pub file_count: u64,
    pub total_lines: u64,
}

impl ExtensionRecord {
    /// Share of `overall_lines` held by this bucket, in percent.
    ///
    /// Returns `0.0` when `overall_lines` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitstat_history::aggregate::ExtensionRecord;
    ///
    /// let rs = ExtensionRecord { extension: "rs".into(), file_count: 2, total_lines: 25 };
    /// assert_eq!(rs.percentage_of(100), 25.0);
    /// assert_eq!(rs.percentage_of(0), 0.0);
    /// ```
    pub fn percentage_of(&self, overall_lines: u64) -> f64 {
        if overall_lines == 0 {
            return 0.0;
        }
        self.total_lines as f64 * 100.0 / overall_lines as f64
    }
}

/// Everything learned from the tracked-file listing.
#[derive(Debug, Clone)]
pub struct FileInventory {
    /// Every non-empty path seen, regardless of the extension cap.
    pub total_files: u64,
    /// Sum of readable files' line counts, regardless of the extension cap.
    pub total_lines: u64,
    pub extensions: CappedMap<ExtensionRecord>,
}

/// Fold `git shortlog -sn` output into author records.
///
/// Commit counts of a repeated author are summed. Line totals start at zero
/// and are filled in later by a per-author query.
///
/// # Examples
///
/// ```
/// use gitstat_history::aggregate::aggregate_authors;
///
/// let authors = aggregate_authors("    5\tAda\n    3\tGrace\n    1\tAda\n", 100);
/// assert_eq!(authors.len(), 2);
/// assert_eq!(authors.get("Ada").unwrap().commit_count, 6);
/// ```
pub fn aggregate_authors(shortlog: &str, capacity: usize) -> CappedMap<AuthorRecord> {
    let mut authors = CappedMap::new(capacity);
    for (count, name) in shortlog.lines().filter_map(parse_shortlog_line) {
        if let Some(author) = authors.get_or_insert_with(name, || AuthorRecord::new(name)) {
            author.commit_count += count;
        }
    }
    authors
}

/// Fold `git branch` output into branch records with zero commit counts.
///
/// A repeated branch name keeps its first entry.
pub fn aggregate_branches(listing: &str, capacity: usize) -> CappedMap<BranchRecord> {
    let mut branches = CappedMap::new(capacity);
    for name in listing.lines().filter_map(parse_branch_line) {
        branches.get_or_insert_with(name, || BranchRecord {
            name: name.to_string(),
            commit_count: 0,
        });
    }
    branches
}

/// Fold the tracked-file listing into extension buckets.
///
/// `count_lines` is asked once per path; `None` means the file could not be
/// read, in which case the file still counts but contributes no lines.
///
/// # Examples
///
/// ```
/// use gitstat_history::aggregate::aggregate_files;
///
/// let inventory = aggregate_files("src/a.rs\nsrc/b.rs\nREADME\n", 50, |_| Some(10));
/// assert_eq!(inventory.total_files, 3);
/// assert_eq!(inventory.total_lines, 30);
/// assert_eq!(inventory.extensions.get("rs").unwrap().file_count, 2);
/// assert_eq!(inventory.extensions.get("no_ext").unwrap().total_lines, 10);
/// ```
pub fn aggregate_files(
    listing: &str,
    capacity: usize,
    mut count_lines: impl FnMut(&str) -> Option<u64>,
) -> FileInventory {
    let mut inventory = FileInventory {
        total_files: 0,
        total_lines: 0,
        extensions: CappedMap::new(capacity),
    };

    for path in listing.lines().filter(|line| !line.is_empty()) {
        inventory.total_files += 1;
        let lines = count_lines(path);
        inventory.total_lines += lines.unwrap_or(0);

        let extension = file_extension(path);
        if let Some(bucket) = inventory
            .extensions
            .get_or_insert_with(extension, || ExtensionRecord {
                extension: extension.to_string(),
                file_count: 0,
                total_lines: 0,
            })
        {
            bucket.file_count += 1;
            bucket.total_lines += lines.unwrap_or(0);
        }
    }

    inventory
}
