//! Churn hotspot detection.
//!
//! Counts how many commits touched each file, then weighs that frequency
//! against the total lines changed: `commits × √(added + deleted + 1)`.
//! Frequency grows the score linearly while change volume only grows it
//! sub-linearly, so one giant commit does not eclipse many small ones.

use crate::collection::CappedMap;
use crate::rank::{rank, Rankable};

/// A file and its churn across history.
///
/// # Examples
///
/// ```
/// use gitstat_history::hotspots::FileHotspot;
///
/// let mut h = FileHotspot::new("src/main.rs");
/// h.commit_count = 4;
/// h.lines_added = 6;
/// h.lines_deleted = 2;
/// h.rescore();
/// assert_eq!(h.score, 12.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FileHotspot {
    /// File path exactly as `git log --name-only` prints it.
    pub path: String,
    /// Number of commits touching this file.
    pub commit_count: u64,
    /// Lines added across all commits.
    pub lines_added: u64,
    /// Lines deleted across all commits.
    pub lines_deleted: u64,
    /// `commit_count × √(lines_added + lines_deleted + 1)`.
    pub score: f64,
}

impl FileHotspot {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            commit_count: 0,
            lines_added: 0,
            lines_deleted: 0,
            score: 0.0,
        }
    }

    /// Recompute [`FileHotspot::score`] from the current counts.
    pub fn rescore(&mut self) {
        self.score = hotspot_score(self.commit_count, self.lines_added, self.lines_deleted);
    }
}

impl Rankable for FileHotspot {
    fn rank_value(&self) -> f64 {
        self.score
    }

    fn rank_name(&self) -> &str {
        &self.path
    }
}

/// `commits × √(lines_added + lines_deleted + 1)`, or 0 without commits.
///
/// # Examples
///
/// ```
/// use gitstat_history::hotspots::hotspot_score;
///
/// assert_eq!(hotspot_score(5, 0, 0), 5.0);
/// assert_eq!(hotspot_score(0, 100, 100), 0.0);
/// ```
pub fn hotspot_score(commits: u64, lines_added: u64, lines_deleted: u64) -> f64 {
    if commits == 0 {
        return 0.0;
    }
    let churn = (lines_added + lines_deleted) as f64;
    commits as f64 * (churn + 1.0).sqrt()
}

/// Fold `git log --name-only --pretty=format:` output into per-file
/// commit counts.
///
/// Every non-empty line is one commit touching that path. Line totals
/// start at zero and are filled in by a per-file query.
///
/// # Examples
///
/// ```
/// use gitstat_history::hotspots::aggregate_touched_files;
///
/// let files = aggregate_touched_files("a.rs\nb.rs\n\na.rs\n\na.rs\n", 1000);
/// assert_eq!(files.len(), 2);
/// assert_eq!(files.get("a.rs").unwrap().commit_count, 3);
/// ```
pub fn aggregate_touched_files(listing: &str, capacity: usize) -> CappedMap<FileHotspot> {
    let mut files = CappedMap::new(capacity);
    for path in listing.lines().filter(|line| !line.is_empty()) {
        if let Some(file) = files.get_or_insert_with(path, || FileHotspot::new(path)) {
            file.commit_count += 1;
        }
    }
    files
}

/// Score every file and return them ranked by score descending.
///
/// Files with equal scores are ordered by path.
pub fn score_hotspots(files: CappedMap<FileHotspot>) -> Vec<FileHotspot> {
    let mut hotspots = files.into_values();
    for hotspot in &mut hotspots {
        hotspot.rescore();
    }
    rank(hotspots)
}
