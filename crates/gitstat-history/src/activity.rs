//! Per-author temporal activity.
//!
//! One pass over the commit log collects each author's commit count and
//! first/last commit dates. Scoring then weighs commit count by recency
//! and by the log of lines changed:
//! `commits × (10000 / (days_since_last + 1)) × ln(lines + 1)`.

use chrono::NaiveDate;

use crate::collection::CappedMap;
use crate::parse::parse_commit_line;
use crate::rank::{rank, Rankable};

/// Day count used when the last commit date is missing or unparsable.
pub const UNKNOWN_DAYS: i64 = 9999;

/// Authors whose last commit is at most this many days old are active.
pub const ACTIVE_WINDOW_DAYS: i64 = 90;

/// Activity metrics for one author.
///
/// Dates are kept as the `YYYY-MM-DD` strings git printed; for that fixed
/// width format, string order is chronological order.
///
/// # Examples
///
/// ```
/// use gitstat_history::activity::AuthorActivity;
///
/// let a = AuthorActivity::first_seen("ada", "2024-05-01");
/// assert_eq!(a.commit_count, 1);
/// assert_eq!(a.first_commit_date, a.last_commit_date);
/// assert!(!a.is_active);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorActivity {
    pub name: String,
    pub commit_count: u64,
    pub lines_added: u64,
    pub lines_deleted: u64,
    pub first_commit_date: String,
    pub last_commit_date: String,
    /// Whole days between the last commit and today, clamped at 0;
    /// [`UNKNOWN_DAYS`] when the date cannot be parsed.
    pub days_since_last_commit: i64,
    /// `days_since_last_commit <= 90`.
    pub is_active: bool,
    pub activity_score: f64,
}

impl AuthorActivity {
    /// A fresh entry for an author's first sighting in the log.
    pub fn first_seen(name: &str, date: &str) -> Self {
        Self {
            name: name.to_string(),
            commit_count: 1,
            lines_added: 0,
            lines_deleted: 0,
            first_commit_date: date.to_string(),
            last_commit_date: date.to_string(),
            days_since_last_commit: UNKNOWN_DAYS,
            is_active: false,
            activity_score: 0.0,
        }
    }

    /// Merge another commit by the same author.
    pub fn record_commit(&mut self, date: &str) {
        self.commit_count += 1;
        if self.first_commit_date.is_empty() || date < self.first_commit_date.as_str() {
            self.first_commit_date = date.to_string();
        }
        if self.last_commit_date.is_empty() || date > self.last_commit_date.as_str() {
            self.last_commit_date = date.to_string();
        }
    }

    /// Recompute recency, the active flag and the score relative to `today`.
    pub fn rescore(&mut self, today: NaiveDate) {
        self.days_since_last_commit = days_since(&self.last_commit_date, today);
        self.is_active = is_active(self.days_since_last_commit);
        self.activity_score = activity_score(
            self.commit_count,
            self.days_since_last_commit,
            self.lines_added + self.lines_deleted,
        );
    }
}

impl Rankable for AuthorActivity {
    fn rank_value(&self) -> f64 {
        self.activity_score
    }

    fn rank_name(&self) -> &str {
        &self.name
    }
}

/// Contributor counts over the whole activity collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivitySummary {
    pub total_contributors: usize,
    pub active_contributors: usize,
    pub single_commit_contributors: usize,
}

impl ActivitySummary {
    pub fn from_activity(activity: &[AuthorActivity]) -> Self {
        Self {
            total_contributors: activity.len(),
            active_contributors: activity.iter().filter(|a| a.is_active).count(),
            single_commit_contributors: activity.iter().filter(|a| a.commit_count == 1).count(),
        }
    }
}

/// Days from `date` (`YYYY-MM-DD`) to `today`.
///
/// Future dates clamp to 0; empty or unparsable dates give [`UNKNOWN_DAYS`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use gitstat_history::activity::days_since;
///
/// let today = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
/// assert_eq!(days_since("2024-03-31", today), 1);
/// assert_eq!(days_since("2024-05-01", today), 0);
/// assert_eq!(days_since("yesterday", today), 9999);
/// ```
pub fn days_since(date: &str, today: NaiveDate) -> i64 {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(commit_day) => (today - commit_day).num_days().max(0),
        Err(_) => UNKNOWN_DAYS,
    }
}

/// Whether an author with this recency counts as active (inclusive 90-day window).
pub fn is_active(days_since_last_commit: i64) -> bool {
    days_since_last_commit <= ACTIVE_WINDOW_DAYS
}

/// `commits × (10000 / (days + 1)) × ln(lines_changed + 1)`, or 0 without commits.
///
/// # Examples
///
/// ```
/// use gitstat_history::activity::activity_score;
///
/// // no lines changed → ln(1) = 0
/// assert_eq!(activity_score(10, 0, 0), 0.0);
/// let recent = activity_score(3, 1, 100);
/// let stale = activity_score(3, 400, 100);
/// assert!(recent > stale);
/// ```
pub fn activity_score(commits: u64, days_since_last_commit: i64, lines_changed: u64) -> f64 {
    if commits == 0 {
        return 0.0;
    }
    let recency_factor = 10000.0 / (days_since_last_commit + 1) as f64;
    let lines_factor = (lines_changed as f64 + 1.0).ln();
    commits as f64 * recency_factor * lines_factor
}

/// Fold `<author>|<YYYY-MM-DD>|<subject>` lines into per-author activity.
///
/// # Examples
///
/// ```
/// use gitstat_history::activity::aggregate_commit_log;
///
/// let log = "ada|2023-12-01|b\nada|2023-01-05|a\ngrace|2023-06-01|c\n";
/// let authors = aggregate_commit_log(log, 100);
/// let ada = authors.get("ada").unwrap();
/// assert_eq!(ada.commit_count, 2);
/// assert_eq!(ada.first_commit_date, "2023-01-05");
/// assert_eq!(ada.last_commit_date, "2023-12-01");
/// ```
pub fn aggregate_commit_log(log: &str, capacity: usize) -> CappedMap<AuthorActivity> {
    let mut authors: CappedMap<AuthorActivity> = CappedMap::new(capacity);
    for commit in log.lines().filter_map(parse_commit_line) {
        let seen_before = authors.get(commit.author).is_some();
        let Some(entry) = authors.get_or_insert_with(commit.author, || {
            AuthorActivity::first_seen(commit.author, commit.date)
        }) else {
            continue;
        };
        if seen_before {
            entry.record_commit(commit.date);
        }
    }
    authors
}

/// Score every author against `today` and return them ranked by score.
///
/// Authors with equal scores are ordered by name.
pub fn score_activity(authors: CappedMap<AuthorActivity>, today: NaiveDate) -> Vec<AuthorActivity> {
    let mut activity = authors.into_values();
    for author in &mut activity {
        author.rescore(today);
    }
    rank(activity)
}
