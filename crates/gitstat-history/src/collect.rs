//! One sequential pass over every query, producing ranked statistics.
//!
//! Each query is issued and fully consumed before the next one starts.
//! A failed stream query is logged as a warning and leaves its section
//! empty; a failed per-entity line-total query leaves that entity's line
//! counts at zero.

use chrono::NaiveDate;
use gitstat_core::{AnalysisMode, GitStatConfig, GitStatError};
use tracing::{debug, warn};

use crate::activity::{aggregate_commit_log, score_activity, ActivitySummary, AuthorActivity};
use crate::aggregate::{
    aggregate_authors, aggregate_branches, aggregate_files, AuthorRecord, BranchRecord,
    ExtensionRecord,
};
use crate::hotspots::{aggregate_touched_files, score_hotspots, FileHotspot};
use crate::parse::parse_line_totals;
use crate::rank::rank;
use crate::source::HistorySource;

/// Branch name reported when the current branch cannot be determined.
pub const UNKNOWN_BRANCH: &str = "unknown";

/// Repository identity shown in the report header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryInfo {
    pub name: String,
    pub current_branch: String,
}

/// The optional analysis attached to a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    None,
    /// Files ranked by hotspot score.
    Hotspots(Vec<FileHotspot>),
    /// Authors ranked by activity score, with counts over all of them.
    Activity {
        summary: ActivitySummary,
        authors: Vec<AuthorActivity>,
    },
}

/// Everything one run learned about a repository.
///
/// All collections are already ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct RepoStats {
    pub repository: RepositoryInfo,
    pub total_commits: u64,
    pub total_files: u64,
    pub total_lines: u64,
    pub authors: Vec<AuthorRecord>,
    pub branches: Vec<BranchRecord>,
    pub extensions: Vec<ExtensionRecord>,
    pub analysis: Analysis,
}

impl RepoStats {
    /// Retained authors; capped by `limits.authors`.
    pub fn total_authors(&self) -> usize {
        self.authors.len()
    }

    /// Retained branches; capped by `limits.branches`.
    pub fn total_branches(&self) -> usize {
        self.branches.len()
    }
}

/// Gather statistics for `repo_name` from `source`.
///
/// `today` anchors the activity analysis; a later date yields larger
/// day counts and lower activity scores for the same history.
pub fn collect_stats<S: HistorySource + ?Sized>(
    source: &S,
    repo_name: &str,
    config: &GitStatConfig,
    mode: AnalysisMode,
    today: NaiveDate,
) -> RepoStats {
    let repository = RepositoryInfo {
        name: repo_name.to_string(),
        current_branch: current_branch(source),
    };
    let total_commits = total_commits(source);
    let authors = collect_authors(source, config);
    let branches = collect_branches(source, config);
    let (total_files, total_lines, extensions) = collect_files(source, config);

    let analysis = match mode {
        AnalysisMode::Basic => Analysis::None,
        AnalysisMode::Hotspots => Analysis::Hotspots(collect_hotspots(source, config)),
        AnalysisMode::Activity => {
            let authors = collect_activity(source, config, today);
            Analysis::Activity {
                summary: ActivitySummary::from_activity(&authors),
                authors,
            }
        }
    };

    RepoStats {
        repository,
        total_commits,
        total_files,
        total_lines,
        authors,
        branches,
        extensions,
        analysis,
    }
}

fn current_branch<S: HistorySource + ?Sized>(source: &S) -> String {
    match source.current_branch() {
        Ok(branch) => branch,
        Err(e) => {
            debug!(error = %e, "current branch unavailable");
            UNKNOWN_BRANCH.to_string()
        }
    }
}

fn total_commits<S: HistorySource + ?Sized>(source: &S) -> u64 {
    match source.total_commits() {
        Ok(count) => count.trim().parse().unwrap_or(0),
        Err(e) => {
            warn!(error = %e, "failed to get commit statistics");
            0
        }
    }
}

fn collect_authors<S: HistorySource + ?Sized>(
    source: &S,
    config: &GitStatConfig,
) -> Vec<AuthorRecord> {
    let shortlog = match source.shortlog() {
        Ok(output) => output,
        Err(e) => {
            warn!(error = %e, "failed to get author statistics");
            return Vec::new();
        }
    };

    let mut authors = rank(aggregate_authors(&shortlog, config.limits.authors).into_values());

    // Only the displayed authors get the (one query each) line totals.
    for author in authors.iter_mut().take(config.display.authors) {
        let (added, deleted) = line_totals(source.author_line_totals(&author.name), &author.name);
        author.lines_added = added;
        author.lines_deleted = deleted;
    }

    authors
}

fn collect_branches<S: HistorySource + ?Sized>(
    source: &S,
    config: &GitStatConfig,
) -> Vec<BranchRecord> {
    let listing = match source.branches() {
        Ok(output) => output,
        Err(e) => {
            warn!(error = %e, "failed to get branch statistics");
            return Vec::new();
        }
    };

    let mut branches = aggregate_branches(&listing, config.limits.branches);
    for branch in branches.values_mut() {
        match source.branch_commit_count(&branch.name) {
            Ok(count) => branch.commit_count = count.trim().parse().unwrap_or(0),
            Err(e) => debug!(branch = %branch.name, error = %e, "branch commit count unavailable"),
        }
    }

    rank(branches.into_values())
}

fn collect_files<S: HistorySource + ?Sized>(
    source: &S,
    config: &GitStatConfig,
) -> (u64, u64, Vec<ExtensionRecord>) {
    let listing = match source.tracked_files() {
        Ok(output) => output,
        Err(e) => {
            warn!(error = %e, "failed to get file statistics");
            return (0, 0, Vec::new());
        }
    };

    let inventory = aggregate_files(&listing, config.limits.extensions, |path| {
        source.count_lines(path)
    });
    (
        inventory.total_files,
        inventory.total_lines,
        rank(inventory.extensions.into_values()),
    )
}

fn collect_hotspots<S: HistorySource + ?Sized>(
    source: &S,
    config: &GitStatConfig,
) -> Vec<FileHotspot> {
    let listing = match source.touched_files() {
        Ok(output) => output,
        Err(e) => {
            warn!(error = %e, "failed to get hotspot statistics");
            return Vec::new();
        }
    };

    let mut files = aggregate_touched_files(&listing, config.limits.files);
    for file in files.values_mut() {
        let (added, deleted) = line_totals(source.file_line_totals(&file.path), &file.path);
        file.lines_added = added;
        file.lines_deleted = deleted;
    }

    score_hotspots(files)
}

fn collect_activity<S: HistorySource + ?Sized>(
    source: &S,
    config: &GitStatConfig,
    today: NaiveDate,
) -> Vec<AuthorActivity> {
    let log = match source.commit_log() {
        Ok(output) => output,
        Err(e) => {
            warn!(error = %e, "failed to get activity statistics");
            return Vec::new();
        }
    };

    let mut authors = aggregate_commit_log(&log, config.limits.authors);
    for author in authors.values_mut() {
        let (added, deleted) = line_totals(source.author_line_totals(&author.name), &author.name);
        author.lines_added = added;
        author.lines_deleted = deleted;
    }

    score_activity(authors, today)
}

fn line_totals(result: Result<String, GitStatError>, subject: &str) -> (u64, u64) {
    match result {
        Ok(line) => parse_line_totals(&line).unwrap_or((0, 0)),
        Err(e) => {
            debug!(subject, error = %e, "line totals unavailable");
            (0, 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// Canned query output; any query without a canned answer fails.
    #[derive(Default)]
    struct FakeSource {
        streams: HashMap<&'static str, String>,
        line_totals: HashMap<String, String>,
        branch_counts: HashMap<String, String>,
        file_lines: HashMap<String, u64>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeSource {
        fn with(mut self, query: &'static str, output: &str) -> Self {
            self.streams.insert(query, output.to_string());
            self
        }

        fn stream(&self, query: &'static str) -> Result<String, GitStatError> {
            self.calls.borrow_mut().push(query.to_string());
            self.streams
                .get(query)
                .cloned()
                .ok_or_else(|| GitStatError::Git(format!("{query} unavailable")))
        }
    }

    impl HistorySource for FakeSource {
        fn current_branch(&self) -> Result<String, GitStatError> {
            self.stream("current_branch")
        }
        fn total_commits(&self) -> Result<String, GitStatError> {
            self.stream("total_commits")
        }
        fn shortlog(&self) -> Result<String, GitStatError> {
            self.stream("shortlog")
        }
        fn author_line_totals(&self, author: &str) -> Result<String, GitStatError> {
            self.calls.borrow_mut().push(format!("lines:{author}"));
            self.line_totals
                .get(author)
                .cloned()
                .ok_or_else(|| GitStatError::Git("no totals".into()))
        }
        fn branches(&self) -> Result<String, GitStatError> {
            self.stream("branches")
        }
        fn branch_commit_count(&self, branch: &str) -> Result<String, GitStatError> {
            self.branch_counts
                .get(branch)
                .cloned()
                .ok_or_else(|| GitStatError::Git("no count".into()))
        }
        fn tracked_files(&self) -> Result<String, GitStatError> {
            self.stream("tracked_files")
        }
        fn touched_files(&self) -> Result<String, GitStatError> {
            self.stream("touched_files")
        }
        fn file_line_totals(&self, path: &str) -> Result<String, GitStatError> {
            self.line_totals
                .get(path)
                .cloned()
                .ok_or_else(|| GitStatError::Git("no totals".into()))
        }
        fn commit_log(&self) -> Result<String, GitStatError> {
            self.stream("commit_log")
        }
        fn count_lines(&self, path: &str) -> Option<u64> {
            self.file_lines.get(path).copied()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn sample_source() -> FakeSource {
        let mut source = FakeSource::default()
            .with("current_branch", "main")
            .with("total_commits", "42\n")
            .with("shortlog", "    30\tAda\n    12\tGrace\n")
            .with("branches", "  feature\n* main\n")
            .with("tracked_files", "src/lib.rs\nsrc/main.rs\nREADME\n.gitignore\n")
            .with("touched_files", "src/lib.rs\nREADME\n\nsrc/lib.rs\n\nsrc/lib.rs\n")
            .with(
                "commit_log",
                "Ada|2024-05-30|feat\nGrace|2023-01-01|init\nAda|2024-01-10|fix\n",
            );
        source.line_totals.insert("Ada".into(), "100 20".into());
        source.line_totals.insert("Grace".into(), "5 5".into());
        source.line_totals.insert("src/lib.rs".into(), "60 3".into());
        source.branch_counts.insert("main".into(), "42".into());
        source.branch_counts.insert("feature".into(), "44".into());
        source.file_lines.insert("src/lib.rs".into(), 80);
        source.file_lines.insert("src/main.rs".into(), 20);
        source.file_lines.insert("README".into(), 10);
        source
    }

    #[test]
    fn basic_run_fills_overview() {
        let stats = collect_stats(
            &sample_source(),
            "demo",
            &GitStatConfig::default(),
            AnalysisMode::Basic,
            today(),
        );

        assert_eq!(stats.repository.name, "demo");
        assert_eq!(stats.repository.current_branch, "main");
        assert_eq!(stats.total_commits, 42);
        assert_eq!(stats.total_authors(), 2);
        assert_eq!(stats.authors[0].name, "Ada");
        assert_eq!(stats.authors[0].lines_added, 100);
        assert_eq!(stats.branches[0].name, "feature");
        assert_eq!(stats.branches[0].commit_count, 44);
        assert_eq!(stats.total_files, 4);
        assert_eq!(stats.total_lines, 110);
        assert_eq!(stats.extensions[0].extension, "no_ext");
        assert_eq!(stats.extensions[0].file_count, 2);
        assert_eq!(stats.analysis, Analysis::None);
    }

    #[test]
    fn hotspot_run_scores_touched_files() {
        let stats = collect_stats(
            &sample_source(),
            "demo",
            &GitStatConfig::default(),
            AnalysisMode::Hotspots,
            today(),
        );

        let Analysis::Hotspots(hotspots) = &stats.analysis else {
            panic!("expected hotspot analysis");
        };
        assert_eq!(hotspots.len(), 2);
        assert_eq!(hotspots[0].path, "src/lib.rs");
        assert_eq!(hotspots[0].commit_count, 3);
        assert!((hotspots[0].score - 3.0 * 64f64.sqrt()).abs() < 1e-9);
        // no canned totals for README: degrades to zero churn
        assert_eq!(hotspots[1].lines_added, 0);
        assert_eq!(hotspots[1].score, 1.0);
    }

    #[test]
    fn activity_run_scores_against_today() {
        let stats = collect_stats(
            &sample_source(),
            "demo",
            &GitStatConfig::default(),
            AnalysisMode::Activity,
            today(),
        );

        let Analysis::Activity { summary, authors } = &stats.analysis else {
            panic!("expected activity analysis");
        };
        assert_eq!(summary.total_contributors, 2);
        assert_eq!(summary.active_contributors, 1);
        assert_eq!(summary.single_commit_contributors, 1);

        let ada = &authors[0];
        assert_eq!(ada.name, "Ada");
        assert_eq!(ada.first_commit_date, "2024-01-10");
        assert_eq!(ada.last_commit_date, "2024-05-30");
        assert_eq!(ada.days_since_last_commit, 2);
        assert!(ada.is_active);
        assert!(!authors[1].is_active);
    }

    #[test]
    fn failed_queries_degrade_to_empty_sections() {
        let source = FakeSource::default();
        let stats = collect_stats(
            &source,
            "empty",
            &GitStatConfig::default(),
            AnalysisMode::Hotspots,
            today(),
        );

        assert_eq!(stats.repository.current_branch, UNKNOWN_BRANCH);
        assert_eq!(stats.total_commits, 0);
        assert!(stats.authors.is_empty());
        assert!(stats.branches.is_empty());
        assert!(stats.extensions.is_empty());
        assert_eq!(stats.analysis, Analysis::Hotspots(Vec::new()));
    }

    #[test]
    fn author_line_totals_only_for_displayed_authors() {
        let mut config = GitStatConfig::default();
        config.display.authors = 1;
        let source = sample_source();
        let stats = collect_stats(&source, "demo", &config, AnalysisMode::Basic, today());

        let calls = source.calls.borrow();
        assert!(calls.contains(&"lines:Ada".to_string()));
        assert!(!calls.contains(&"lines:Grace".to_string()));
        assert_eq!(stats.authors[1].lines_added, 0);
    }

    #[test]
    fn queries_run_in_fixed_order() {
        let source = sample_source();
        collect_stats(
            &source,
            "demo",
            &GitStatConfig::default(),
            AnalysisMode::Activity,
            today(),
        );
        let streams: Vec<String> = source
            .calls
            .borrow()
            .iter()
            .filter(|c| !c.starts_with("lines:"))
            .cloned()
            .collect();
        assert_eq!(
            streams,
            vec![
                "current_branch",
                "total_commits",
                "shortlog",
                "branches",
                "tracked_files",
                "commit_log"
            ]
        );
    }
}
