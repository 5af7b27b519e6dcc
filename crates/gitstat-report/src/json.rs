use gitstat_core::{DisplayLimits, GitStatError};
use gitstat_history::collect::{Analysis, RepoStats};
use gitstat_history::rank::top_k;
use serde::{Serialize, Serializer};

/// Top-level document. Field order is the output key order.
#[derive(Debug, Serialize)]
struct ReportOutput<'a> {
    repository: RepositoryOutput<'a>,
    summary: SummaryOutput,
    authors: Vec<AuthorOutput<'a>>,
    file_types: Vec<FileTypeOutput<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hotspots: Option<Vec<HotspotOutput<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    activity_summary: Option<ActivitySummaryOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author_activity: Option<Vec<AuthorActivityOutput<'a>>>,
}

#[derive(Debug, Serialize)]
struct RepositoryOutput<'a> {
    name: &'a str,
    current_branch: &'a str,
}

#[derive(Debug, Serialize)]
struct SummaryOutput {
    total_commits: u64,
    total_authors: usize,
    total_branches: usize,
    total_files: u64,
    total_lines: u64,
}

#[derive(Debug, Serialize)]
struct AuthorOutput<'a> {
    name: &'a str,
    commits: u64,
    lines_added: u64,
    lines_deleted: u64,
}

#[derive(Debug, Serialize)]
struct FileTypeOutput<'a> {
    extension: &'a str,
    files: u64,
    lines: u64,
    #[serde(serialize_with = "one_decimal")]
    percentage: f64,
}

#[derive(Debug, Serialize)]
struct HotspotOutput<'a> {
    filename: &'a str,
    commits: u64,
    lines_added: u64,
    lines_deleted: u64,
    #[serde(serialize_with = "one_decimal")]
    hotspot_score: f64,
}

#[derive(Debug, Serialize)]
struct ActivitySummaryOutput {
    total_contributors: usize,
    active_contributors: usize,
    single_commit_contributors: usize,
}

#[derive(Debug, Serialize)]
struct AuthorActivityOutput<'a> {
    name: &'a str,
    commits: u64,
    lines_added: u64,
    lines_deleted: u64,
    first_commit_date: &'a str,
    last_commit_date: &'a str,
    days_since_last_commit: i64,
    is_active: bool,
    #[serde(serialize_with = "one_decimal")]
    activity_score: f64,
}

/// Scores and percentages are printed rounded to one decimal place.
fn one_decimal<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 10.0).round() / 10.0)
}

/// Render `stats` as a pretty-printed JSON object.
///
/// Lists are truncated to the same display limits as the text report.
///
/// # Errors
///
/// Returns [`GitStatError::Serialization`] if serialization fails.
///
/// # Examples
///
/// ```
/// use gitstat_core::DisplayLimits;
/// use gitstat_history::collect::{Analysis, RepoStats, RepositoryInfo};
/// use gitstat_report::json::format_json;
///
/// let stats = RepoStats {
///     repository: RepositoryInfo { name: "demo".into(), current_branch: "main".into() },
///     total_commits: 0,
///     total_files: 0,
///     total_lines: 0,
///     authors: vec![],
///     branches: vec![],
///     extensions: vec![],
///     analysis: Analysis::None,
/// };
/// let json = format_json(&stats, &DisplayLimits::default()).unwrap();
/// assert!(json.starts_with("{\n  \"repository\""));
/// assert!(!json.contains("hotspots"));
/// ```
pub fn format_json(stats: &RepoStats, display: &DisplayLimits) -> Result<String, GitStatError> {
    let authors = top_k(&stats.authors, display.authors)
        .shown
        .iter()
        .map(|a| AuthorOutput {
            name: &a.name,
            commits: a.commit_count,
            lines_added: a.lines_added,
            lines_deleted: a.lines_deleted,
        })
        .collect();

    let file_types = top_k(&stats.extensions, display.extensions)
        .shown
        .iter()
        .map(|e| FileTypeOutput {
            extension: &e.extension,
            files: e.file_count,
            lines: e.total_lines,
            percentage: e.percentage_of(stats.total_lines),
        })
        .collect();

    let mut output = ReportOutput {
        repository: RepositoryOutput {
            name: &stats.repository.name,
            current_branch: &stats.repository.current_branch,
        },
        summary: SummaryOutput {
            total_commits: stats.total_commits,
            total_authors: stats.total_authors(),
            total_branches: stats.total_branches(),
            total_files: stats.total_files,
            total_lines: stats.total_lines,
        },
        authors,
        file_types,
        hotspots: None,
        activity_summary: None,
        author_activity: None,
    };

    match &stats.analysis {
        Analysis::None => {}
        Analysis::Hotspots(hotspots) => {
            output.hotspots = Some(
                top_k(hotspots, display.hotspots)
                    .shown
                    .iter()
                    .map(|h| HotspotOutput {
                        filename: &h.path,
                        commits: h.commit_count,
                        lines_added: h.lines_added,
                        lines_deleted: h.lines_deleted,
                        hotspot_score: h.score,
                    })
                    .collect(),
            );
        }
        Analysis::Activity { summary, authors } => {
            output.activity_summary = Some(ActivitySummaryOutput {
                total_contributors: summary.total_contributors,
                active_contributors: summary.active_contributors,
                single_commit_contributors: summary.single_commit_contributors,
            });
            output.author_activity = Some(
                top_k(authors, display.activity)
                    .shown
                    .iter()
                    .map(|a| AuthorActivityOutput {
                        name: &a.name,
                        commits: a.commit_count,
                        lines_added: a.lines_added,
                        lines_deleted: a.lines_deleted,
                        first_commit_date: &a.first_commit_date,
                        last_commit_date: &a.last_commit_date,
                        days_since_last_commit: a.days_since_last_commit,
                        is_active: a.is_active,
                        activity_score: a.activity_score,
                    })
                    .collect(),
            );
        }
    }

    serde_json::to_string_pretty(&output).map_err(GitStatError::from)
}

#[cfg(test)]
mod tests {
    use gitstat_history::activity::{ActivitySummary, AuthorActivity};
    use gitstat_history::aggregate::{AuthorRecord, ExtensionRecord};
    use gitstat_history::collect::RepositoryInfo;
    use gitstat_history::hotspots::FileHotspot;
    use serde_json::Value;

    use super::*;

    fn stats(analysis: Analysis) -> RepoStats {
        RepoStats {
            repository: RepositoryInfo {
                name: "say \"hi\"".into(),
                current_branch: "main".into(),
            },
            total_commits: 7,
            total_files: 3,
            total_lines: 3,
            authors: (0..12)
                .map(|i| {
                    let mut a = AuthorRecord::new(&format!("dev{i:02}"));
                    a.commit_count = 20 - i;
                    a
                })
                .collect(),
            branches: vec![],
            extensions: vec![ExtensionRecord {
                extension: "rs".into(),
                file_count: 3,
                total_lines: 1,
            }],
            analysis,
        }
    }

    fn parse(stats: &RepoStats) -> Value {
        let json = format_json(stats, &DisplayLimits::default()).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    fn assert_key_order(json: &str, keys: &[&str]) {
        let positions: Vec<usize> = keys
            .iter()
            .map(|key| {
                json.find(&format!("\n  \"{key}\":"))
                    .unwrap_or_else(|| panic!("missing top-level key {key}"))
            })
            .collect();
        assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "keys out of order: {keys:?}"
        );
    }

    #[test]
    fn top_level_keys_in_fixed_order() {
        let display = DisplayLimits::default();
        let base = ["repository", "summary", "authors", "file_types"];

        let json = format_json(&stats(Analysis::None), &display).unwrap();
        assert_key_order(&json, &base);

        let json = format_json(&stats(Analysis::Hotspots(vec![])), &display).unwrap();
        assert_key_order(&json, &[&base[..], &["hotspots"][..]].concat());

        let activity = Analysis::Activity {
            summary: ActivitySummary::default(),
            authors: vec![],
        };
        let json = format_json(&stats(activity), &display).unwrap();
        assert_key_order(
            &json,
            &[&base[..], &["activity_summary", "author_activity"][..]].concat(),
        );
    }

    #[test]
    fn strings_are_escaped() {
        let value = parse(&stats(Analysis::None));
        assert_eq!(value["repository"]["name"], "say \"hi\"");
    }

    #[test]
    fn authors_truncated_but_summary_counts_all() {
        let value = parse(&stats(Analysis::None));
        assert_eq!(value["authors"].as_array().unwrap().len(), 10);
        assert_eq!(value["summary"]["total_authors"], 12);
        assert_eq!(value["authors"][0]["name"], "dev00");
        assert_eq!(value["authors"][0]["commits"], 20);
    }

    #[test]
    fn percentage_rounded_to_one_decimal() {
        let value = parse(&stats(Analysis::None));
        // 1 of 3 lines
        assert_eq!(value["file_types"][0]["percentage"], 33.3);
        assert_eq!(value["file_types"][0]["files"], 3);
    }

    #[test]
    fn hotspot_section_present_only_in_hotspot_mode() {
        let mut h = FileHotspot::new("a.rs");
        h.commit_count = 2;
        h.lines_added = 1;
        h.rescore();
        let value = parse(&stats(Analysis::Hotspots(vec![h])));
        assert_eq!(value["hotspots"][0]["filename"], "a.rs");
        assert_eq!(value["hotspots"][0]["hotspot_score"], 2.8);
        assert!(value.get("activity_summary").is_none());
    }

    #[test]
    fn activity_section_has_summary_and_booleans() {
        let mut a = AuthorActivity::first_seen("ada", "2024-01-01");
        a.days_since_last_commit = 3;
        a.is_active = true;
        a.activity_score = 1234.5678;
        let authors = vec![a];
        let summary = ActivitySummary::from_activity(&authors);

        let value = parse(&stats(Analysis::Activity { summary, authors }));
        assert_eq!(value["activity_summary"]["total_contributors"], 1);
        assert_eq!(value["activity_summary"]["active_contributors"], 1);
        assert_eq!(value["author_activity"][0]["is_active"], true);
        assert_eq!(value["author_activity"][0]["activity_score"], 1234.6);
        assert!(value.get("hotspots").is_none());
    }

    #[test]
    fn empty_hotspots_serialize_as_empty_array() {
        let value = parse(&stats(Analysis::Hotspots(vec![])));
        assert_eq!(value["hotspots"], Value::Array(vec![]));
    }
}
