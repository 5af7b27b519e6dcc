//! Integration test: text and JSON show the same truncated, ranked data.

use gitstat_core::{DisplayLimits, OutputFormat};
use gitstat_history::activity::{aggregate_commit_log, score_activity, ActivitySummary};
use gitstat_history::aggregate::{aggregate_authors, aggregate_files};
use gitstat_history::collect::{Analysis, RepoStats, RepositoryInfo};
use gitstat_history::hotspots::{aggregate_touched_files, score_hotspots};
use gitstat_history::rank::rank;
use serde_json::Value;

fn sample(analysis: Analysis) -> RepoStats {
    let shortlog: String = (0..14).map(|i| format!("{:6}\tauthor{i:02}\n", 30 - i)).collect();
    let inventory = aggregate_files("a.rs\nb.rs\nc.toml\nREADME\n", 50, |_| Some(25));

    RepoStats {
        repository: RepositoryInfo {
            name: "sample".into(),
            current_branch: "main".into(),
        },
        total_commits: 300,
        total_files: inventory.total_files,
        total_lines: inventory.total_lines,
        authors: rank(aggregate_authors(&shortlog, 100).into_values()),
        branches: vec![],
        extensions: rank(inventory.extensions.into_values()),
        analysis,
    }
}

fn render_both(stats: &RepoStats) -> (String, Value) {
    let display = DisplayLimits::default();
    let text = gitstat_report::render(stats, &display, OutputFormat::Text).unwrap();
    let json = gitstat_report::render(stats, &display, OutputFormat::Json).unwrap();
    (text, serde_json::from_str(&json).unwrap())
}

#[test]
fn authors_match_between_formats() {
    let (text, json) = render_both(&sample(Analysis::None));

    let names: Vec<&str> = json["authors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 10);
    for name in &names {
        assert!(text.contains(name), "text report missing {name}");
    }
    assert!(!text.contains("author10"));
    assert!(text.contains("... and 4 more authors"));
    assert_eq!(json["summary"]["total_authors"], 14);
}

#[test]
fn extension_ranking_matches_between_formats() {
    let (text, json) = render_both(&sample(Analysis::None));

    let order: Vec<&str> = json["file_types"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["extension"].as_str().unwrap())
        .collect();
    assert_eq!(order, ["rs", "no_ext", "toml"]);
    assert_eq!(json["file_types"][0]["percentage"], 50.0);

    let rs = text.find("  rs ").unwrap();
    let no_ext = text.find("  no_ext ").unwrap();
    let toml = text.find("  toml ").unwrap();
    assert!(rs < no_ext && no_ext < toml);
    assert!(text.contains("( 50.0%)"));
}

#[test]
fn hotspots_match_between_formats() {
    let listing: String = (0..20)
        .flat_map(|i| std::iter::repeat(format!("f{i:02}.rs\n")).take(i + 1))
        .collect();
    let hotspots = score_hotspots(aggregate_touched_files(&listing, 1000));
    let (text, json) = render_both(&sample(Analysis::Hotspots(hotspots)));

    let shown = json["hotspots"].as_array().unwrap();
    assert_eq!(shown.len(), 15);
    assert_eq!(shown[0]["filename"], "f19.rs");
    assert_eq!(shown[0]["hotspot_score"], 20.0);
    assert!(text.contains("f19.rs"));
    assert!(!text.contains("f04.rs"));
    assert!(text.contains("... and 5 more files"));
}

#[test]
fn activity_summary_matches_between_formats() {
    let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let log = "ada|2024-05-20|x\nada|2024-05-21|y\nbob|2021-01-01|z\n";
    let authors = score_activity(aggregate_commit_log(log, 100), today);
    let summary = ActivitySummary::from_activity(&authors);
    let (text, json) = render_both(&sample(Analysis::Activity { summary, authors }));

    assert_eq!(json["activity_summary"]["total_contributors"], 2);
    assert_eq!(json["activity_summary"]["active_contributors"], 1);
    assert_eq!(json["activity_summary"]["single_commit_contributors"], 1);
    assert!(text.contains("2 total contributors, 1 active"));
    assert_eq!(json["author_activity"][0]["name"], "ada");
    assert_eq!(json["author_activity"][0]["days_since_last_commit"], 11);
    assert!(text.contains("(11 days ago) [ACTIVE]"));
}
