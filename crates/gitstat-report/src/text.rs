//! Human-readable multi-section report.

use std::fmt::Write;

use gitstat_core::DisplayLimits;
use gitstat_history::activity::{ActivitySummary, AuthorActivity, ACTIVE_WINDOW_DAYS};
use gitstat_history::collect::{Analysis, RepoStats};
use gitstat_history::hotspots::FileHotspot;
use gitstat_history::rank::top_k;

const PROGRAM_NAME: &str = "Git Statistics Utility";
const RULE: &str = "==========================================";

/// Render `stats` as the plain-text report.
///
/// Sections appear in a fixed order, each followed by a blank line. Every
/// list is cut to its display limit and closes with `... and N more`
/// when entries were left out.
///
/// # Examples
///
/// ```
/// use gitstat_core::DisplayLimits;
/// use gitstat_history::collect::{Analysis, RepoStats, RepositoryInfo};
/// use gitstat_report::text::format_text;
///
/// let stats = RepoStats {
///     repository: RepositoryInfo { name: "demo".into(), current_branch: "main".into() },
///     total_commits: 0,
///     total_files: 0,
///     total_lines: 0,
///     authors: vec![],
///     branches: vec![],
///     extensions: vec![],
///     analysis: Analysis::Hotspots(vec![]),
/// };
/// let text = format_text(&stats, &DisplayLimits::default());
/// assert!(text.contains("Repository Statistics for: demo"));
/// assert!(text.contains("No hotspots found."));
/// ```
pub fn format_text(stats: &RepoStats, display: &DisplayLimits) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{PROGRAM_NAME} v{}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(out, "============================");
    let _ = writeln!(out);
    let _ = writeln!(out, "Repository Statistics for: {}", stats.repository.name);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out);

    write_general(&mut out, stats);
    write_authors(&mut out, stats, display.authors);
    write_branches(&mut out, stats, display.branches);
    write_extensions(&mut out, stats, display.extensions);

    match &stats.analysis {
        Analysis::None => {}
        Analysis::Hotspots(hotspots) => write_hotspots(&mut out, hotspots, display.hotspots),
        Analysis::Activity { summary, authors } => {
            write_activity(&mut out, summary, authors, display.activity)
        }
    }

    out
}

fn write_general(out: &mut String, stats: &RepoStats) {
    let _ = writeln!(out, "📊 General Information:");
    let _ = writeln!(out, "  Current Branch: {}", stats.repository.current_branch);
    let _ = writeln!(out, "  Total Commits: {}", stats.total_commits);
    let _ = writeln!(out, "  Total Authors: {}", stats.total_authors());
    let _ = writeln!(out, "  Total Branches: {}", stats.total_branches());
    let _ = writeln!(out, "  Total Files: {}", stats.total_files);
    let _ = writeln!(out, "  Total Lines of Code: {}", stats.total_lines);
    let _ = writeln!(out);
}

fn write_authors(out: &mut String, stats: &RepoStats, limit: usize) {
    let _ = writeln!(out, "👥 Top Contributors:");
    let view = top_k(&stats.authors, limit);
    for (i, author) in view.shown.iter().enumerate() {
        let _ = write!(
            out,
            "  {:2}. {:<30} {:4} commits",
            i + 1,
            author.name,
            author.commit_count
        );
        if author.churn() > 0 {
            let _ = write!(
                out,
                " (+{}/-{} lines)",
                author.lines_added, author.lines_deleted
            );
        }
        let _ = writeln!(out);
    }
    write_remainder(out, view.omitted, "authors");
    let _ = writeln!(out);
}

fn write_branches(out: &mut String, stats: &RepoStats, limit: usize) {
    let _ = writeln!(out, "🌿 Branches:");
    let view = top_k(&stats.branches, limit);
    for branch in view.shown {
        let _ = writeln!(out, "  {:<20} {:4} commits", branch.name, branch.commit_count);
    }
    write_remainder(out, view.omitted, "branches");
    let _ = writeln!(out);
}

fn write_extensions(out: &mut String, stats: &RepoStats, limit: usize) {
    let _ = writeln!(out, "📁 File Types:");
    let view = top_k(&stats.extensions, limit);
    for ext in view.shown {
        let _ = writeln!(
            out,
            "  {:<10} {:4} files, {:8} lines ({:5.1}%)",
            ext.extension,
            ext.file_count,
            ext.total_lines,
            ext.percentage_of(stats.total_lines)
        );
    }
    write_remainder(out, view.omitted, "file types");
    let _ = writeln!(out);
}

fn write_hotspots(out: &mut String, hotspots: &[FileHotspot], limit: usize) {
    let _ = writeln!(out, "🔥 Hotspot Analysis (Files with High Churn):");
    if hotspots.is_empty() {
        let _ = writeln!(out, "  No hotspots found.");
        let _ = writeln!(out);
        return;
    }

    let view = top_k(hotspots, limit);
    for (i, h) in view.shown.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:2}. {:<40} {:3} commits, +{}/-{} lines (score: {:.1})",
            i + 1,
            h.path,
            h.commit_count,
            h.lines_added,
            h.lines_deleted,
            h.score
        );
    }
    write_remainder(out, view.omitted, "files");

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  📊 Hotspot Score = commits × √(lines_added + lines_deleted + 1)"
    );
    let _ = writeln!(
        out,
        "  💡 High scores indicate files that change frequently with significant modifications"
    );
    let _ = writeln!(out);
}

fn write_activity(
    out: &mut String,
    summary: &ActivitySummary,
    authors: &[AuthorActivity],
    limit: usize,
) {
    let _ = writeln!(out, "📈 Author Activity Analysis:");
    if authors.is_empty() {
        let _ = writeln!(out, "  No activity data found.");
        let _ = writeln!(out);
        return;
    }

    let _ = writeln!(
        out,
        "  📊 Summary: {} total contributors, {} active (<= {} days), {} single-commit",
        summary.total_contributors,
        summary.active_contributors,
        ACTIVE_WINDOW_DAYS,
        summary.single_commit_contributors
    );
    let _ = writeln!(out);

    let view = top_k(authors, limit);
    let _ = writeln!(out, "  🏆 Top Contributors by Activity:");
    for (i, a) in view.shown.iter().enumerate() {
        let status = if a.is_active { "ACTIVE" } else { "INACTIVE" };
        let _ = writeln!(
            out,
            "  {:2}. {:<25} {:3} commits, last: {} ({} days ago) [{status}]",
            i + 1,
            a.name,
            a.commit_count,
            a.last_commit_date,
            a.days_since_last_commit
        );
    }
    write_remainder(out, view.omitted, "contributors");

    let _ = writeln!(out);
    let _ = writeln!(out, "  📅 Activity Details:");
    for a in view.shown {
        let _ = writeln!(
            out,
            "      {}: {} → {} ({} commits, +{}/-{} lines, score: {:.1})",
            a.name,
            a.first_commit_date,
            a.last_commit_date,
            a.commit_count,
            a.lines_added,
            a.lines_deleted,
            a.activity_score
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  💡 Activity Score = commits × (10000 / (days_since_last + 1)) × log(lines + 1)"
    );
    let _ = writeln!(
        out,
        "  ✨ Higher scores indicate recent, frequent, and substantial contributors"
    );
    let _ = writeln!(out);
}

fn write_remainder(out: &mut String, omitted: usize, noun: &str) {
    if omitted > 0 {
        let _ = writeln!(out, "  ... and {omitted} more {noun}");
    }
}
