//! Raw text streams from the version-control tool.
//!
//! [`HistorySource`] is the seam between the aggregation engine and git.
//! [`GitCli`] implements it by running the `git` binary, one query at a
//! time, and handing back stdout untouched (or, for the numstat queries,
//! summed into a single `<added> <deleted>` line).

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use gitstat_core::GitStatError;
use tracing::debug;

use crate::parse::{count_newlines, sum_numstat};

/// Supplier of the text streams the aggregator consumes.
///
/// Stream methods return the full query output. Single-value methods
/// return one trimmed line and fail on empty output.
pub trait HistorySource {
    /// Name of the checked-out branch.
    fn current_branch(&self) -> Result<String, GitStatError>;
    /// Number of commits reachable from any ref.
    fn total_commits(&self) -> Result<String, GitStatError>;
    /// `<count>\t<author>` lines.
    fn shortlog(&self) -> Result<String, GitStatError>;
    /// `<added> <deleted>` summed over the author's commits.
    fn author_line_totals(&self, author: &str) -> Result<String, GitStatError>;
    /// Local branch listing, current branch marked with `* `.
    fn branches(&self) -> Result<String, GitStatError>;
    /// Number of commits reachable from `branch`.
    fn branch_commit_count(&self, branch: &str) -> Result<String, GitStatError>;
    /// One tracked path per line.
    fn tracked_files(&self) -> Result<String, GitStatError>;
    /// One line per (commit, touched path), blank lines between commits.
    fn touched_files(&self) -> Result<String, GitStatError>;
    /// `<added> <deleted>` summed over the file's history.
    fn file_line_totals(&self, path: &str) -> Result<String, GitStatError>;
    /// `<author>|<YYYY-MM-DD>|<subject>` lines.
    fn commit_log(&self) -> Result<String, GitStatError>;
    /// Newline count of a working-tree file, `None` if it cannot be read.
    fn count_lines(&self, path: &str) -> Option<u64>;
}

/// [`HistorySource`] backed by the `git` command-line tool.
///
/// # Examples
///
/// ```no_run
/// use gitstat_history::source::{GitCli, HistorySource};
///
/// let git = GitCli::new(".");
/// let shortlog = git.shortlog().unwrap();
/// for line in shortlog.lines().take(3) {
///     println!("{line}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Run queries with `workdir` as the current directory.
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn run(&self, args: &[&str]) -> Result<String, GitStatError> {
        let command = format!("git {}", args.join(" "));
        debug!(%command, "running git query");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| GitStatError::Git(format!("failed to run `{command}`: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("exited with {}", output.status),
                trimmed => trimmed.to_string(),
            };
            return Err(GitStatError::Query { command, message });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run_single_line(&self, args: &[&str]) -> Result<String, GitStatError> {
        let output = self.run(args)?;
        match output.lines().next().map(str::trim) {
            Some(line) if !line.is_empty() => Ok(line.to_string()),
            _ => Err(GitStatError::Query {
                command: format!("git {}", args.join(" ")),
                message: "empty output".into(),
            }),
        }
    }

    fn run_line_totals(&self, args: &[&str]) -> Result<String, GitStatError> {
        let (added, deleted) = sum_numstat(&self.run(args)?);
        Ok(format!("{added} {deleted}"))
    }
}

impl HistorySource for GitCli {
    fn current_branch(&self) -> Result<String, GitStatError> {
        self.run_single_line(&["branch", "--show-current"])
    }

    fn total_commits(&self) -> Result<String, GitStatError> {
        self.run_single_line(&["rev-list", "--all", "--count"])
    }

    fn shortlog(&self) -> Result<String, GitStatError> {
        self.run(&["shortlog", "-sn", "--all"])
    }

    fn author_line_totals(&self, author: &str) -> Result<String, GitStatError> {
        let author = format!("--author={author}");
        self.run_line_totals(&[
            "log",
            &author,
            "--fixed-strings",
            "--pretty=tformat:",
            "--numstat",
        ])
    }

    fn branches(&self) -> Result<String, GitStatError> {
        self.run(&["branch"])
    }

    fn branch_commit_count(&self, branch: &str) -> Result<String, GitStatError> {
        self.run_single_line(&["rev-list", "--count", branch, "--"])
    }

    fn tracked_files(&self) -> Result<String, GitStatError> {
        self.run(&["ls-files"])
    }

    fn touched_files(&self) -> Result<String, GitStatError> {
        self.run(&["log", "--name-only", "--pretty=format:"])
    }

    fn file_line_totals(&self, path: &str) -> Result<String, GitStatError> {
        self.run_line_totals(&["log", "--numstat", "--pretty=format:", "--", path])
    }

    fn commit_log(&self) -> Result<String, GitStatError> {
        self.run(&["log", "--pretty=format:%an|%ad|%s", "--date=short", "--all"])
    }

    fn count_lines(&self, path: &str) -> Option<u64> {
        match std::fs::read(self.workdir.join(path)) {
            Ok(bytes) => Some(count_newlines(&bytes)),
            Err(e) => {
                debug!(path, error = %e, "cannot read tracked file");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_lines_reads_relative_to_workdir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("three.txt"), "a\nb\nc\n").unwrap();
        std::fs::write(dir.path().join("partial.txt"), "a\nb").unwrap();

        let git = GitCli::new(dir.path());
        assert_eq!(git.count_lines("three.txt"), Some(3));
        assert_eq!(git.count_lines("partial.txt"), Some(1));
        assert_eq!(git.count_lines("missing.txt"), None);
    }

    #[test]
    fn query_outside_repository_fails() {
        let dir = tempfile::tempdir().unwrap();
        let git = GitCli::new(dir.path().join("does-not-exist"));
        assert!(git.shortlog().is_err());
    }
}
