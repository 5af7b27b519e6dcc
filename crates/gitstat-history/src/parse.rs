//! Line-level parsers for the text streams produced by git queries.
//!
//! Every parser returns `None` for a malformed line; callers skip those
//! lines without logging.

/// Extension bucket used for files without a usable extension.
pub const NO_EXTENSION: &str = "no_ext";

/// Parse one `git shortlog -sn` line: `<count>\t<author>`.
///
/// The count is leniently parsed (surrounding whitespace trimmed, an
/// unparsable count reads as 0). A line without a tab is malformed.
///
/// # Examples
///
/// ```
/// use gitstat_history::parse::parse_shortlog_line;
///
/// assert_eq!(parse_shortlog_line("   42\tAda Lovelace"), Some((42, "Ada Lovelace")));
/// assert_eq!(parse_shortlog_line("no tab here"), None);
/// ```
pub fn parse_shortlog_line(line: &str) -> Option<(u64, &str)> {
    let (count, author) = line.split_once('\t')?;
    let count = count.trim().parse().unwrap_or(0);
    Some((count, author.trim_end_matches(['\r', '\n'])))
}

/// A single parsed commit-log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitLine<'a> {
    pub author: &'a str,
    /// `YYYY-MM-DD`, not validated here.
    pub date: &'a str,
}

/// Parse one `<author>|<YYYY-MM-DD>|<subject>` line.
///
/// Author and date must both be present and non-empty. The subject is
/// ignored and may itself contain `|`.
///
/// # Examples
///
/// ```
/// use gitstat_history::parse::parse_commit_line;
///
/// let commit = parse_commit_line("Grace|2024-03-01|fix: a|b").unwrap();
/// assert_eq!(commit.author, "Grace");
/// assert_eq!(commit.date, "2024-03-01");
/// assert!(parse_commit_line("just an author").is_none());
/// ```
pub fn parse_commit_line(line: &str) -> Option<CommitLine<'_>> {
    let mut parts = line.splitn(3, '|');
    let author = parts.next().filter(|s| !s.is_empty())?;
    let date = parts.next().filter(|s| !s.is_empty())?;
    Some(CommitLine { author, date })
}

/// Parse the aggregate stat line `<added> <deleted>`.
///
/// # Examples
///
/// ```
/// use gitstat_history::parse::parse_line_totals;
///
/// assert_eq!(parse_line_totals("120 45\n"), Some((120, 45)));
/// assert_eq!(parse_line_totals("120"), None);
/// ```
pub fn parse_line_totals(line: &str) -> Option<(u64, u64)> {
    let mut fields = line.split_whitespace();
    let added = fields.next()?.parse().ok()?;
    let deleted = fields.next()?.parse().ok()?;
    Some((added, deleted))
}

/// Sum the first two columns of `git log --numstat` output.
///
/// Binary files report `-` in both columns and count as zero, as do blank
/// separator lines.
pub fn sum_numstat(output: &str) -> (u64, u64) {
    output.lines().fold((0, 0), |(added, deleted), line| {
        let mut fields = line.split_whitespace();
        let a = fields.next().and_then(|f| f.parse::<u64>().ok()).unwrap_or(0);
        let d = fields.next().and_then(|f| f.parse::<u64>().ok()).unwrap_or(0);
        (added + a, deleted + d)
    })
}

/// Parse one `git branch` line into a branch name.
///
/// A leading `"* "` (current branch) or two spaces is stripped. Lines
/// shorter than three characters, or that leave an empty name, are
/// discarded.
///
/// # Examples
///
/// ```
/// use gitstat_history::parse::parse_branch_line;
///
/// assert_eq!(parse_branch_line("* main"), Some("main"));
/// assert_eq!(parse_branch_line("  feature/x"), Some("feature/x"));
/// assert_eq!(parse_branch_line("  "), None);
/// ```
pub fn parse_branch_line(line: &str) -> Option<&str> {
    if line.chars().count() < 3 {
        return None;
    }
    let name = line
        .strip_prefix("* ")
        .or_else(|| line.strip_prefix("  "))
        .unwrap_or(line)
        .trim_end_matches(['\r', '\n']);
    (!name.is_empty()).then_some(name)
}

/// Extension of the final path component, or [`NO_EXTENSION`].
///
/// Dotfiles (`.gitignore`), names without a dot, and names ending in a
/// dot all map to the sentinel.
///
/// # Examples
///
/// ```
/// use gitstat_history::parse::file_extension;
///
/// assert_eq!(file_extension("src/lib.rs"), "rs");
/// assert_eq!(file_extension("a.b.c"), "c");
/// assert_eq!(file_extension("README"), "no_ext");
/// assert_eq!(file_extension(".gitignore"), "no_ext");
/// assert_eq!(file_extension("a."), "no_ext");
/// ```
pub fn file_extension(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(0) | None => NO_EXTENSION,
        Some(dot) if dot + 1 == name.len() => NO_EXTENSION,
        Some(dot) => &name[dot + 1..],
    }
}

/// Count newline bytes.
///
/// A final line without a trailing newline is not counted, so
/// `"a\nb"` has one line.
///
/// # Examples
///
/// ```
/// use gitstat_history::parse::count_newlines;
///
/// assert_eq!(count_newlines(b"a\nb\n"), 2);
/// assert_eq!(count_newlines(b"a\nb"), 1);
/// assert_eq!(count_newlines(b""), 0);
/// ```
pub fn count_newlines(bytes: &[u8]) -> u64 {
    memchr::memchr_iter(b'\n', bytes).count() as u64
}
