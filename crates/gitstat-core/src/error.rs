use std::path::PathBuf;

/// Errors that can occur while gathering or rendering repository statistics.
///
/// Library crates return this type directly; the binary renders it as a
/// [`miette`] report and maps it to a process exit code.
///
/// # Examples
///
/// ```
/// use gitstat_core::GitStatError;
///
/// let err = GitStatError::Config("display.hotspots must be positive".into());
/// assert!(err.to_string().contains("display.hotspots"));
/// ```
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum GitStatError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The `git` process could not be started.
    #[error("git error: {0}")]
    Git(String),

    /// A query ran but produced no usable output.
    #[error("`{command}` failed: {message}")]
    Query {
        /// The git subcommand line that was run.
        command: String,
        /// Captured stderr, exit status or a short description.
        message: String,
    },

    /// JSON serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The working directory is not inside a git repository.
    #[error("not a git repository (or any of the parent directories): {}", .0.display())]
    #[diagnostic(help("run gitstat from within a git repository"))]
    NotARepository(PathBuf),
}

impl GitStatError {
    /// Process exit code for this error.
    ///
    /// Only the repository precondition has a dedicated code; everything
    /// else is a general failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitstat_core::GitStatError;
    /// use std::path::PathBuf;
    ///
    /// assert_eq!(GitStatError::NotARepository(PathBuf::from("/tmp")).exit_code(), 2);
    /// assert_eq!(GitStatError::Config("bad".into()).exit_code(), 1);
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            GitStatError::NotARepository(_) => 2,
            _ => 1,
        }
    }
}
