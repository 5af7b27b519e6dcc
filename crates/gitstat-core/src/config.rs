use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GitStatError;

/// Top-level configuration loaded from `.gitstat.toml`.
///
/// Every section is optional; omitted keys fall back to the defaults below.
///
/// # Examples
///
/// ```
/// use gitstat_core::GitStatConfig;
///
/// let config = GitStatConfig::default();
/// assert_eq!(config.limits.authors, 100);
/// assert_eq!(config.display.hotspots, 15);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitStatConfig {
    /// Capacity caps for the aggregated collections.
    #[serde(default)]
    pub limits: CapacityLimits,
    /// How many entries each report section shows.
    #[serde(default)]
    pub display: DisplayLimits,
}

impl GitStatConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GitStatError::Io`] if the file cannot be read,
    /// [`GitStatError::Toml`] if it is not valid TOML, or
    /// [`GitStatError::Config`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, GitStatError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`GitStatError::Toml`] if parsing fails, or
    /// [`GitStatError::Config`] if a display limit is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitstat_core::GitStatConfig;
    ///
    /// let toml = r#"
    /// [limits]
    /// files = 5000
    /// "#;
    /// let config = GitStatConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.limits.files, 5000);
    /// assert_eq!(config.limits.branches, 50);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, GitStatError> {
        let config: Self = toml::from_str(content)?;
        config.display.validate()?;
        Ok(config)
    }
}

/// Maximum number of distinct keys each collection retains.
///
/// Once a collection is full, new keys are dropped silently while keys
/// already present keep accumulating. The reported totals count retained
/// entries only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityLimits {
    /// Authors, for both the contributor list and the activity analysis (default: 100).
    #[serde(default = "default_author_cap")]
    pub authors: usize,
    /// Local branches (default: 50).
    #[serde(default = "default_branch_cap")]
    pub branches: usize,
    /// Extension buckets (default: 50).
    #[serde(default = "default_extension_cap")]
    pub extensions: usize,
    /// Files tracked by the hotspot analysis (default: 1000).
    #[serde(default = "default_file_cap")]
    pub files: usize,
}

fn default_author_cap() -> usize {
    100
}

fn default_branch_cap() -> usize {
    50
}

fn default_extension_cap() -> usize {
    50
}

fn default_file_cap() -> usize {
    1000
}

impl Default for CapacityLimits {
    fn default() -> Self {
        Self {
            authors: default_author_cap(),
            branches: default_branch_cap(),
            extensions: default_extension_cap(),
            files: default_file_cap(),
        }
    }
}

/// Top-K limit per report section.
///
/// # Examples
///
/// ```
/// use gitstat_core::DisplayLimits;
///
/// let display = DisplayLimits::default();
/// assert_eq!(display.authors, 10);
/// assert_eq!(display.activity, 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayLimits {
    /// Top contributors (default: 10).
    #[serde(default = "default_short_list")]
    pub authors: usize,
    /// Branches (default: 10).
    #[serde(default = "default_short_list")]
    pub branches: usize,
    /// File types (default: 10).
    #[serde(default = "default_short_list")]
    pub extensions: usize,
    /// Hotspots (default: 15).
    #[serde(default = "default_long_list")]
    pub hotspots: usize,
    /// Author activity entries (default: 15).
    #[serde(default = "default_long_list")]
    pub activity: usize,
}

fn default_short_list() -> usize {
    10
}

fn default_long_list() -> usize {
    15
}

impl Default for DisplayLimits {
    fn default() -> Self {
        Self {
            authors: default_short_list(),
            branches: default_short_list(),
            extensions: default_short_list(),
            hotspots: default_long_list(),
            activity: default_long_list(),
        }
    }
}

impl DisplayLimits {
    fn validate(&self) -> Result<(), GitStatError> {
        let sections = [
            ("authors", self.authors),
            ("branches", self.branches),
            ("extensions", self.extensions),
            ("hotspots", self.hotspots),
            ("activity", self.activity),
        ];
        match sections.iter().find(|(_, limit)| *limit == 0) {
            Some((name, _)) => Err(GitStatError::Config(format!(
                "display.{name} must be at least 1"
            ))),
            None => Ok(()),
        }
    }
}
