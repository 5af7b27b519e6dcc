use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output format for the report.
///
/// Implements [`FromStr`] so it can be used directly with `clap` argument parsing.
///
/// # Examples
///
/// ```
/// use gitstat_core::OutputFormat;
///
/// let fmt: OutputFormat = "json".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Json);
/// assert!("xml".parse::<OutputFormat>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable multi-section report.
    #[default]
    Text,
    /// A single JSON object with a fixed key order.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format '{other}' (supported formats: text, json)"
            )),
        }
    }
}

/// Which optional analysis runs on top of the basic statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Repository overview, contributors, branches and file types only.
    #[default]
    Basic,
    /// Basic statistics plus per-file churn hotspots.
    Hotspots,
    /// Basic statistics plus per-author temporal activity.
    Activity,
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisMode::Basic => write!(f, "basic"),
            AnalysisMode::Hotspots => write!(f, "hotspots"),
            AnalysisMode::Activity => write!(f, "activity"),
        }
    }
}
