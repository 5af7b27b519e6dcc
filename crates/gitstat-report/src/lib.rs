//! Report rendering for gitstat.
//!
//! Both renderings show the same ranked data cut at the same display
//! limits; only the serialization differs.

pub mod json;
pub mod text;

use gitstat_core::{DisplayLimits, GitStatError, OutputFormat};
use gitstat_history::collect::RepoStats;

/// Render `stats` in the requested format.
///
/// # Errors
///
/// Returns [`GitStatError::Serialization`] if JSON serialization fails.
pub fn render(
    stats: &RepoStats,
    display: &DisplayLimits,
    format: OutputFormat,
) -> Result<String, GitStatError> {
    match format {
        OutputFormat::Text => Ok(text::format_text(stats, display)),
        OutputFormat::Json => json::format_json(stats, display).map(|mut json| {
            json.push('\n');
            json
        }),
    }
}
