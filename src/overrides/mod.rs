//! Local override file handling
//!
//! Overrides let manually curated entries ride ahead of every remote source.
//! The file format is one entry per line, three `|`-separated fields:
//! name, logo URL, stream URL.

use std::path::Path;
use tracing::{debug, info};

use crate::errors::AppResult;
use crate::models::{OverrideEntry, PlaylistEntry};

/// Read override entries from a local file
///
/// A missing file means no overrides. Lines that do not split into exactly
/// three non-empty-trimmed fields are skipped without error.
pub fn read_overrides(path: &Path) -> AppResult<Vec<OverrideEntry>> {
    if !path.exists() {
        debug!("No override file at {}", path.display());
        return Ok(Vec::new());
    }

    let contents = std::fs::read_to_string(path)?;
    let mut entries = Vec::new();

    for (line_num, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('|').map(str::trim).collect();
        match fields.as_slice() {
            [name, logo_url, stream_url] => entries.push(OverrideEntry {
                name: name.to_string(),
                logo_url: logo_url.to_string(),
                stream_url: stream_url.to_string(),
            }),
            _ => {
                debug!(
                    "Skipping malformed override line {} ({} fields)",
                    line_num + 1,
                    fields.len()
                );
            }
        }
    }

    info!(
        "Loaded {} override entries from {}",
        entries.len(),
        path.display()
    );
    Ok(entries)
}

/// Render override entries as a block of two-line playlist entries
pub fn render_overrides(entries: &[OverrideEntry], group: &str) -> String {
    entries
        .iter()
        .map(|entry| {
            PlaylistEntry {
                extinf: format!(
                    "#EXTINF:-1 group-title=\"{}\" tvg-logo=\"{}\", {}",
                    group, entry.logo_url, entry.name
                ),
                url: entry.stream_url.clone(),
            }
            .to_m3u()
        })
        .collect()
}
