//! Core data types for the playlist merger

use serde::{Deserialize, Serialize};

/// One metadata/URL line pair within a playlist document
///
/// Playlists are handled as text; entries only materialize as structured
/// values when they are synthesized locally (override entries).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub extinf: String,
    pub url: String,
}

impl PlaylistEntry {
    /// Serialize the entry back into its two-line M3U form
    pub fn to_m3u(&self) -> String {
        format!("{}\n{}\n", self.extinf, self.url)
    }
}

/// A locally supplied playlist entry read from the override file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideEntry {
    pub name: String,
    pub logo_url: String,
    pub stream_url: String,
}

/// What to do when a remote source cannot be fetched
///
/// `Skip` preserves the historical behavior of the pipeline: a failed source
/// contributes nothing and the run carries on with a partial playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchPolicy {
    Skip,
    Abort,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self::Skip
    }
}
