//! Playlist merge pipeline
//!
//! One merged document per run: header, timestamp comment, override block,
//! then every configured source in listed order. Nothing is kept between
//! runs; the output file is regenerated from scratch.

use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::{Config, SourceConfig};
use crate::errors::AppResult;
use crate::models::{FetchPolicy, OverrideEntry};
use crate::overrides::render_overrides;
use crate::playlist::{strip_header, tag_group};
use crate::sources::PlaylistFetcher;

pub struct PlaylistMerger<'a, F: PlaylistFetcher> {
    fetcher: &'a F,
    config: &'a Config,
}

impl<'a, F: PlaylistFetcher> PlaylistMerger<'a, F> {
    pub fn new(fetcher: &'a F, config: &'a Config) -> Self {
        Self { fetcher, config }
    }

    /// Build the merged playlist document
    ///
    /// Sources are fetched sequentially in configured order. What a failed
    /// fetch does is the configured policy's call: `skip` drops the source's
    /// contribution, `abort` fails the whole run.
    pub async fn build(&self, overrides: &[OverrideEntry]) -> AppResult<String> {
        let mut document = String::new();
        document.push_str(&self.header_block());
        document.push_str(&render_overrides(overrides, &self.config.overrides.group));

        for source in &self.config.sources {
            match self.fetch_fragment(source).await? {
                Some(fragment) => document.push_str(&fragment),
                None => continue,
            }
        }

        Ok(document)
    }

    fn header_block(&self) -> String {
        let header = if self.config.output.epg_url.is_empty() {
            "#EXTM3U".to_string()
        } else {
            format!("#EXTM3U url-tvg=\"{}\"", self.config.output.epg_url)
        };
        format!("{}\n# Generated at {}\n\n", header, Utc::now().to_rfc3339())
    }

    /// Fetch and normalize one source; `None` means it contributes nothing
    async fn fetch_fragment(&self, source: &SourceConfig) -> AppResult<Option<String>> {
        let text = match self.fetcher.fetch(source).await {
            Ok(text) => text,
            Err(e) => match self.config.fetch.on_failure {
                FetchPolicy::Skip => {
                    warn!("Skipping source '{}': {}", source.name, e);
                    return Ok(None);
                }
                FetchPolicy::Abort => return Err(e.into()),
            },
        };

        let stripped = strip_header(&text);
        let mut fragment = match &source.group {
            Some(label) => tag_group(stripped, label),
            None => stripped.to_string(),
        };
        // Keep entries line-aligned across fragment boundaries
        if !fragment.is_empty() && !fragment.ends_with('\n') {
            fragment.push('\n');
        }

        info!(
            "Merged source '{}' ({} bytes)",
            source.name,
            fragment.len()
        );
        Ok(Some(fragment))
    }
}

/// Overwrite the destination playlist file, creating parent directories
///
/// Plain overwrite, no atomic replace; the external commit step diffs the
/// result against the previous revision anyway.
pub fn write_playlist(path: &Path, content: &str) -> AppResult<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    Ok(path.to_path_buf())
}
