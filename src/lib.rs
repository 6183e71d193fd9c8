//! m3u-merge library
//!
//! Fetches remote M3U playlists, normalizes them (header stripping, group
//! tagging) and merges them with local override entries into a single
//! playlist document.

pub mod config;
pub mod errors;
pub mod merge;
pub mod models;
pub mod overrides;
pub mod playlist;
pub mod sources;
