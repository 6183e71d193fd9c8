use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::{AppError, AppResult};
use crate::models::FetchPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub output: OutputConfig,
    pub overrides: OverrideConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Remote sources in merge priority order; the untagged bulk source
    /// goes last so tagged groups stay visible at the top of the playlist.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Destination playlist file, overwritten in full each run
    pub path: PathBuf,
    /// EPG URL carried on the `#EXTM3U` header (`url-tvg` attribute);
    /// empty means a bare header
    #[serde(default)]
    pub epg_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideConfig {
    /// Pipe-delimited local override file; a missing file means no overrides
    pub path: PathBuf,
    /// Group label applied to every override entry
    #[serde(default = "default_override_group")]
    pub group: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds; unset means the client default
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub on_failure: FetchPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub url: String,
    /// Group label to tag every entry with; `None` passes the source
    /// through verbatim
    #[serde(default)]
    pub group: Option<String>,
}

fn default_override_group() -> String {
    "Temporary".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputConfig {
                path: PathBuf::from("./data/playlist.m3u"),
                epg_url: String::new(),
            },
            overrides: OverrideConfig {
                path: PathBuf::from("./overrides.txt"),
                group: default_override_group(),
            },
            fetch: FetchConfig::default(),
            sources: Vec::new(),
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());

        let config: Config = if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(&config_file)?;
            toml::from_str(&contents)
                .map_err(|e| AppError::configuration(format!("{}: {}", config_file, e)))?
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)
                .map_err(|e| AppError::configuration(e.to_string()))?;
            std::fs::write(&config_file, contents)?;
            default_config
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject unusable source URLs up front rather than at fetch time
    pub fn validate(&self) -> AppResult<()> {
        for source in &self.sources {
            let parsed = url::Url::parse(&source.url).map_err(|e| {
                AppError::configuration(format!("source '{}': {}", source.name, e))
            })?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(AppError::configuration(format!(
                    "source '{}': unsupported scheme '{}'",
                    source.name,
                    parsed.scheme()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let mut config = Config::default();
        config.sources.push(SourceConfig {
            name: "bad".to_string(),
            url: "ftp://example.com/list.m3u".to_string(),
            group: None,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: Config = toml::from_str(
            r#"
            [output]
            path = "./out.m3u"
            epg_url = "http://example.com/epg.xml"

            [overrides]
            path = "./overrides.txt"

            [[sources]]
            name = "events"
            url = "http://example.com/events.m3u"
            group = "Live Events"

            [[sources]]
            name = "main"
            url = "http://example.com/main.m3u"
            "#,
        )
        .unwrap();

        assert_eq!(config.overrides.group, "Temporary");
        assert_eq!(config.fetch.on_failure, crate::models::FetchPolicy::Skip);
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[0].group.as_deref(), Some("Live Events"));
        assert!(config.sources[1].group.is_none());
        config.validate().unwrap();
    }
}
