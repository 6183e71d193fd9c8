use async_trait::async_trait;
use std::collections::HashMap;

use m3u_merge::{
    config::{Config, SourceConfig},
    errors::SourceError,
    merge::PlaylistMerger,
    models::{FetchPolicy, OverrideEntry},
    sources::PlaylistFetcher,
};

/// In-memory fetcher keyed by source name
struct MockFetcher {
    responses: HashMap<String, Option<String>>,
}

impl MockFetcher {
    fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    fn with_body(mut self, name: &str, body: &str) -> Self {
        self.responses.insert(name.to_string(), Some(body.to_string()));
        self
    }

    fn with_failure(mut self, name: &str) -> Self {
        self.responses.insert(name.to_string(), None);
        self
    }
}

#[async_trait]
impl PlaylistFetcher for MockFetcher {
    async fn fetch(&self, source: &SourceConfig) -> Result<String, SourceError> {
        match self.responses.get(&source.name) {
            Some(Some(body)) => Ok(body.clone()),
            _ => Err(SourceError::HttpStatus {
                status: 503,
                url: source.url.clone(),
            }),
        }
    }
}

fn source(name: &str, group: Option<&str>) -> SourceConfig {
    SourceConfig {
        name: name.to_string(),
        url: format!("http://example.com/{}.m3u", name),
        group: group.map(str::to_string),
    }
}

fn test_config(sources: Vec<SourceConfig>, on_failure: FetchPolicy) -> Config {
    let mut config = Config::default();
    config.output.epg_url = "http://example.com/epg.xml".to_string();
    config.fetch.on_failure = on_failure;
    config.sources = sources;
    config
}

fn demo_override() -> OverrideEntry {
    OverrideEntry {
        name: "Demo".to_string(),
        logo_url: "http://logo/x.png".to_string(),
        stream_url: "http://stream/x.m3u8".to_string(),
    }
}

#[tokio::test]
async fn test_merge_order_and_single_header() {
    let fetcher = MockFetcher::new()
        .with_body("events", "#EXTM3U\n#EXTINF:-1 ,Match\nhttp://events/1\n")
        .with_body("youtube", "#EXTM3U\n#EXTINF:-1 ,Chan1\nhttp://x\n")
        .with_body("main", "#EXTM3U\n#EXTINF:-1 group-title=\"News\",BBC\nhttp://main/1\n");
    let config = test_config(
        vec![
            source("events", Some("Live Events")),
            source("youtube", Some("YouTube")),
            source("main", None),
        ],
        FetchPolicy::Skip,
    );

    let document = PlaylistMerger::new(&fetcher, &config)
        .build(&[demo_override()])
        .await
        .unwrap();

    // Exactly one header, and it is the first line
    let first_line = document.lines().next().unwrap();
    assert_eq!(first_line, "#EXTM3U url-tvg=\"http://example.com/epg.xml\"");
    assert_eq!(
        document.lines().filter(|l| l.starts_with("#EXTM3U")).count(),
        1
    );

    // Overrides, then tagged sources in listed order, then the untagged bulk
    let override_pos = document.find(", Demo").unwrap();
    let events_pos = document.find("group-title=\"Live Events\" ,Match").unwrap();
    let youtube_pos = document.find("group-title=\"YouTube\" ,Chan1").unwrap();
    let main_pos = document.find("group-title=\"News\",BBC").unwrap();
    assert!(override_pos < events_pos);
    assert!(events_pos < youtube_pos);
    assert!(youtube_pos < main_pos);

    // The untagged primary source passes through verbatim (header aside)
    assert!(document.contains("#EXTINF:-1 group-title=\"News\",BBC\nhttp://main/1\n"));
}

#[tokio::test]
async fn test_tagged_fragment_matches_expected_form() {
    let fetcher =
        MockFetcher::new().with_body("youtube", "#EXTM3U\n#EXTINF:-1 ,Chan1\nhttp://x\n");
    let config = test_config(vec![source("youtube", Some("YouTube"))], FetchPolicy::Skip);

    let document = PlaylistMerger::new(&fetcher, &config).build(&[]).await.unwrap();

    assert!(document.contains("#EXTINF:-1 group-title=\"YouTube\" ,Chan1\nhttp://x\n"));
}

#[tokio::test]
async fn test_override_block_is_verbatim() {
    let config = test_config(vec![], FetchPolicy::Skip);
    let fetcher = MockFetcher::new();

    let document = PlaylistMerger::new(&fetcher, &config)
        .build(&[demo_override()])
        .await
        .unwrap();

    assert!(document.contains(
        "#EXTINF:-1 group-title=\"Temporary\" tvg-logo=\"http://logo/x.png\", Demo\nhttp://stream/x.m3u8\n"
    ));
}

#[tokio::test]
async fn test_skip_policy_drops_failed_source() {
    let fetcher = MockFetcher::new()
        .with_failure("events")
        .with_body("main", "#EXTINF:-1 ,A\nhttp://a\n");
    let config = test_config(
        vec![source("events", Some("Live Events")), source("main", None)],
        FetchPolicy::Skip,
    );

    let document = PlaylistMerger::new(&fetcher, &config).build(&[]).await.unwrap();

    assert!(!document.contains("Live Events"));
    assert!(document.contains("#EXTINF:-1 ,A\nhttp://a\n"));
}

#[tokio::test]
async fn test_abort_policy_fails_the_run() {
    let fetcher = MockFetcher::new().with_failure("events");
    let config = test_config(vec![source("events", Some("Live Events"))], FetchPolicy::Abort);

    let result = PlaylistMerger::new(&fetcher, &config).build(&[]).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_all_sources_failed_still_yields_well_formed_document() {
    let fetcher = MockFetcher::new()
        .with_failure("events")
        .with_failure("main");
    let config = test_config(
        vec![source("events", Some("Live Events")), source("main", None)],
        FetchPolicy::Skip,
    );

    let document = PlaylistMerger::new(&fetcher, &config).build(&[]).await.unwrap();

    assert!(document.starts_with("#EXTM3U url-tvg=\"http://example.com/epg.xml\"\n"));
    assert!(document.lines().any(|l| l.starts_with("# Generated at ")));
    assert!(document.ends_with('\n'));
}

#[tokio::test]
async fn test_empty_and_headerless_fragments() {
    let fetcher = MockFetcher::new()
        .with_body("empty", "")
        .with_body("headerless", "#EXTINF:-1 ,B\nhttp://b");
    let config = test_config(
        vec![source("empty", Some("Live Events")), source("headerless", None)],
        FetchPolicy::Skip,
    );

    let document = PlaylistMerger::new(&fetcher, &config).build(&[]).await.unwrap();

    // Fragment without a trailing newline must not run into anything after it
    assert!(document.ends_with("#EXTINF:-1 ,B\nhttp://b\n"));
    assert_eq!(
        document.lines().filter(|l| l.starts_with("#EXTM3U")).count(),
        1
    );
}
