//! Integration tests for twwx-core
//!
//! The offline tests run the whole pipeline against a file-backed store.
//! The live feed test needs network access and an API key:
//! ```
//! TWWX_API_KEY="CWA-XXXX" cargo test --package twwx-core --test integration -- --ignored --nocapture
//! ```

use std::env;
use std::time::Duration;

use serde_json::{Value, json};
use twwx_core::twwx_store::Store;
use twwx_core::twwx_types::Region;
use twwx_core::{
    DEFAULT_FEED_URL, FeedClient, FeedSource, FileFeed, MockFeed, Pipeline, PipelineError,
};

fn location(name: &str, min: &str, max: &str, wx: &str) -> Value {
    json!({
        "locationName": name,
        "weatherElement": [
            {"elementName": "Wx", "time": [{"parameter": {"parameterName": wx}}]},
            {"elementName": "MinT", "time": [{"startTime": "2025-03-01T00:00:00+08:00", "parameter": {"parameterName": min}}]},
            {"elementName": "MaxT", "time": [{"parameter": {"parameterName": max}}]},
            {"elementName": "T", "time": [{"parameter": {"parameterName": "-"}}]}
        ]
    })
}

fn document(locations: Vec<Value>) -> Value {
    json!({"cwaopendata": {"dataset": {"location": locations}}})
}

// =============================================================================
// Offline pipeline runs
// =============================================================================

#[test]
fn test_repeated_runs_accumulate_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("weather.db")).unwrap();

    let feed = MockFeed::new(document(vec![
        location("臺北市", "16", "21", "陰短暫雨"),
        location("臺南市", "20", "28", "晴時多雲"),
    ]));

    let pipeline = Pipeline::new(&feed, &store);
    pipeline.run().unwrap();

    feed.set_document(document(vec![
        location("臺北市", "17", "22", "多雲"),
        location("臺南市", "21", "29", "晴"),
    ]));
    let summary = pipeline.run().unwrap();

    assert_eq!(feed.fetch_count(), 2);
    assert_eq!(summary.stats.total_records, 4);
    assert_eq!(summary.stats.unique_locations, 2);
    assert_eq!(summary.stats.min_temp, Some(16.0));
    assert_eq!(summary.stats.max_temp, Some(29.0));

    let latest = store.latest_per_location().unwrap();
    assert_eq!(latest.len(), 2);
    let taipei = latest.iter().find(|r| r.location == "臺北市").unwrap();
    assert_eq!(taipei.description, "多雲");
    assert_eq!(taipei.region, Region::North);
    // "-" is not a number: current stays unset.
    assert_eq!(taipei.current_temp, None);
}

#[test]
fn test_failed_run_leaves_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("weather.db")).unwrap();

    let feed = MockFeed::new(document(vec![location("宜蘭縣", "15", "19", "雨")]));
    Pipeline::new(&feed, &store).run().unwrap();

    feed.set_should_fail(true);
    let err = Pipeline::new(&feed, &store).run().unwrap_err();
    assert!(matches!(err, PipelineError::Fetch(_)));

    feed.set_should_fail(false);
    feed.set_document(json!({"records": {}}));
    let err = Pipeline::new(&feed, &store).run().unwrap_err();
    assert!(matches!(err, PipelineError::Parse));

    assert_eq!(store.count_records(None).unwrap(), 1);
}

#[test]
fn test_file_feed_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let feed_path = dir.path().join("F-A0010-001.json");
    let doc = json!({
        "cwaopendata": {"dataset": {"locations": {"location": [
            location("澎湖縣", "19", "23", "多雲"),
            location("某某鄉", "10", "12", "晴"),
        ]}}}
    });
    // Saved documents often carry a UTF-8 BOM.
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend(serde_json::to_vec(&doc).unwrap());
    std::fs::write(&feed_path, bytes).unwrap();

    let store = Store::open(dir.path().join("weather.db")).unwrap();
    let summary = Pipeline::new(FileFeed::new(&feed_path), &store)
        .with_retention(7)
        .run()
        .unwrap();

    assert_eq!(summary.stored, 2);
    assert_eq!(summary.pruned, Some(0));

    let islands = store.latest_in_region(Region::Islands).unwrap();
    assert_eq!(islands.len(), 1);
    assert_eq!(islands[0].location, "澎湖縣");
    let other = store.latest_in_region(Region::Other).unwrap();
    assert_eq!(other[0].location, "某某鄉");
}

// =============================================================================
// Live feed
// =============================================================================

#[test]
#[ignore = "requires network access and TWWX_API_KEY"]
fn test_live_feed_fetch_and_store() {
    let api_key = match env::var("TWWX_API_KEY") {
        Ok(key) if !key.is_empty() => key,
        _ => panic!("TWWX_API_KEY is not set"),
    };

    let client =
        FeedClient::with_timeout(DEFAULT_FEED_URL, api_key, Duration::from_secs(60)).unwrap();
    println!("Fetching from {}", client.describe());

    let store = Store::open_in_memory().unwrap();
    let summary = Pipeline::new(client, &store).run().unwrap();

    println!(
        "Fetched {} locations, stored {}",
        summary.fetched, summary.stored
    );
    for record in store.latest_per_location().unwrap() {
        println!(
            "  {:<6} {:<8} {:?}-{:?} {}",
            record.region.label(),
            record.location,
            record.min_temp,
            record.max_temp,
            record.description
        );
    }
    assert!(summary.stored > 0);
}
