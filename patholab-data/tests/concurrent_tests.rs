//! Concurrency tests for the list-load deduplicator

mod helpers;

use helpers::MockTransport;
use patholab_data::transport::TransportError;
use patholab_data::{CatalogService, ListLoader, ResidentLoader};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn resident_loader(mock: &Arc<MockTransport>) -> ResidentLoader {
    let catalog = Arc::new(CatalogService::new(
        Arc::clone(mock) as Arc<dyn patholab_data::Transport>
    ));
    ResidentLoader::residents(catalog)
}

#[tokio::test]
async fn concurrent_callers_share_one_request() {
    let mock = Arc::new(
        MockTransport::returning(json!([
            {"resident_name": "Ana", "resident_code": "R01"}
        ]))
        .with_delay(Duration::from_millis(50)),
    );
    let loader = resident_loader(&mock);

    let (first, second) = tokio::join!(loader.load_all(), loader.load_all());

    assert_eq!(mock.calls(), 1);
    assert_eq!(first, second);
    assert!(first.success);
    assert_eq!(first.records.len(), 1);
    assert_eq!(first.records[0].name, "Ana");
}

#[tokio::test]
async fn settled_load_allows_a_fresh_request() {
    let mock = Arc::new(MockTransport::returning(json!([])));
    let loader = resident_loader(&mock);

    loader.load_all().await;
    loader.load_all().await;

    assert_eq!(mock.calls(), 2);
    assert!(!loader.is_loading());
}

#[tokio::test]
async fn loading_flag_tracks_the_attempt() {
    let mock = Arc::new(
        MockTransport::returning(json!([])).with_delay(Duration::from_millis(50)),
    );
    let loader = Arc::new(resident_loader(&mock));

    assert!(!loader.is_loading());

    let task = tokio::spawn({
        let loader = Arc::clone(&loader);
        async move { loader.load_all().await }
    });

    // Give the spawned load time to start
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(loader.is_loading());

    let outcome = task.await.unwrap();
    assert!(outcome.success);
    assert!(!loader.is_loading());
}

#[tokio::test]
async fn failure_sets_error_and_clears_loading() {
    let mock = Arc::new(MockTransport::failing(TransportError::Api(
        500,
        "database unavailable".to_string(),
    )));
    let loader = resident_loader(&mock);

    let outcome = loader.load_all().await;

    assert!(!outcome.success);
    assert_eq!(outcome.message.as_deref(), Some("database unavailable"));
    assert!(outcome.records.is_empty());
    assert!(!loader.is_loading());
    assert_eq!(loader.last_error(), "database unavailable");
}

#[tokio::test]
async fn new_attempt_clears_the_previous_error() {
    let mock = Arc::new(MockTransport::scripted(vec![
        Err(TransportError::Api(500, "boom".to_string())),
        Ok(json!([{"resident_name": "Ana", "resident_code": "R01"}])),
    ]));
    let loader = resident_loader(&mock);

    let failed = loader.load_all().await;
    assert!(!failed.success);
    assert_eq!(loader.last_error(), "boom");

    let succeeded = loader.load_all().await;
    assert!(succeeded.success);
    assert_eq!(loader.last_error(), "");
}

#[tokio::test]
async fn records_snapshot_survives_a_later_failure() {
    let mock = Arc::new(MockTransport::scripted(vec![
        Ok(json!([{"resident_name": "Ana", "resident_code": "R01"}])),
        Err(TransportError::Api(500, "boom".to_string())),
    ]));
    let loader = resident_loader(&mock);

    loader.load_all().await;
    assert_eq!(loader.records().len(), 1);

    loader.load_all().await;
    // The cached list still reflects the last successful load
    assert_eq!(loader.records().len(), 1);
    assert_eq!(loader.last_error(), "boom");
}

#[tokio::test]
async fn find_selected_matches_code_or_id() {
    let mock = Arc::new(MockTransport::returning(json!([
        {"id": "abc-1", "resident_code": "R01", "resident_name": "Ana"},
        {"resident_code": "R02", "resident_name": "Luis"}
    ])));
    let loader = resident_loader(&mock);
    loader.load_all().await;

    assert_eq!(loader.find_selected("R01").unwrap().name, "Ana");
    assert_eq!(loader.find_selected("abc-1").unwrap().name, "Ana");
    assert_eq!(loader.find_selected("R02").unwrap().name, "Luis");
    assert!(loader.find_selected("R99").is_none());
}

#[tokio::test]
async fn clear_state_resets_observables() {
    let mock = Arc::new(MockTransport::failing(TransportError::Api(
        500,
        "boom".to_string(),
    )));
    let loader = resident_loader(&mock);

    loader.load_all().await;
    assert_eq!(loader.last_error(), "boom");

    loader.clear_state();
    assert_eq!(loader.last_error(), "");
    assert!(!loader.is_loading());
}

#[tokio::test]
async fn generic_loader_works_with_a_plain_closure() {
    let loader: ListLoader<String> = ListLoader::new(|| async {
        Ok(vec!["one".to_string(), "two".to_string()])
    });

    let outcome = loader.load_all().await;
    assert!(outcome.success);
    assert_eq!(outcome.records, vec!["one", "two"]);
    assert_eq!(loader.find(|r| r == "two").as_deref(), Some("two"));
}
