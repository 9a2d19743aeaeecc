//! Workflow tests, organized by domain.


use crate::config::Config;
use crate::error::Error;
use crate::workflow::CompressWorkflow;
use crate::workflow::test_helpers::create_offline_workflow;

#[test]
fn new_rejects_unparseable_endpoint() {
    let config = Config {
        endpoint: "not a url".to_string(),
        ..Config::default()
    };
    match CompressWorkflow::new(config) {
        Err(Error::Config { key, .. }) => assert_eq!(key.as_deref(), Some("endpoint")),
        Err(other) => panic!("expected Config error, got {other:?}"),
        Ok(_) => panic!("an unparseable endpoint must not construct a workflow"),
    }
}

#[test]
fn new_rejects_non_http_scheme() {
    let config = Config {
        endpoint: "ftp://host/compress".to_string(),
        ..Config::default()
    };
    assert!(matches!(
        CompressWorkflow::new(config),
        Err(Error::Config { .. })
    ));
}

#[tokio::test]
async fn snapshot_of_fresh_workflow_is_empty_and_idle() {
    let workflow = create_offline_workflow();
    let snapshot = workflow.snapshot().await;

    assert!(snapshot.file_name.is_none());
    assert!(snapshot.media_kind.is_none());
    assert!(!snapshot.previewable);
    assert!(snapshot.preview_url.is_none());
    assert!(snapshot.submission.is_idle());
    assert!(!snapshot.busy);
    assert_eq!(snapshot.download_filename, "compressed-file");
    assert!(!snapshot.dark_mode);
}

#[tokio::test]
async fn theme_toggles_and_emits() {
    let workflow = create_offline_workflow();
    let mut events = workflow.subscribe();

    assert!(!workflow.dark_mode(), "theme defaults to light");
    assert!(workflow.toggle_theme());
    assert!(workflow.dark_mode());
    assert!(!workflow.toggle_theme());

    match events.try_recv().unwrap() {
        crate::types::Event::ThemeToggled { dark } => assert!(dark),
        other => panic!("expected ThemeToggled, got {other:?}"),
    }
}

#[test]
fn theme_initializes_from_config() {
    let config = Config {
        endpoint: "http://127.0.0.1:9/compress".to_string(),
        dark_mode: true,
        ..Config::default()
    };
    let workflow = CompressWorkflow::new(config).unwrap();
    assert!(workflow.dark_mode());
}
