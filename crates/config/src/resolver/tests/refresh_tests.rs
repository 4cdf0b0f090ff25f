//! Refresh tests: partial failure, staleness, idempotence, timeouts.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::{register, resolver};
use crate::resolver::{SourceError, SourceLoader};
use crate::sources::StaticSource;

#[tokio::test]
async fn test_failed_source_keeps_cached_values_and_is_stale() {
    let mut resolver = resolver();
    let healthy = StaticSource::new([("app.database.url", "jdbc:h2:mem")]);
    let flaky = StaticSource::new([("app.api.key", "k-1"), ("only.flaky", "old")]);
    register(&mut resolver, "healthy", 1, &healthy);
    register(&mut resolver, "flaky", 2, &flaky);

    let first = resolver.refresh().await;
    assert!(first.is_clean());

    flaky.fail_with("sealed");
    healthy.replace([("app.database.url", "jdbc:postgresql://db/demo")]);
    let second = resolver.refresh().await;

    assert_eq!(second.stale_sources.len(), 1);
    assert!(second.stale_sources.contains("flaky"));
    // The healthy source still advanced.
    assert_eq!(
        resolver.get("app.database.url", "d").value(),
        "jdbc:postgresql://db/demo"
    );
    // The failing source's values persist rather than falling back.
    assert_eq!(resolver.get("only.flaky", "default").value(), "old");
    assert!(!resolver.get("only.flaky", "default").default_used());
    assert_eq!(resolver.get("app.api.key", "d").value(), "k-1");
    assert!(resolver.stale_sources().contains("flaky"));

    let state = resolver
        .snapshot()
        .sources()
        .iter()
        .find(|s| s.name == "flaky")
        .cloned()
        .unwrap();
    assert!(state.stale);
    assert!(state.last_error.unwrap().contains("sealed"));
    assert!(state.last_loaded.is_some());
}

#[tokio::test]
async fn test_recovered_source_is_no_longer_stale() {
    let mut resolver = resolver();
    let source = StaticSource::new([("app.api.key", "k-1")]);
    register(&mut resolver, "s", 1, &source);

    source.fail_with("down");
    let report = resolver.refresh().await;
    assert!(report.stale_sources.contains("s"));
    assert!(!resolver.is_resolved("app.api.key"));

    source.recover();
    let report = resolver.refresh().await;
    assert!(report.is_clean());
    assert!(resolver.is_resolved("app.api.key"));
}

#[tokio::test]
async fn test_refresh_is_idempotent_without_source_changes() {
    let mut resolver = resolver();
    let a = StaticSource::new([("app.database.url", "u"), ("app.api.key", "k")]);
    let b = StaticSource::new([("app.database.username", "demo")]);
    register(&mut resolver, "a", 1, &a);
    register(&mut resolver, "b", 2, &b);

    resolver.refresh().await;
    let before = resolver.snapshot();
    let report = resolver.refresh().await;
    let after = resolver.snapshot();

    assert_eq!(before.entries(), after.entries());
    assert!(report.changed_keys.is_empty());
    assert_eq!(after.generation(), before.generation() + 1);
}

#[tokio::test]
async fn test_report_lists_changed_keys() {
    let mut resolver = resolver();
    let source = StaticSource::new([("app.database.url", "u1")]);
    register(&mut resolver, "s", 1, &source);

    let first = resolver.refresh().await;
    assert!(first.changed_keys.contains("app.database.url"));
    assert_eq!(first.generation, 1);

    source.replace([("app.database.url", "u2"), ("app.api.key", "k")]);
    let second = resolver.refresh().await;
    assert_eq!(
        second
            .changed_keys
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>(),
        vec!["app.api.key", "app.database.url"]
    );
}

#[tokio::test]
async fn test_slow_loader_times_out_without_blocking_others() {
    struct Slow;
    impl SourceLoader for Slow {
        fn load_all(&self, _: &str) -> Result<HashMap<String, String>, SourceError> {
            std::thread::sleep(Duration::from_millis(1500));
            Ok(HashMap::from([("app.api.key".to_string(), "late".to_string())]))
        }
    }

    let mut resolver = resolver();
    let fast = StaticSource::new([("app.database.url", "u")]);
    register(&mut resolver, "fast", 1, &fast);
    resolver.register_source("slow", 2, Arc::new(Slow)).unwrap();

    let report = resolver.refresh().await;

    assert!(report.stale_sources.contains("slow"));
    assert!(!report.stale_sources.contains("fast"));
    assert!(resolver.is_resolved("app.database.url"));
    assert!(!resolver.is_resolved("app.api.key"));
}

#[tokio::test]
async fn test_refresh_with_no_sources_keeps_defaults() {
    let resolver = resolver();
    let report = resolver.refresh().await;

    assert!(report.is_clean());
    assert_eq!(resolver.snapshot().entries().len(), 3);
    assert!(
        resolver
            .snapshot()
            .entries()
            .values()
            .all(|entry| entry.default_used())
    );
}
