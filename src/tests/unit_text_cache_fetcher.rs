use crate::error::FetchFailure;
use crate::services::{FragmentFetcher, TextCache};
use crate::tests::mocks::MockFragmentSource;
use std::sync::Arc;
use std::time::Duration;

fn fetcher_over(source: &MockFragmentSource) -> FragmentFetcher {
    FragmentFetcher::new(Box::new(source.clone()), Arc::new(TextCache::new()))
}

#[tokio::test]
async fn test_text_cache_get_set() {
    let cache = TextCache::new();
    assert!(cache.is_empty().await);
    assert_eq!(cache.get("a.html").await, None);

    cache.set("a.html", "<p>a</p>".to_string()).await;
    assert_eq!(cache.get("a.html").await.as_deref(), Some("<p>a</p>"));

    // one entry per url, later writes replace
    cache.set("a.html", "<p>b</p>".to_string()).await;
    assert_eq!(cache.len().await, 1);
    assert!(cache.contains("a.html").await);
}

// the second fetch must be served from the cache without touching the source
#[tokio::test]
async fn test_fetch_twice_hits_source_once() {
    let source = MockFragmentSource::site();
    let fetcher = fetcher_over(&source);

    let first = fetcher.fetch_text("pages/about.html").await.unwrap();
    let second = fetcher.fetch_text("pages/about.html").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(source.calls_for("pages/about.html"), 1);
}

// cached text survives the source losing the file
#[tokio::test]
async fn test_cached_text_served_after_source_changes() {
    let source = MockFragmentSource::site();
    let fetcher = fetcher_over(&source);

    fetcher.fetch_text("header.html").await.unwrap();
    source.remove_file("header.html");

    assert!(fetcher.fetch_text("header.html").await.is_ok());
    assert_eq!(source.calls_for("header.html"), 1);
}

#[tokio::test]
async fn test_failed_fetch_carries_url_and_leaves_cache_alone() {
    let source = MockFragmentSource::new();
    let fetcher = fetcher_over(&source);

    let err = fetcher.fetch_text("pages/missing.html").await.unwrap_err();
    assert_eq!(err.url, "pages/missing.html");
    assert_eq!(err.reason, FetchFailure::Status(404));
    assert!(fetcher.cache().is_empty().await);

    // a failure is not remembered, so the next attempt asks again
    source.add_file("pages/missing.html", "<p>back</p>");
    assert_eq!(fetcher.fetch_text("pages/missing.html").await.unwrap(), "<p>back</p>");
    assert_eq!(source.calls_for("pages/missing.html"), 2);
}

// in-flight requests are not deduplicated: two concurrent misses mean two source calls
#[tokio::test(start_paused = true)]
async fn test_concurrent_misses_are_not_deduplicated() {
    let source = MockFragmentSource::site();
    source.delay("pages/gallery.html", Duration::from_millis(300));
    let fetcher = fetcher_over(&source);

    let (a, b) = tokio::join!(
        fetcher.fetch_text("pages/gallery.html"),
        fetcher.fetch_text("pages/gallery.html")
    );

    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(source.calls_for("pages/gallery.html"), 2);
    assert_eq!(fetcher.cache().len().await, 1);
}

// separate caches do not see each other's entries
#[tokio::test]
async fn test_independent_cache_instances() {
    let source = MockFragmentSource::site();
    let first = fetcher_over(&source);
    let second = fetcher_over(&source);

    first.fetch_text("footer.html").await.unwrap();
    second.fetch_text("footer.html").await.unwrap();
    assert_eq!(source.calls_for("footer.html"), 2);

    // while a shared cache does
    let shared = Arc::new(TextCache::new());
    let third = FragmentFetcher::new(Box::new(source.clone()), shared.clone());
    let fourth = FragmentFetcher::new(Box::new(source.clone()), shared);
    third.fetch_text("pages/home.html").await.unwrap();
    fourth.fetch_text("pages/home.html").await.unwrap();
    assert_eq!(source.calls_for("pages/home.html"), 1);
}
