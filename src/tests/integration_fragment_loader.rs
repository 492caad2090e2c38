use crate::browser::MemoryStateStore;
use crate::dom::{CONTENT_SELECTOR, FOOTER_SELECTOR, HEADER_SELECTOR};
use crate::messages::fragment_load_failed;
use crate::tests::mocks::{fixture_site, MockFragmentSource, HEADER_HTML};
use chrono::Datelike;

#[tokio::test]
async fn test_header_is_injected_verbatim() {
    let source = MockFragmentSource::site();
    let site = fixture_site(&source, &MemoryStateStore::new());

    site.load_fragment(HEADER_SELECTOR, "header.html").await;

    site.with_document(|doc| {
        assert_eq!(doc.inner_html(HEADER_SELECTOR), Some(HEADER_HTML));
        assert!(!doc.query_all(HEADER_SELECTOR, |el| el.tag == "a").is_empty());
    });
}

// the footer gets the current year stamped into #year
#[tokio::test]
async fn test_footer_year_is_stamped() {
    let source = MockFragmentSource::site();
    let site = fixture_site(&source, &MemoryStateStore::new());

    site.load_fragment(FOOTER_SELECTOR, "footer.html").await;

    let expected = chrono::Local::now().year().to_string();
    site.with_document(|doc| {
        let year = doc.find_by_id(FOOTER_SELECTOR, "year").unwrap();
        let text = doc.element(&year).unwrap().text().to_string();
        assert_eq!(text, expected);
        assert_eq!(text.len(), 4);

        let html = doc.inner_html(FOOTER_SELECTOR).unwrap();
        assert!(html.contains(&format!(r#"<span id="year">{}</span>"#, expected)));
        assert!(!html.contains("2000"));
    });
}

// only the footer region gets stamped, even if another fragment has a #year
#[tokio::test]
async fn test_year_only_stamped_in_footer() {
    let source = MockFragmentSource::site();
    source.add_file("pages/history.html", r#"<p>Since <span id="year">1999</span></p>"#);
    let site = fixture_site(&source, &MemoryStateStore::new());

    site.load_fragment(CONTENT_SELECTOR, "pages/history.html").await;

    site.with_document(|doc| {
        let year = doc.find_by_id(CONTENT_SELECTOR, "year").unwrap();
        assert_eq!(doc.element(&year).unwrap().text(), "1999");
    });
}

#[tokio::test]
async fn test_failed_fragment_shows_error_with_url() {
    let source = MockFragmentSource::site();
    let site = fixture_site(&source, &MemoryStateStore::new());

    // must not panic or return an error past the loader
    site.load_fragment(HEADER_SELECTOR, "headr.html").await;

    site.with_document(|doc| {
        let html = doc.inner_html(HEADER_SELECTOR).unwrap();
        assert_eq!(html, fragment_load_failed("headr.html"));
        assert!(html.contains("headr.html"));
        assert!(html.contains("text-danger"));
    });
    assert!(!site.fetcher().cache().contains("headr.html").await);
}

// a selector with no region is a quiet no-op and does not fetch
#[tokio::test]
async fn test_missing_region_is_noop() {
    let source = MockFragmentSource::site();
    let site = fixture_site(&source, &MemoryStateStore::new());

    site.load_fragment("#sidebar", "header.html").await;

    assert_eq!(source.total_calls(), 0);
    site.with_document(|doc| assert!(!doc.has_region("#sidebar")));
}

#[tokio::test]
async fn test_reloading_fragment_uses_cache() {
    let source = MockFragmentSource::site();
    let site = fixture_site(&source, &MemoryStateStore::new());

    site.load_fragment(FOOTER_SELECTOR, "footer.html").await;
    site.load_fragment(FOOTER_SELECTOR, "footer.html").await;

    assert_eq!(source.calls_for("footer.html"), 1);
}
