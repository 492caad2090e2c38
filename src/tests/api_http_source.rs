use crate::browser::{MemoryStateStore, StateStore};
use crate::config::RouterConfig;
use crate::dom::{CONTENT_SELECTOR, HEADER_SELECTOR};
use crate::error::FetchFailure;
use crate::io::{source_for_root, FragmentSource, HttpFragmentSource};
use crate::routes::RouteTable;
use crate::site::Site;
use crate::tests::mocks::{ABOUT_HTML, FOOTER_HTML, HEADER_HTML, HOME_HTML};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use tower_http::services::ServeDir;

// serve a fixture site over real HTTP on an ephemeral port
async fn serve_fixture_site() -> (TempDir, SocketAddr) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("pages")).unwrap();
    std::fs::write(dir.path().join("header.html"), HEADER_HTML).unwrap();
    std::fs::write(dir.path().join("footer.html"), FOOTER_HTML).unwrap();
    std::fs::write(dir.path().join("pages/home.html"), HOME_HTML).unwrap();
    std::fs::write(dir.path().join("pages/about.html"), ABOUT_HTML).unwrap();

    let app = Router::new().fallback_service(ServeDir::new(dir.path()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (dir, addr)
}

#[tokio::test]
async fn test_http_source_fetches_fragments() {
    let (_dir, addr) = serve_fixture_site().await;
    let source = HttpFragmentSource::new(&format!("http://{}", addr)).unwrap();

    assert_eq!(source.fetch("header.html").await.unwrap(), HEADER_HTML);
    assert_eq!(source.fetch("pages/about.html").await.unwrap(), ABOUT_HTML);
}

// a 404 and an unreachable host both come back as fetch errors for the url
#[tokio::test]
async fn test_http_source_failures() {
    let (_dir, addr) = serve_fixture_site().await;
    let source = HttpFragmentSource::new(&format!("http://{}/", addr)).unwrap();

    let err = source.fetch("pages/gallery.html").await.unwrap_err();
    assert_eq!(err.reason, FetchFailure::Status(404));
    assert_eq!(err.url, "pages/gallery.html");

    // nothing listens on port 9 locally
    let dead = HttpFragmentSource::new("http://127.0.0.1:9").unwrap();
    let err = dead.fetch("header.html").await.unwrap_err();
    assert!(matches!(err.reason, FetchFailure::Transport(_)));
}

#[tokio::test]
async fn test_http_source_keeps_base_path() {
    let source = HttpFragmentSource::new("http://example.org/site").unwrap();
    assert_eq!(source.base.as_str(), "http://example.org/site/");
    assert!(HttpFragmentSource::new("not a url").is_err());
}

#[tokio::test]
async fn test_site_over_http_origin() {
    let (_dir, addr) = serve_fixture_site().await;
    let origin = format!("http://{}", addr);

    // the origin picks the http source
    assert!(source_for_root(&origin).is_ok());

    let config = Arc::new(RouterConfig {
        site_root: origin.clone(),
        ..RouterConfig::default()
    });
    let store: Arc<dyn StateStore> = Arc::new(MemoryStateStore::new());
    let site = Site::new(
        config,
        source_for_root(&origin).unwrap(),
        store,
        RouteTable::default(),
    )
    .unwrap();

    site.init().await;
    site.with_document(|doc| {
        let header = doc.inner_html(HEADER_SELECTOR).unwrap();
        assert!(header.contains(r#"<a class="active" data-link href="index.html?page=home">"#));
        assert_eq!(doc.region(HEADER_SELECTOR).unwrap().source_html(), HEADER_HTML);
        assert_eq!(doc.inner_html(CONTENT_SELECTOR), Some(HOME_HTML));
    });
}
