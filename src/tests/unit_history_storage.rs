use crate::browser::{
    History, HistoryState, JsonFileStateStore, MemoryStateStore, StateStore, LAST_PAGE_KEY,
};
use reqwest::Url;

fn state(page: &str) -> Option<HistoryState> {
    Some(HistoryState {
        page: page.to_string(),
    })
}

#[test]
fn test_push_resolves_against_location() {
    let mut history = History::new(Url::parse("http://localhost/site/index.html").unwrap());
    history
        .push_state(state("about").unwrap(), "index.html?page=about")
        .unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history.index(), 1);
    assert_eq!(
        history.location().as_str(),
        "http://localhost/site/index.html?page=about"
    );
    assert_eq!(history.current().state, state("about"));
    assert_eq!(history.push_count(), 1);
}

#[test]
fn test_back_and_forward_report_entry_state() {
    let mut history = History::new(Url::parse("http://localhost/index.html").unwrap());
    assert!(history.back().is_none());

    history.push_state(state("about").unwrap(), "index.html?page=about").unwrap();
    history.push_state(state("contact").unwrap(), "index.html?page=contact").unwrap();

    assert_eq!(history.back().unwrap().state, state("about"));
    assert_eq!(history.back().unwrap().state, None);
    assert!(history.back().is_none());
    assert_eq!(history.location().as_str(), "http://localhost/index.html");

    assert_eq!(history.forward().unwrap().state, state("about"));
    assert_eq!(history.pop_count(), 3);
}

// pushing from the middle of history drops the forward entries
#[test]
fn test_push_truncates_forward_entries() {
    let mut history = History::new(Url::parse("http://localhost/index.html").unwrap());
    history.push_state(state("about").unwrap(), "index.html?page=about").unwrap();
    history.push_state(state("contact").unwrap(), "index.html?page=contact").unwrap();
    history.back();
    history.back();

    history.push_state(state("gallery").unwrap(), "index.html?page=gallery").unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.forward().is_none());
}

#[test]
fn test_history_state_json_shape() {
    let json = serde_json::to_string(&HistoryState {
        page: "about".into(),
    })
    .unwrap();
    assert_eq!(json, r#"{"page":"about"}"#);
}

#[tokio::test]
async fn test_memory_store() {
    let store = MemoryStateStore::with_item(LAST_PAGE_KEY, "services");
    assert_eq!(
        store.get_item(LAST_PAGE_KEY).await.unwrap().as_deref(),
        Some("services")
    );
    store.set_item(LAST_PAGE_KEY, "about").await.unwrap();
    assert_eq!(
        store.get_item(LAST_PAGE_KEY).await.unwrap().as_deref(),
        Some("about")
    );
    assert_eq!(store.get_item("other").await.unwrap(), None);
}

// the file store survives being reopened, like storage surviving a reload
#[tokio::test]
async fn test_json_file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let store = JsonFileStateStore::new(path.clone());
    assert_eq!(store.get_item(LAST_PAGE_KEY).await.unwrap(), None);
    store.set_item(LAST_PAGE_KEY, "gallery").await.unwrap();
    store.set_item("theme", "dark").await.unwrap();

    let reopened = JsonFileStateStore::new(path.clone());
    assert_eq!(
        reopened.get_item(LAST_PAGE_KEY).await.unwrap().as_deref(),
        Some("gallery")
    );

    let raw = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed["lastPage"], "gallery");
    assert_eq!(parsed["theme"], "dark");
}

#[tokio::test]
async fn test_json_file_store_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "not json").unwrap();

    let store = JsonFileStateStore::new(path);
    assert!(store.get_item(LAST_PAGE_KEY).await.is_err());
}
