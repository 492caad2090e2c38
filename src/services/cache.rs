use std::collections::HashMap;
use tokio::sync::RwLock;

// exists so repeated navigations to the same fragment never hit the source twice.
// entries live as long as the cache does; there is no eviction.
#[derive(Default)]
pub struct TextCache {
    entries: RwLock<HashMap<String, String>>,
}

impl TextCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, url: &str) -> Option<String> {
        let guard = self.entries.read().await;
        guard.get(url).cloned()
    }

    pub async fn set(&self, url: &str, text: String) {
        let mut guard = self.entries.write().await;
        guard.insert(url.to_string(), text);
    }

    pub async fn contains(&self, url: &str) -> bool {
        self.entries.read().await.contains_key(url)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
