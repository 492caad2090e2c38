use crate::browser::{History, JsonFileStateStore, StateStore, LAST_PAGE_KEY};
use crate::config::RouterConfig;
use crate::dom::{Document, NodeRef, FOOTER_SELECTOR, HEADER_SELECTOR};
use crate::io::{source_for_root, FragmentSource};
use crate::lock;
use crate::navigator::{NavigateOptions, NavigationOutcome, Navigator};
use crate::routes::RouteTable;
use crate::scripts::SubmitOutcome;
use crate::services::{load_fragment, FragmentFetcher, TextCache};
use crate::wiring::{handle_click, handle_pop_state, ClickOutcome};
use anyhow::{Context, Result};
use reqwest::Url;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

pub const HEADER_URL: &str = "header.html";
pub const FOOTER_URL: &str = "footer.html";

/// One headless page session: the shell document, its history, the
/// navigator and the event adapters in front of it.
pub struct Site {
    config: Arc<RouterConfig>,
    fetcher: Arc<FragmentFetcher>,
    store: Arc<dyn StateStore>,
    navigator: Navigator,
    handlers_wired: AtomicBool,
}

impl Site {
    pub fn new(
        config: Arc<RouterConfig>,
        source: Box<dyn FragmentSource>,
        store: Arc<dyn StateStore>,
        routes: RouteTable,
    ) -> Result<Self> {
        Self::with_cache(config, source, store, routes, Arc::new(TextCache::new()))
    }

    /// Like [`Site::new`] but sharing an existing text cache.
    pub fn with_cache(
        config: Arc<RouterConfig>,
        source: Box<dyn FragmentSource>,
        store: Arc<dyn StateStore>,
        routes: RouteTable,
        cache: Arc<TextCache>,
    ) -> Result<Self> {
        let entry = Url::parse(&config.entry_url)
            .with_context(|| format!("Invalid entry url {}", config.entry_url))?;

        let fetcher = Arc::new(FragmentFetcher::new(source, cache));
        let document = Arc::new(Mutex::new(Document::shell()));
        let history = Arc::new(Mutex::new(History::new(entry)));
        let navigator = Navigator::new(
            config.clone(),
            Arc::new(routes),
            fetcher.clone(),
            document,
            history,
            store.clone(),
        );

        Ok(Self {
            config,
            fetcher,
            store,
            navigator,
            handlers_wired: AtomicBool::new(false),
        })
    }

    /// Builds a session from configuration: source from the site root, the
    /// JSON state file, and the route table file when one is configured.
    pub async fn from_config(config: Arc<RouterConfig>) -> Result<Self> {
        let source = source_for_root(&config.site_root)?;
        let store: Arc<dyn StateStore> = Arc::new(JsonFileStateStore::new(config.state_path.clone()));
        let routes = match &config.routes_file {
            Some(path) => RouteTable::from_json_file(path).await?,
            None => RouteTable::default(),
        };
        Self::new(config, source, store, routes)
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn fetcher(&self) -> &FragmentFetcher {
        &self.fetcher
    }

    pub fn routes(&self) -> &RouteTable {
        self.navigator.routes()
    }

    pub fn document(&self) -> &Arc<Mutex<Document>> {
        self.navigator.document()
    }

    /// Runs `f` against the document under its lock.
    pub fn with_document<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        f(&mut lock(self.document()))
    }

    pub fn location(&self) -> Url {
        lock(self.navigator.history()).location().clone()
    }

    pub fn history(&self) -> History {
        lock(self.navigator.history()).clone()
    }

    pub fn current_page_from_url(&self) -> String {
        self.routes().current_page_from_url(&self.location())
    }

    /// Header, footer, event wiring, then the initial page: the persisted
    /// route if it is still known, otherwise the one in the URL.
    pub async fn init(&self) -> NavigationOutcome {
        self.load_fragment(HEADER_SELECTOR, HEADER_URL).await;
        self.load_fragment(FOOTER_SELECTOR, FOOTER_URL).await;
        self.attach_global_handlers();

        let saved = match self.store.get_item(LAST_PAGE_KEY).await {
            Ok(saved) => saved,
            Err(e) => {
                warn!("Site: could not read last page: {:#}", e);
                None
            }
        };
        let initial = match saved {
            Some(page) if !page.is_empty() && self.routes().contains(&page) => page,
            _ => self.current_page_from_url(),
        };

        info!("Site: initial page '{}'", initial);
        self.navigator
            .navigate(&initial, NavigateOptions::replace())
            .await
    }

    pub async fn load_fragment(&self, selector: &str, url: &str) {
        load_fragment(&self.fetcher, self.document(), selector, url).await;
    }

    /// Wires the click and popstate adapters. Returns false if already wired.
    pub fn attach_global_handlers(&self) -> bool {
        !self.handlers_wired.swap(true, Ordering::SeqCst)
    }

    pub fn handlers_wired(&self) -> bool {
        self.handlers_wired.load(Ordering::SeqCst)
    }

    pub async fn navigate(&self, route_key: &str, options: NavigateOptions) -> NavigationOutcome {
        self.navigator.navigate(route_key, options).await
    }

    /// Dispatches a click on `target` through the delegated body handler.
    pub async fn click(&self, target: &NodeRef) -> ClickOutcome {
        if !self.handlers_wired() {
            return ClickOutcome::Ignored;
        }
        handle_click(&self.navigator, target).await
    }

    /// History back; `None` when already at the first entry.
    pub async fn back(&self) -> Option<NavigationOutcome> {
        let event = lock(self.navigator.history()).back()?;
        if !self.handlers_wired() {
            return None;
        }
        Some(handle_pop_state(&self.navigator, event).await)
    }

    pub async fn forward(&self) -> Option<NavigationOutcome> {
        let event = lock(self.navigator.history()).forward()?;
        if !self.handlers_wired() {
            return None;
        }
        Some(handle_pop_state(&self.navigator, event).await)
    }

    pub fn attach_page_scripts(&self, root: &str) -> bool {
        let doc = lock(self.document());
        self.navigator.scripts().attach(&doc, root)
    }

    pub fn submit(&self, form: &NodeRef) -> SubmitOutcome {
        self.navigator.scripts().submit(self.document(), form)
    }
}
