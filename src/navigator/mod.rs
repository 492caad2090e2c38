pub mod transition;

pub use self::transition::{Phase, Ticket, TransitionMachine};

use crate::browser::{History, HistoryState, StateStore, LAST_PAGE_KEY};
use crate::config::RouterConfig;
use crate::dom::{Document, ScrollBehavior, CONTENT_SELECTOR};
use crate::lock;
use crate::messages::PAGE_LOAD_FAILED;
use crate::routes::{RouteTable, PAGE_PARAM};
use crate::scripts::PageScripts;
use crate::services::FragmentFetcher;
use crate::wiring::set_active_nav;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigateOptions {
    pub push_history: bool,
}

impl NavigateOptions {
    pub fn push() -> Self {
        Self { push_history: true }
    }

    pub fn replace() -> Self {
        Self {
            push_history: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    Loaded,
    /// The fragment could not be fetched; the failure message is showing.
    Failed,
    /// A newer navigation began before this one could swap content.
    Superseded,
}

/// Swaps the content region between routes.
///
/// `navigate` is the single entry point; clicks and history traversal are
/// adapted onto it by [`crate::wiring`].
pub struct Navigator {
    config: Arc<RouterConfig>,
    routes: Arc<RouteTable>,
    fetcher: Arc<FragmentFetcher>,
    document: Arc<Mutex<Document>>,
    history: Arc<Mutex<History>>,
    store: Arc<dyn StateStore>,
    scripts: PageScripts,
    transition: Mutex<TransitionMachine>,
    current_route: Mutex<Option<String>>,
}

impl Navigator {
    pub fn new(
        config: Arc<RouterConfig>,
        routes: Arc<RouteTable>,
        fetcher: Arc<FragmentFetcher>,
        document: Arc<Mutex<Document>>,
        history: Arc<Mutex<History>>,
        store: Arc<dyn StateStore>,
    ) -> Self {
        let scripts = PageScripts::new(config.alert_hide);
        Self {
            config,
            routes,
            fetcher,
            document,
            history,
            store,
            scripts,
            transition: Mutex::new(TransitionMachine::new()),
            current_route: Mutex::new(None),
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn scripts(&self) -> &PageScripts {
        &self.scripts
    }

    pub fn document(&self) -> &Arc<Mutex<Document>> {
        &self.document
    }

    pub fn history(&self) -> &Arc<Mutex<History>> {
        &self.history
    }

    pub fn phase(&self) -> Phase {
        lock(&self.transition).phase()
    }

    pub fn superseded_count(&self) -> u64 {
        lock(&self.transition).superseded_count()
    }

    /// Route of the content currently on screen, once anything has loaded.
    pub fn current_route(&self) -> Option<String> {
        lock(&self.current_route).clone()
    }

    pub async fn navigate(&self, route_key: &str, options: NavigateOptions) -> NavigationOutcome {
        let path = self.routes.path_for(route_key).to_string();

        if let Err(e) = self.store.set_item(LAST_PAGE_KEY, route_key).await {
            warn!("Navigator: could not persist last page: {:#}", e);
        }

        let ticket = lock(&self.transition).begin();
        debug!("Navigator: {} -> {} ({})", ticket, route_key, path);
        {
            let mut doc = lock(&self.document);
            doc.set_transition(CONTENT_SELECTOR, &self.config.transition_css());
            doc.set_opacity(CONTENT_SELECTOR, 0.0);
        }

        tokio::time::sleep(self.config.fade_out).await;

        if !lock(&self.transition).start_loading(ticket) {
            debug!("Navigator: {} superseded before loading", ticket);
            return NavigationOutcome::Superseded;
        }

        match self.fetcher.fetch_text(&path).await {
            Ok(html) => {
                if !lock(&self.transition).start_fade_in(ticket) {
                    debug!("Navigator: {} superseded, dropping {}", ticket, path);
                    return NavigationOutcome::Superseded;
                }
                self.swap_in(route_key, &html, options);

                // let the swapped content render at opacity 0 before fading in
                tokio::task::yield_now().await;

                if lock(&self.transition).finish(ticket) {
                    lock(&self.document).set_opacity(CONTENT_SELECTOR, 1.0);
                }
                info!("Navigator: showing '{}'", route_key);
                NavigationOutcome::Loaded
            }
            Err(e) => {
                if !lock(&self.transition).fail(ticket) {
                    return NavigationOutcome::Superseded;
                }
                warn!("Navigator: {}", e);
                let mut doc = lock(&self.document);
                doc.set_inner_html(CONTENT_SELECTOR, PAGE_LOAD_FAILED);
                doc.set_opacity(CONTENT_SELECTOR, 1.0);
                NavigationOutcome::Failed
            }
        }
    }

    fn swap_in(&self, route_key: &str, html: &str, options: NavigateOptions) {
        let mut doc = lock(&self.document);
        doc.set_inner_html(CONTENT_SELECTOR, html);

        let location = {
            let mut history = lock(&self.history);
            if options.push_history {
                let url = format!("index.html?{}={}", PAGE_PARAM, route_key);
                if let Err(e) = history.push_state(
                    HistoryState {
                        page: route_key.to_string(),
                    },
                    &url,
                ) {
                    warn!("Navigator: {:#}", e);
                }
            }
            history.location().clone()
        };

        doc.scroll_to(0.0, ScrollBehavior::Smooth);
        doc.observe_reveal(CONTENT_SELECTOR, self.config.reveal_threshold);
        self.scripts.attach(&doc, CONTENT_SELECTOR);

        *lock(&self.current_route) = Some(route_key.to_string());
        // unknown keys display home, so home's links are the active ones
        let shown = self.routes.resolve_route(Some(route_key));
        set_active_nav(&mut doc, &location, &shown);
    }
}
