use crate::browser::PopStateEvent;
use crate::dom::{Document, Element, NodeRef};
use crate::lock;
use crate::navigator::{NavigateOptions, NavigationOutcome, Navigator};
use crate::routes::{href_page, HOME};
use reqwest::Url;
use tracing::debug;

/// Marks anchors the router handles itself.
pub const NAV_LINK_ATTR: &str = "data-link";
pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click was taken over and routed.
    Routed(NavigationOutcome),
    /// Not an in-app link; the browser default would run.
    Ignored,
}

fn is_nav_link(el: &Element) -> bool {
    el.tag == "a" && el.has_attr(NAV_LINK_ATTR)
}

/// Click adapter: routes clicks on or inside an `a[data-link]` whose href
/// names a known page.
pub async fn handle_click(navigator: &Navigator, target: &NodeRef) -> ClickOutcome {
    let page = {
        let doc = lock(navigator.document());
        let Some(anchor) = doc.closest(target, is_nav_link) else {
            return ClickOutcome::Ignored;
        };
        let href = doc
            .element(&anchor)
            .and_then(|el| el.attr("href"))
            .unwrap_or_default()
            .to_string();
        let location = lock(navigator.history()).location().clone();

        match href_page(&href, &location) {
            Ok(Some(page)) if !page.is_empty() && navigator.routes().contains(&page) => page,
            Ok(_) => return ClickOutcome::Ignored,
            Err(e) => {
                debug!("Wiring: ignoring click: {:#}", e);
                return ClickOutcome::Ignored;
            }
        }
    };

    ClickOutcome::Routed(navigator.navigate(&page, NavigateOptions::push()).await)
}

/// Popstate adapter: the entry's state wins, the URL is the fallback.
/// The browser already moved through history, so nothing is pushed.
pub async fn handle_pop_state(navigator: &Navigator, event: PopStateEvent) -> NavigationOutcome {
    let page = match event.state {
        Some(state) => state.page,
        None => {
            let location = lock(navigator.history()).location().clone();
            navigator.routes().current_page_from_url(&location)
        }
    };
    navigator.navigate(&page, NavigateOptions::replace()).await
}

/// Adds `active` to every nav link pointing at `page` and removes it from the
/// rest. A link without a `page` parameter points at home. Links whose href
/// does not parse are left untouched.
pub fn set_active_nav(doc: &mut Document, location: &Url, page: &str) {
    let current = if page.is_empty() { HOME } else { page };

    for node in doc.query_document(is_nav_link) {
        let Some(href) = doc.element(&node).map(|el| el.attr("href").unwrap_or_default().to_string())
        else {
            continue;
        };
        let Ok(target) = href_page(&href, location) else {
            continue;
        };
        let target = target.filter(|p| !p.is_empty());
        let target = target.as_deref().unwrap_or(HOME);

        if let Some(el) = doc.element_mut(&node) {
            if target == current {
                el.add_class(ACTIVE_CLASS);
            } else {
                el.remove_class(ACTIVE_CLASS);
            }
        }
    }
}
