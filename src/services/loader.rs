use crate::dom::{Document, FOOTER_SELECTOR};
use crate::lock;
use crate::messages::fragment_load_failed;
use crate::services::fetcher::FragmentFetcher;
use chrono::Datelike;
use std::sync::Mutex;
use tracing::{debug, warn};

pub const YEAR_ID: &str = "year";

/// Loads `url` into the region at `selector`. Never fails: a missing region is
/// a no-op and a failed fetch turns into an inline error block.
pub async fn load_fragment(
    fetcher: &FragmentFetcher,
    document: &Mutex<Document>,
    selector: &str,
    url: &str,
) {
    if !lock(document).has_region(selector) {
        warn!("Loader: no region matches {}, skipping {}", selector, url);
        return;
    }

    match fetcher.fetch_text(url).await {
        Ok(html) => {
            let mut doc = lock(document);
            doc.set_inner_html(selector, &html);
            if selector == FOOTER_SELECTOR {
                stamp_year(&mut doc, selector);
            }
            debug!("Loader: {} <- {}", selector, url);
        }
        Err(e) => {
            warn!("Loader: {}", e);
            lock(document).set_inner_html(selector, &fragment_load_failed(url));
        }
    }
}

fn stamp_year(doc: &mut Document, selector: &str) {
    let Some(node) = doc.find_by_id(selector, YEAR_ID) else {
        return;
    };
    let year = chrono::Local::now().year();
    if let Some(el) = doc.element_mut(&node) {
        el.set_text(year.to_string());
    }
}
