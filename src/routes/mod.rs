use anyhow::{bail, Context, Result};
use reqwest::Url;
use std::collections::BTreeMap;
use std::path::Path;

pub const HOME: &str = "home";
pub const PAGE_PARAM: &str = "page";

const BUILT_IN_ROUTES: [(&str, &str); 6] = [
    ("", "pages/home.html"),
    ("home", "pages/home.html"),
    ("about", "pages/about.html"),
    ("services", "pages/services.html"),
    ("gallery", "pages/gallery.html"),
    ("contact", "pages/contact.html"),
];

/// Maps route keys to fragment paths. Fixed once built.
///
/// Always contains [`HOME`] and the empty alias for it, so every lookup has
/// somewhere to land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: BTreeMap<String, String>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            routes: BUILT_IN_ROUTES
                .iter()
                .map(|(key, path)| (key.to_string(), path.to_string()))
                .collect(),
        }
    }
}

impl RouteTable {
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut routes: BTreeMap<String, String> = entries
            .into_iter()
            .map(|(key, path)| (key.into(), path.into()))
            .collect();

        let Some(home_path) = routes.get(HOME).cloned() else {
            bail!("Route table has no '{}' entry", HOME);
        };
        routes.entry(String::new()).or_insert(home_path);

        Ok(Self { routes })
    }

    /// Loads a JSON object of `route -> fragment path`.
    pub async fn from_json_file(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read route table {}", path.display()))?;
        let entries: BTreeMap<String, String> = serde_json::from_str(&raw)
            .with_context(|| format!("Route table {} is not a JSON object of strings", path.display()))?;
        Self::from_entries(entries)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.routes.contains_key(key)
    }

    /// Fragment path for `key`, falling back to the home fragment.
    pub fn path_for(&self, key: &str) -> &str {
        self.routes
            .get(key)
            .or_else(|| self.routes.get(HOME))
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.routes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// A non-empty key present in the table maps to itself; anything else is home.
    pub fn resolve_route(&self, raw: Option<&str>) -> String {
        match raw {
            Some(key) if !key.is_empty() && self.contains(key) => key.to_string(),
            _ => HOME.to_string(),
        }
    }

    pub fn current_page_from_url(&self, location: &Url) -> String {
        self.resolve_route(page_param(location).as_deref())
    }
}

pub fn page_param(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(name, _)| name == PAGE_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// The `page` parameter an anchor's href points at, resolved against the
/// origin of `location`. `Ok(None)` for links without one; `Err` for hrefs
/// that do not parse.
pub fn href_page(href: &str, location: &Url) -> Result<Option<String>> {
    let origin = location
        .join("/")
        .with_context(|| format!("Location {} has no usable origin", location))?;
    let target = origin
        .join(href)
        .with_context(|| format!("Malformed link target {}", href))?;
    Ok(page_param(&target))
}
