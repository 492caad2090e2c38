use crate::error::{FetchError, FetchFailure};
use anyhow::Result;
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

pub mod http;
pub mod local;

pub use self::http::HttpFragmentSource;
pub use self::local::LocalFragmentSource;

// where fragments come from. the fetcher wraps one of these with the text cache,
// so implementations never cache on their own.
#[async_trait]
pub trait FragmentSource: Send + Sync {
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError>;
}

/// Picks the source for a site root: `http(s)://` origins go over the network,
/// anything else is treated as a local directory.
pub fn source_for_root(site_root: &str) -> Result<Box<dyn FragmentSource>> {
    if site_root.starts_with("http://") || site_root.starts_with("https://") {
        Ok(Box::new(HttpFragmentSource::new(site_root)?))
    } else {
        Ok(Box::new(LocalFragmentSource::new(PathBuf::from(site_root))))
    }
}

// turn a fragment url ("pages/about.html?v=2") into a path under root.
// query strings and fragments are dropped; climbing above root is refused.
pub fn verify_fragment_path(root: &Path, url: &str) -> std::result::Result<PathBuf, FetchError> {
    let bare = url.split(['?', '#']).next().unwrap_or_default();
    let relative = Path::new(bare.trim_start_matches('/'));

    let mut depth: usize = 0;
    let mut verified = root.to_path_buf();
    for component in relative.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return Err(FetchError::new(url, FetchFailure::OutsideRoot));
                }
                depth -= 1;
                verified.pop();
            }
            Component::Normal(part) => {
                depth += 1;
                verified.push(part);
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(FetchError::new(url, FetchFailure::OutsideRoot));
            }
        }
    }

    if depth == 0 {
        return Err(FetchError::new(url, FetchFailure::NotFound));
    }

    Ok(verified)
}
