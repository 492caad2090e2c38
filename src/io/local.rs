use crate::error::{FetchError, FetchFailure};
use crate::io::{verify_fragment_path, FragmentSource};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Serves fragments straight from a site directory on disk.
pub struct LocalFragmentSource {
    pub root_path: PathBuf,
}

impl LocalFragmentSource {
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }
}

#[async_trait]
impl FragmentSource for LocalFragmentSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let verified = verify_fragment_path(&self.root_path, url)?;

        match tokio::fs::read_to_string(&verified).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(FetchError::new(url, FetchFailure::NotFound))
            }
            Err(e) => Err(FetchError::transport(url, e)),
        }
    }
}
