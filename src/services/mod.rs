pub mod cache;
pub mod fetcher;
pub mod loader;

pub use self::cache::TextCache;
pub use self::fetcher::FragmentFetcher;
pub use self::loader::load_fragment;
