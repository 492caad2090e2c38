
mod api_http_source;
mod integration_fragment_loader;
mod unit_history_storage;
mod unit_text_cache_fetcher;
mod unit_transition;
