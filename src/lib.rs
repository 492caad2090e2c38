//! Headless fragment loader and history-aware router for static sites.
//!
//! A [`site::Site`] loads the header and footer fragments into the shell
//! document, then swaps the `#content` region between routes through the
//! [`navigator::Navigator`], keeping history and the persisted last page in
//! step. Fragments come from a [`io::FragmentSource`] behind a shared
//! [`services::TextCache`].

pub mod browser;
pub mod config;
pub mod dom;
pub mod error;
pub mod io;
pub mod messages;
pub mod navigator;
pub mod routes;
pub mod scripts;
pub mod services;
pub mod site;
pub mod wiring;

#[cfg(test)]
mod tests;

use std::sync::{Mutex, MutexGuard, PoisonError};

// a panicked holder leaves the document in a usable state, so poisoning is ignored
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
