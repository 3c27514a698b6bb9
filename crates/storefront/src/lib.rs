//! Pustaka Storefront library.
//!
//! The data layer behind the Pustaka book-shopping storefront: a client
//! for the remote catalog API, in-memory cart and wishlist stores, and
//! the pagination model driving the catalog browser. The presentation
//! layer consumes this crate; no routes or rendering live here.
//!
//! # Architecture
//!
//! - [`catalog`] - Catalog API client; normalizes the inconsistent
//!   response envelopes the backend has been observed to return
//! - [`cart`] / [`wishlist`] - per-session in-memory stores, keyed by
//!   item identity, mutated synchronously by user actions
//! - [`browser`] - viewport-driven pagination state machine
//! - [`session`] - composition root owning the client and both stores

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod browser;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod session;
pub mod wishlist;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize tracing with an `EnvFilter`.
///
/// Defaults to info level for this crate if `RUST_LOG` is not set.
/// Intended to be called once by the embedding application.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pustaka_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
