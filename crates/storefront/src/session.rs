//! Session composition root.
//!
//! One `Session` is constructed at session start and owns the catalog
//! client and both stores; presentation receives it by reference. Store
//! state lives exactly as long as the session - nothing is persisted.
//! There is no global singleton: whoever builds the session owns its
//! lifecycle.

use std::time::Duration;

use tracing::{debug, warn};

use crate::browser::CatalogBrowser;
use crate::cart::CartStore;
use crate::catalog::types::{Book, BookFilters};
use crate::catalog::{CatalogClient, CatalogError};
use crate::config::CatalogConfig;
use crate::wishlist::WishlistStore;

/// Delay before the single featured-book retry.
const FEATURED_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Per-session state: catalog client plus cart and wishlist stores.
pub struct Session {
    catalog: CatalogClient,
    cart: CartStore,
    wishlist: WishlistStore,
}

impl Session {
    /// Create a session against the given catalog deployment.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            catalog: CatalogClient::new(config),
            cart: CartStore::new(),
            wishlist: WishlistStore::new(),
        }
    }

    /// The catalog API client.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    pub const fn wishlist_mut(&mut self) -> &mut WishlistStore {
        &mut self.wishlist
    }

    /// Load the featured (random) book for the hero section.
    ///
    /// A swallowed failure (`Ok(None)` from the client) gets one delayed
    /// re-attempt; a second miss yields `None` and the caller renders
    /// nothing. HTTP-status errors propagate as usual.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Status` when the endpoint answers with a
    /// non-success status.
    pub async fn featured(
        &self,
        filters: Option<&BookFilters>,
    ) -> Result<Option<Book>, CatalogError> {
        if let Some(book) = self.catalog.fetch_random(filters).await? {
            return Ok(Some(book));
        }

        warn!("featured book fetch failed, retrying once");
        tokio::time::sleep(FEATURED_RETRY_DELAY).await;

        let retried = self.catalog.fetch_random(filters).await?;
        if retried.is_none() {
            debug!("featured book retry came back empty");
        }
        Ok(retried)
    }

    /// Build and fill a static browser over the default superset.
    ///
    /// # Errors
    ///
    /// Propagates any page-fetch failure (all-or-nothing).
    pub async fn browse_static(&self, viewport_width: u32) -> Result<CatalogBrowser, CatalogError> {
        let mut browser = CatalogBrowser::static_paged(viewport_width);
        browser.apply_superset(self.catalog.fetch_all().await?);
        Ok(browser)
    }

    /// Build a server-paged browser and load its first page.
    ///
    /// # Errors
    ///
    /// Propagates the page-fetch failure.
    pub async fn browse_server(&self, viewport_width: u32) -> Result<CatalogBrowser, CatalogError> {
        let mut browser = CatalogBrowser::server_paged(viewport_width);
        browser.apply_page(self.catalog.fetch_page(1).await?);
        Ok(browser)
    }
}
