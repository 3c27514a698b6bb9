//! Unified error handling for the storefront.
//!
//! Store mutations are total functions and never fail; everything that
//! can go wrong comes from configuration or the catalog API, so
//! `AppError` is a thin union over those layers. Callers surface these
//! as a retry affordance plus an empty-state message.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Whether retrying the same operation could plausibly succeed.
    ///
    /// Transport failures and non-success statuses are transient for
    /// this backend; configuration errors are not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Catalog(CatalogError::Http(_) | CatalogError::Status(_))
        )
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
