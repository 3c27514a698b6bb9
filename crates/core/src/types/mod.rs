//! Core types for Pustaka.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;

pub use id::BookId;
pub use price::{RawPrice, format_grouped, normalize_price};
