//! Pustaka Core - Shared types library.
//!
//! This crate provides the common types used by the Pustaka storefront:
//! catalog item identities and the price-normalization layer.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for identities and raw price values

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
