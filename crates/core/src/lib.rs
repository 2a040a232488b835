//! Marktstand Core - Shared types library.
//!
//! This crate provides common types used across all Marktstand components:
//! - `storefront` - Client-side storefront core (session, cart, catalog)
//! - `admin` - Admin panel API client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
