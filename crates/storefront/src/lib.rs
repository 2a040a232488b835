//! Marktstand storefront client core.
//!
//! This crate holds the state the storefront views share: the session
//! (who is logged in, with which capabilities) and the shopping cart,
//! both kept consistent with a persisted per-profile store so a restart
//! reconstructs identical state. Views are thin consumers; they receive
//! an [`state::AppState`] by value and never own state of their own.
//!
//! # Architecture
//!
//! - [`store`] - per-profile key/value persistence boundary
//! - [`session`] - authentication and capability flags
//! - [`cart`] - ordered cart lines, synchronized with the store on every mutation
//! - [`guard`] - capability check gating admin-only views
//! - [`description`] - parser/renderer for the delimited product description format
//! - [`api`] - async client for the remote storefront API (auth, products, orders)
//! - [`state`] - root-scope container wiring the above together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod config;
pub mod description;
pub mod error;
pub mod guard;
pub mod session;
pub mod state;
pub mod store;
