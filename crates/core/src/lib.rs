//! Craftify Core - Shared types library.
//!
//! This crate provides common types used across all Craftify components:
//! - `market` - The marketplace runtime (store, router, views)
//! - `cli` - Command-line driver over a file-backed store
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no rendering. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
