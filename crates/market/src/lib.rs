//! Craftify marketplace library.
//!
//! Storage, domain store, seed routine, router, views and the event-driven
//! runtime for the handcrafted art marketplace. The CLI and the scenario
//! tests drive it through [`app::App`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod chrome;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod media;
pub mod models;
pub mod notice;
pub mod router;
pub mod seed;
pub mod storage;
pub mod timers;
pub mod views;
