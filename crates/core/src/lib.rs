//! Shoe World Core - Shared types library.
//!
//! This crate provides common types used across the Shoe World components:
//! - `storefront` - Public-facing shop with the built-in admin form
//! - `integration-tests` - End-to-end test harness
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no framework
//! dependencies. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, usernames,
//!   emails, categories, and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
