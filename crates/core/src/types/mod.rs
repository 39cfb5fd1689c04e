//! Core types for Shoe World.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod email;
pub mod id;
pub mod price;
pub mod role;
pub mod username;

pub use category::ShoeCategory;
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use role::UserRole;
pub use username::{Username, UsernameError};
