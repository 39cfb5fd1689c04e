//! Domain models for storefront.

pub mod cart;
pub mod session;

pub use cart::{Cart, CartLine};
pub use session::CurrentUser;
pub use session::keys as session_keys;
