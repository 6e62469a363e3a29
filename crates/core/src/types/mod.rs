//! Core value types for Stride.
//!
//! Type-safe wrappers for identifiers and validated strings, plus the money
//! helpers shared by the cart and checkout.

pub mod email;
pub mod id;
pub mod money;
pub mod slug;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::{round_money, sum_money};
pub use slug::{Slug, SlugError};
