//! Stride Core - catalog, cart and checkout logic.
//!
//! This crate holds the storefront's domain types and the pure functions that
//! operate on them. It is shared by:
//! - `storefront` - JSON API binary (store, sessions, HTTP)
//! - `cli` - Command-line access to the catalog pipeline
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no locks,
//! no HTTP. Every operation takes its inputs by reference or by value and
//! returns a new value, so callers can run them repeatedly or in parallel.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, slugs, emails and money helpers
//! - [`catalog`] - Products, categories, team members and the effective price rule
//! - [`query`] - Filter/sort/paginate pipeline
//! - [`cart`] - Cart lines and aggregation
//! - [`checkout`] - Subtotal, tax and total computation
//! - [`search`] - Free-text product search

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod query;
pub mod search;
pub mod types;

pub use cart::{Cart, CartError, CartLine, LineKey, MAX_LINE_QUANTITY};
pub use catalog::{
    Category, NewCategory, NewProduct, NewTeamMember, Pricing, PricingError, Product,
    ProductPatch, ProductSnapshot, TeamMember,
};
pub use checkout::{CheckoutSummary, TAX_RATE};
pub use query::{
    CatalogPage, CatalogQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PriceRange, QueryError, SortKey,
    paginate,
};
pub use search::search;
pub use types::*;
