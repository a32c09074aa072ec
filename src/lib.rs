//! Trolley
//!
//! Trolley is a shopping cart state manager: a product catalog, a cart that
//! survives restarts through a key-value store, optional analytics events for
//! cart additions and purchases, and a terminal front end.

pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod manager;
pub mod observability;
pub mod prelude;
pub mod presentation;
pub mod products;
pub mod receipt;
pub mod session;
pub mod storage;
