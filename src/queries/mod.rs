//! Query modules for the value tracker.
//!
//! Each module provides a query struct that borrows from the
//! [`ItemStore`](crate::store::ItemStore) and exposes methods returning
//! `Result<T>` with plain model values.

pub mod items;

pub use items::{ItemQuery, SearchItemsParams};
