//! Admin panel API client
//!
//! Async client for the product/firm/user admin API, plus the column sets
//! and display formatting used to show its data in paged tables.

pub mod cache;
pub mod columns;
pub mod error;
pub mod format;
pub mod model;
pub mod response;
pub mod source;

mod client;

pub use client::*;
pub use response::CacheStatus;
pub use response::Response;
pub use source::ProductSource;
