//! Cart retrieval and display
//!
//! This crate fetches the storefront cart from the backend API named in the
//! configuration and renders the raw response.

pub mod client;
pub mod display;
pub mod source;

pub use client::*;
pub use display::*;
pub use source::*;
