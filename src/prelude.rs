//! Prelude module for masked_date crate.
//!
//! Re-exports the derive_more macros used for display-only enums and dates.

pub use derive_more::Display;
