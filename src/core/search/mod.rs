//! Search module for exact-token document lookup.
//!
//! Queries match title tokens exactly (no stemming, no ranking). Within a
//! query all tokens must match; within a facet list any name may match.

mod index;
mod query;

pub use index::SearchIndex;
pub use query::{tokenize, unique_tokens};
