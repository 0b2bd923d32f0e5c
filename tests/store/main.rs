//! Collection Store Integration Tests
//!
//! Exercises the store through the `Mojibox` facade over shared in-memory
//! backends, with a manual clock for decay and cache expiry.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test store
//! cargo test --test store usage::
//! ```

#[path = "../common/mod.rs"]
mod common;

mod mutations;
mod ungrouped;
mod usage;
