//! # pairrank Common Library
//!
//! The ranking engine shared by the pairrank services:
//! - Partial-order store with incremental transitive closure
//! - Ranking driver (next-pair selection and display ordering)
//! - Session records and the comparison-submission state machine
//! - Content hashing, token generation, configuration resolution
//!
//! This crate has no HTTP dependencies; the serving layer lives in
//! `pairrank-ui`.

pub mod config;
pub mod driver;
pub mod error;
pub mod model;
pub mod poset;
pub mod session;
pub mod token;

pub use error::{Error, Result};
pub use poset::{Comparison, Poset};
