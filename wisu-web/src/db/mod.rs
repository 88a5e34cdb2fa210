//! Database access layer for wisu-web
//!
//! One module per collection, each with typed save/load functions.
//! Schema creation lives in wisu-common.

pub mod analytics;
pub mod comments;
pub mod ideas;
pub mod profiles;
pub mod questions;
pub mod visitors;
pub mod votes;
