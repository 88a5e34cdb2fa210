//! # WiSu Common Library
//!
//! Shared code for the WiSu (wiki survey) service including:
//! - Database initialization, schema, and typed records
//! - Configuration loading and root folder resolution
//! - Sentiment analysis (trait + shipped lexicon analyzer)
//! - Common error types

pub mod config;
pub mod db;
pub mod error;
pub mod sentiment;

pub use error::{Error, Result};
pub use sentiment::{Sentiment, SentimentAnalyzer, SentimentLabel};
