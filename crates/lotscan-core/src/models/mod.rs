//! Data models for auction lot extraction.

pub mod config;
pub mod record;
