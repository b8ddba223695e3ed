//! Data models for certificate extraction.

pub mod config;
pub mod record;
