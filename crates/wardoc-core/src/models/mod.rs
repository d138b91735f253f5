//! Data models for extraction requests, results, and configuration.

pub mod config;
pub mod document;
