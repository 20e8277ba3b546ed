//! Data models for extracted deeds and configuration.

pub mod config;
pub mod record;
