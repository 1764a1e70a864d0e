//! Core types and shared functionality for the kagi CLI.
//!
//! This crate provides:
//! - Answer and reference types returned by FastGPT
//! - Query resolution from arguments or standard input
//! - Markdown formatting of answers
//! - Write-only answer cache keyed by question fingerprint
//! - Unified error types
//! - Configuration structures

pub mod answer;
pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod input;

pub use answer::{Answer, Reference};
pub use cache::{CacheEntry, CacheWriter, fingerprint};
pub use config::{AppConfig, ConfigError, ConfigOverrides};
pub use error::Error;
pub use format::{collapse_blank_lines, format_answer};
pub use input::{Query, resolve_query};
