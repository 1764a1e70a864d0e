//! Write-only answer cache.
//!
//! Each answered question is stored as `{dir}/{fingerprint}.json` holding a
//! [`CacheEntry`]. Entries are never read back; a later answer for the same
//! question (or a colliding fingerprint) overwrites the file.

pub mod hash;
pub mod writer;

pub use hash::{FINGERPRINT_LEN, fingerprint};
pub use writer::{CacheEntry, CacheWriter};
