//! # Memopad Store
//!
//! Local cache backends for memopad.
//!
//! This crate provides the lowest-level persistence abstraction: cache
//! backends are **opaque string key-value stores** that do not interpret
//! the values they hold. The document-aware layer on top is
//! [`DocumentCache`], which owns the two cache keys and handles lenient
//! loading.
//!
//! ## Available Backends
//!
//! - [`MemoryBackend`] - For testing and ephemeral use
//! - [`FileBackend`] - One file per key under a root directory
//!
//! ## Example
//!
//! ```rust
//! use memopad_store::{CacheBackend, MemoryBackend};
//!
//! let backend = MemoryBackend::new();
//! backend.set("pages", "[]").unwrap();
//! assert_eq!(backend.get("pages").unwrap().as_deref(), Some("[]"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod cache;
mod error;
mod file;
mod memory;

pub use backend::CacheBackend;
pub use cache::{DocumentCache, INDEX_KEY, PAGES_KEY};
pub use error::{StoreError, StoreResult};
pub use file::FileBackend;
pub use memory::MemoryBackend;
