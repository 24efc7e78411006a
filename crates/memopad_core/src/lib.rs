//! # Memopad Core
//!
//! Core document model for memopad.
//!
//! This crate provides:
//! - The [`Page`] and [`Document`] types
//! - Payload sanitization for untrusted cache/remote data
//! - The canonical serialized form used for replica comparison
//!
//! ## Invariants
//!
//! - A document always holds between [`MIN_PAGES`] and [`MAX_PAGES`] pages
//! - The selected index is always within bounds
//! - Sanitization never fails: any input shape yields a valid document

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod document;
mod error;
mod page;
mod payload;

pub use document::{Document, MAX_PAGES, MIN_PAGES};
pub use error::{CoreError, CoreResult};
pub use page::Page;
pub use payload::DocumentPayload;
