//! # Memopad Server
//!
//! Reference in-memory remote store for memopad.
//!
//! The remote store is a single last-writer-wins replica of the document
//! behind two HTTP verbs: `GET` returns the current payload, `POST`
//! replaces it. This crate implements those semantics without an HTTP
//! stack; embed it behind whatever listener you like, or behind the sync
//! crate's loopback client in tests.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod server;

pub use error::{ServerError, ServerResult};
pub use server::MemoServer;
