//! # Memopad Sync
//!
//! Remote replication and the session controller for memopad.
//!
//! This crate provides:
//! - Session state machine (loading → locked → ready)
//! - [`MemoSyncController`]: owns the in-memory document, mirrors it to the
//!   local cache, replicates it to the remote store
//! - Debounced autosave as a single-slot cancellable timer
//! - Remote store abstraction with an HTTP transport
//!
//! ## Architecture
//!
//! The controller implements a **local-first, last-writer-wins** model:
//! 1. UI events mutate the in-memory document
//! 2. Every mutation writes through to the local cache synchronously
//! 3. A best-effort push replicates the whole document to the remote store
//! 4. At startup only, a pull-and-reconcile adopts the remote copy unless
//!    the user already started editing
//!
//! ## Key Invariants
//!
//! - Local state is the durable source of truth; a failed push never rolls
//!   back committed local state
//! - The cache write for a mutation always precedes its remote push
//! - At most one autosave timer is live at a time
//! - While the startup reconcile is outstanding, mutations are refused

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod controller;
mod debounce;
mod error;
mod http;
mod notice;
mod transport;

pub use config::SyncConfig;
pub use controller::{MemoSyncController, Outcome, SessionState};
pub use debounce::Debounce;
pub use error::{SyncError, SyncResult};
pub use http::{HttpClient, HttpRemote, LoopbackClient, LoopbackServer};
pub use notice::{Notice, TransientNotice};
pub use transport::{MockRemote, RemoteStore};
