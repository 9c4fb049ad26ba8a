//! Form Intake Core - Shared types library.
//!
//! This crate provides the types shared by every form intake component:
//! - `intake` - HTTP service accepting enquiries and appointment requests
//! - `cli` - Command-line tools for migrations and record export
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Record identifiers, record kinds, statuses and deployment mode

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
