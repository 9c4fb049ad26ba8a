//! Form intake service library.
//!
//! Accepts enquiry and appointment-request submissions from website forms,
//! stores them in the record store and lists them back for administrators.
//! The binary in `main.rs` wires configuration, logging and shutdown around
//! [`app::router`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
