//! Integration tests for the form intake service.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server (memory store, no database needed)
//! INTAKE_DATABASE_URL=memory:// cargo run -p form-intake
//!
//! # Run integration tests against it
//! cargo test -p form-intake-integration-tests -- --ignored
//! ```
//!
//! `INTAKE_BASE_URL` points the tests at another server
//! (default: `http://localhost:3000`).
//!
//! # Test Categories
//!
//! - `intake_api` - Submission, listing, health and fallback endpoints
