//! Core types for the form intake service.
//!
//! This module provides type-safe wrappers for the intake domain concepts.

pub mod id;
pub mod kind;
pub mod mode;
pub mod status;

pub use id::*;
pub use kind::RecordKind;
pub use mode::{DeploymentMode, ParseModeError};
pub use status::*;
