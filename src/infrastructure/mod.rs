// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`simulated`]: In-memory media element (implements [`MediaBackend`])
//!
//! [`MediaBackend`]: crate::application::port::MediaBackend

pub mod simulated;

// Re-export main types for convenience
pub use simulated::{MediaCommand, SimulatedMedia};
