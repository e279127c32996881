// SPDX-License-Identifier: MPL-2.0
//! Application layer - ports between the controller and the outside world.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The playback controller only talks to ports
//!
//! # Example
//!
//! ```ignore
//! use pawnet_player::application::port::MediaBackend;
//!
//! // Infrastructure implements the port trait
//! struct HtmlVideoElement { /* ... */ }
//! impl MediaBackend for HtmlVideoElement { /* ... */ }
//! ```

pub mod port;
