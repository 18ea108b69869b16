//! emojibox - fetches, caches and normalizes Discord custom emoji.
//!
//! The crate follows a ports-and-adapters layout: the domain defines
//! entities, errors and ports, the application layer drives the pipeline,
//! and the infrastructure layer talks to Discord, the disk and `gifsicle`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases, services and the pipeline.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "emojibox";
