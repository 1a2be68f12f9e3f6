//! Core types for the beacon JSON services.
//!
//! Holds everything the two HTTP crates share: the static sample catalog,
//! payload handling for the processing endpoint, the reported API version,
//! and listener configuration.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod process;
pub mod version;

pub use catalog::{sample_items, Item};
pub use config::ListenConfig;
pub use error::CoreError;
pub use process::{parse_payload, ProcessReport};
pub use version::{SemVer, API_VERSION};
