//! HTTP frontend for the beacon JSON services.
//!
//! Answers its own health and index requests and forwards read-only calls to
//! the backend through a [`upstream::BackendApi`] implementation.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod routes;
pub mod upstream;
