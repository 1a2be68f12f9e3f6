//! HTTP backend for the beacon JSON services.
//!
//! Serves a health check, the static sample item list, an echo-style create
//! endpoint, and the form-processing endpoint. Holds no state between
//! requests.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod client;
pub mod error;
pub mod routes;
