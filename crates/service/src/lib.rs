//! Clientele customer service library.
//!
//! The customer domain core: registration, lookup, partial update,
//! deletion, and profile-image storage. Persistence sits behind the
//! [`db::CustomerStore`] contract with three interchangeable backends
//! (direct statements, row-mapped query types, in-memory), and profile
//! images go through the [`blob::BlobStore`] contract.
//!
//! The HTTP layer, authentication, and request deserialization live in
//! the surrounding server; this crate only raises typed failures and
//! owns their response-status mapping.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod blob;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

/// Initialize tracing with an environment-driven filter.
///
/// Reads `RUST_LOG` when set, defaulting to `info`. Call once at process
/// start; the surrounding server owns the subscriber lifecycle.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
