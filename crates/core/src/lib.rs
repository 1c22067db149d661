//! Clientele Core - Shared domain types.
//!
//! This crate provides the common types used across the Clientele
//! components:
//!
//! - `service` - The customer domain service library
//! - `integration-tests` - Database-backed contract tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no
//! HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and the
//!   gender sum type

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
