//! Core types for Clientele.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod gender;
pub mod id;

pub use email::{Email, EmailError};
pub use gender::{Gender, GenderError};
pub use id::*;
