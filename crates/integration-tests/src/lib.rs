//! Integration tests for Clientele.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database
//! docker compose up -d db
//!
//! # Run integration tests
//! cargo test -p clientele-integration-tests -- --ignored
//! ```
//!
//! Tests read `CLIENTELE_DATABASE_URL` (via `.env` or the environment)
//! and apply migrations on connect. Each test generates its own email
//! addresses so suites can run concurrently against a shared database.
