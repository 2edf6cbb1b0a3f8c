//! Router Module Index
//!
//! Splits the HTTP surface by who may reach it. Authentication is applied as a
//! route layer in `create_router`; the finer role and identity checks live in
//! the enrollment service so every path runs the same policy.

/// Routes accessible without credentials (liveness only).
pub mod public;

/// Per-student enrollment routes. Requires a verified principal.
pub mod authenticated;

/// Whole-store routes restricted to the ADMIN role.
pub mod admin;
