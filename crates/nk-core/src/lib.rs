//! # nk-core
//!
//! Core types and error definitions for numkernel.
//!
//! This crate provides the building blocks shared by every solver in the
//! workspace: the scalar type aliases, the error taxonomy, and the
//! `ensure!` / `fail!` early-return macros.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the kernel.
pub type Real = f64;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
