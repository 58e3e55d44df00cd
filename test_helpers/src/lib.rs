//! Test helpers shared across crates.
//!
//! This crate provides property-file fixtures, a working-directory guard and
//! text helpers for asserting on localised messages.

pub mod cwd;
pub mod properties;
pub mod text;
