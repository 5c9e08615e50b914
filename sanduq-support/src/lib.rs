//! # Sanduq Support
//!
//! Shared utilities for the Sanduq resolver crates.
//!
//! Currently this is text rendering for error messages: compacting type
//! names and formatting registration chains.

pub mod rendering;
