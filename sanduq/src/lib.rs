//! # Sanduq — a constructor-injection resolver for Rust
//!
//! Registers concrete implementations under abstract service keys and
//! builds fully-satisfied object graphs on demand. Implementations
//! registered repeatedly under one key form a chain that self-referential
//! constructor parameters walk front to back — the decorator pattern,
//! wired from the registration order alone.

pub use sanduq_container::*;
pub use sanduq_support::*;
