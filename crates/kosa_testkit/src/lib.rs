//! # Kosa Testkit
//!
//! Test utilities for Kosa.
//!
//! This crate provides:
//! - Row fixtures for common export scenarios
//! - JSON row directories for source and CLI tests
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust
//! use kosa_testkit::prelude::*;
//!
//! let snapshot = dhammacakka_snapshot();
//! assert_eq!(snapshot.headwords().len(), 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
