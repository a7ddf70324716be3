//! Shared domain model for the La Paris product-photo studio.
//!
//! Holds the image record lifecycle, branding configuration, static
//! preset/colour/logo catalogs, naming helpers and the crate-wide
//! [`CoreError`](error::CoreError).

pub mod catalog;
pub mod error;
pub mod naming;
pub mod types;
pub mod validation;
