//! Common utilities and shared functionality
//!
//! Identifier types, configuration loading and the messaging seam used
//! across the hall.

pub mod types;
pub mod config;
pub mod traits;
