//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the pipeline:
//! - Math types and affine operations
//! - Frame timing
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
