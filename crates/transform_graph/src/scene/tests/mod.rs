//! Integration tests for the per-frame pipeline

mod lighting_integration;
