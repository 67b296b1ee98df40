//! Integration tests for provider-router
//!
//! These tests drive the router through its public API with scripted
//! providers.

pub mod admission_tests;
pub mod config_tests;
pub mod router_tests;
