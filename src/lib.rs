//! ARBVIEW: web dashboard for an arbitrage scanner service
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod error;
pub mod client;
pub mod render;
pub mod page;
pub mod controller;
pub mod dashboard;
