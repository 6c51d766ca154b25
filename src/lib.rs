//! SAP landscape inventory checks.
//!
//! A rule engine over a landscape snapshot, aggregate counts for the
//! dashboard view, and a thin client for the upload/collection backend.
pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod feed;
pub mod loader;
pub mod model;
pub mod render;
pub mod rules;
pub mod summary;
