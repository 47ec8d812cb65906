//! Core quiz model, parser and validation harness.
//!
//! Everything the CLI does goes through these modules; the plugins layer
//! only adds page-level checks and rewrites on top.

pub mod config;
pub mod error;
pub mod markdown;
pub mod output;
pub mod parser;
pub mod quiz;
pub mod report;
pub mod scan;
pub mod validate;
