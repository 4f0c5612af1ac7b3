//! # Congress CLI
//!
//! Terminal front end for the congress client.

pub mod commands;
pub mod output;

pub use output::Output;
