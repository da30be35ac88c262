//! CLI library components for the domain swap tool.

pub mod commands;
pub mod logging;
