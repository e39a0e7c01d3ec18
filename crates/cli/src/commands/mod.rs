//! CLI commands

pub mod upload;
