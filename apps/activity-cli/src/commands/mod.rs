//! CLI command implementations

pub mod subscription;
pub mod webhook;
