//! CLI commands

pub mod call;
pub mod quantity;
pub mod render;
pub mod shims;
