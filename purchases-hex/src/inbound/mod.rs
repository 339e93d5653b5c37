//! Command Inbound Adapter
//!
//! Typed commands that drive the application layer, and the output they render.

mod commands;

pub use commands::{Command, CommandOutput, execute};
