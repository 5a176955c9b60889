// =====================================================
// FILE: commands/mod.rs
// =====================================================

pub mod handler;
pub mod parsing;

pub use handler::{CommandHandler, CommandResult};
pub use parsing::{parse_command, NavCommand};
