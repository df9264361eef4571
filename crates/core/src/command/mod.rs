//! Compiler command assembly and execution

pub mod builder;
mod compiler_command;

pub use builder::CommandBuilder;
pub use compiler_command::{CompilerCommand, DEFAULT_COMPILER};
