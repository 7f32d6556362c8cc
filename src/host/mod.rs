pub mod commands;
pub mod terminal;

pub use commands::Command;
pub use terminal::{shared_lines, SharedLines, TerminalConfirm, TerminalHost};
