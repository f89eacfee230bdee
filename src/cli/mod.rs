pub mod args;
pub mod commands;
pub mod root;

pub use args::{Args, Commands};
pub use root::RootCommand;
