//! Interactive front end: prompt grammar, command dispatch and rendering.

pub mod app;
pub mod bootstrap;
pub mod command;
pub mod render;
pub mod repl;

pub use app::{App, AppConfig, Flow};
pub use command::{parse_command, Command};
