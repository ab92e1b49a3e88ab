#![deny(clippy::all)]

pub mod app;
pub mod commands;

pub use app::Application;
pub use commands::Cli;
