//! Presentation layer: command line, navigation and command dispatch.

/// Command-line definitions.
pub mod cli;
/// Command dispatch.
pub mod commands;
/// Routes and route guards.
pub mod navigation;

pub use cli::{Cli, Command};
pub use commands::{CommandError, CommandRunner};
pub use navigation::{Navigator, Route, RouteDecision, RouteGuard};
