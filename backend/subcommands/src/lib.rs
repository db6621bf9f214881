//! Cross-cog subcommand registration.
//!
//! Lets a cog declare a command as a subcommand of a group that lives in a
//! different cog, and reconciles the two once both are loaded. The
//! [`SubcommandManager`] wraps the bot's cog add/remove entry points,
//! collects pending declarations as cogs load, attaches them once their
//! group appears, detaches them when their cog unloads, and reports
//! whatever never found a home.

pub mod manager;
mod pending;
mod suggest;

pub use manager::{ManagerOptions, SubcommandManager};
