//! CLI module
//!
//! Interactive front end for the fetch engine.
//!
//! # Commands
//!
//! - `devices` - List stores with their devices (GetStoresAndDevices)
//! - `goods` - Export every good of one store to a file (GetAllGoods)

mod commands;
mod console;
mod runner;

pub use commands::{Cli, Commands};
pub use console::{Console, ScriptedConsole, StdinConsole};
pub use runner::{Flow, Outcome, Runner};

#[cfg(test)]
mod tests;
