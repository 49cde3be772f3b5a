//! Command catalog and the freeplay prefix matcher.

mod catalog;
mod matcher;

pub use catalog::{Command, CommandAction, CommandCatalog, default_commands};
pub use matcher::{CommandMatcher, CommandString, Extension, MatchOutcome};
