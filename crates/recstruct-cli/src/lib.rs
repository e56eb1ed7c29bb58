//! # recstruct-cli: Command-Line Interface
//!
//! ## Subcommands
//!
//! - `describe`: list the record types of a schema document
//! - `check`: hydrate every entry of a data file into records of one type
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to `recstruct-schema` and `recstruct-core`; no
//!   validation logic lives here.

pub mod check;
pub mod describe;
