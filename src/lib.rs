//! sql_template library - typed SQL execution and result mapping
//!
//! Provides the database sessions and statement executor, the pet clinic
//! fixture, and the command and output infrastructure of the CLI.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod output;
pub mod petclinic;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod test_utils;
