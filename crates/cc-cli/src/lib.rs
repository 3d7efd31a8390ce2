//! Computer club CLI library.
//!
//! This crate reads club logs, drives the [`cc_core::Club`] state machine and
//! renders its decisions as text.

mod cli;
pub mod input;
pub mod render;
pub mod replay;

pub use cli::Cli;
pub use replay::{ReplayError, replay};
