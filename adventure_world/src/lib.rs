//! # Adventure World
//!
//! The data half of the adventure runtime: the read-only world catalog, the
//! script graph model, and the mutable game state scripts act on.
//! This crate holds no engine logic; `script_engine` drives everything here.

pub mod catalog;
pub mod entities;
pub mod error;
pub mod mechanics;
pub mod script;
pub mod world_state;

pub use catalog::*;
pub use entities::*;
pub use error::WorldError;
pub use mechanics::*;
pub use script::*;
pub use world_state::*;
