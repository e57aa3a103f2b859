//! # Script Engine
//!
//! Runs the node graphs authored in an `adventure_world` catalog. One shared
//! interpreter drives two kinds of script:
//!
//! - **event scripts**: fire-and-forget graphs triggered by world events
//!   (entering a room, opening a door, starting the game)
//! - **conversations**: NPC dialogue graphs that suspend on player choices
//!   and shop screens, then resume on input
//!
//! ## Core Components
//!
//! - **registry**: One handler per node type, as a table of function pointers
//! - **interpreter**: Walks a graph until it suspends or terminates
//! - **event_scripts**: Dispatches world events to listening scripts
//! - **conversation**: One persistent dialogue session with explicit waiting states
//! - **runtime**: Facade owning the game state, both engines and the notification queue
//! - **events**: Notifications emitted for the presentation layer
//!
//! Authored-content mistakes never surface as errors here. Unknown entities
//! are skipped, malformed graphs stop the affected run, and everything is
//! reported through `tracing`.

pub mod config;
pub mod conversation;
pub mod error;
pub mod event_scripts;
pub mod events;
pub mod interpreter;
pub mod registry;
pub mod runtime;

pub use config::*;
pub use conversation::*;
pub use error::EngineError;
pub use event_scripts::*;
pub use events::*;
pub use interpreter::*;
pub use registry::*;
pub use runtime::*;
