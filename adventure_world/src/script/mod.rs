//! Script graph data model.
//!
//! A script is an immutable graph of typed nodes joined by connections that
//! leave through named output ports:
//! - **Nodes**: a closed set of event, condition, action and dialogue types
//! - **Properties**: per-node key/value bag with safe defaults
//! - **Connections**: `from.port -> to`, validated once at load

mod diagnostic;
mod graph;
mod node;
mod property;

pub use diagnostic::*;
pub use graph::*;
pub use node::*;
pub use property::*;
