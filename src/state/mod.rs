//! Domain state types for surfmenu.

mod connection;

pub use connection::{ConnectionState, ControllerPhase};
