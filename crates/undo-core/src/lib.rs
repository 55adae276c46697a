//! Linear undo/redo command stack.
//!
//! A [`Stack`] records caller-supplied reversible [`Command`]s, steps
//! backward and forward through them, coalesces consecutive related
//! commands, and tracks which point in history corresponds to the last
//! saved state. It operates purely on opaque command objects: no text
//! model, no document, no UI — those live with the caller, which maps
//! [`Stack::can_undo`] / [`Stack::can_redo`] onto its own affordances and
//! routes user gestures into [`Stack::undo`] / [`Stack::redo`].
//!
//! Everything is synchronous and single-threaded; a caller on a
//! multi-threaded host serializes access to a stack externally.

pub mod command;
pub mod events;
pub mod stack;

pub use command::Command;
pub use events::{ChangeEvent, ChangeKind};
pub use stack::{Stack, StackError};
