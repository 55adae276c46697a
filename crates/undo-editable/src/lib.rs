//! Editable-session layer over [`undo_core`].
//!
//! Where `undo-core` knows only opaque commands, this crate supplies the
//! caller side of that contract for a plain in-memory editable region:
//!
//! - [`Editable`] — shared handle to content plus a selection [`Bookmark`];
//! - [`EditCommand`] — a [`undo_core::Command`] built from before/after
//!   [`Snapshot`]s, optionally coalescing across a typing burst;
//! - [`EditorSession`] — snapshot capture, change recording, and history
//!   reset on editable switches, with undo/redo replay kept out of the
//!   recorded history.
//!
//! No rich-text model and no UI: content is an opaque string, the
//! bookmark a pair of character offsets. Mapping `can_undo`/`can_redo`
//! onto buttons or shortcuts stays with the embedding editor.

pub mod edit_command;
pub mod editable;
pub mod session;

pub use edit_command::EditCommand;
pub use editable::{Bookmark, Editable, Snapshot};
pub use session::{EditorSession, SessionError};
