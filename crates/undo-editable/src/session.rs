//! Per-editable undo session: snapshot capture, change recording, and
//! history scoped to the active editable.

use thiserror::Error;

use undo_core::{ChangeEvent, Stack};

use crate::edit_command::EditCommand;
use crate::editable::{Editable, Snapshot};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("no active editable")]
    NoActiveEditable,
}

/// Drives a [`Stack`] from editable content changes.
///
/// The session owns the bookkeeping an editor integration needs around
/// the raw stack: capturing a before-state snapshot when an edit burst
/// begins, packaging before/after into an [`EditCommand`] when the burst
/// settles, and resetting history whenever the active editable changes so
/// history never spans unrelated regions or grows forever.
///
/// Recording is skipped when no snapshot is pending or when the pending
/// snapshot equals current state. The session's own `undo`/`redo` drop
/// any pending snapshot, so the content mutations caused by a replay are
/// never fed back in as new commands.
pub struct EditorSession {
    stack: Stack,
    active: Option<Editable>,
    pending: Option<Snapshot>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            stack: Stack::new(),
            active: None,
            pending: None,
        }
    }

    /// Make `editable` the editing scope. Any pending snapshot is
    /// dropped and history is cleared.
    pub fn activate(&mut self, editable: Editable) {
        self.active = Some(editable);
        self.pending = None;
        self.stack.reset();
    }

    pub fn active(&self) -> Option<&Editable> {
        self.active.as_ref()
    }

    /// Capture the before-state of an edit burst. The first call wins;
    /// further calls before [`record_change`](Self::record_change) are
    /// ignored so a burst of edits shares one before-state.
    pub fn take_snapshot(&mut self) -> Result<(), SessionError> {
        let editable = self.active.as_ref().ok_or(SessionError::NoActiveEditable)?;
        if self.pending.is_none() {
            self.pending = Some(Snapshot::capture(editable));
        }
        Ok(())
    }

    /// Record the settled edit burst as one undo step.
    pub fn record_change(&mut self, label: impl Into<String>) -> Result<(), SessionError> {
        self.record(label, false)
    }

    /// Like [`record_change`](Self::record_change), but the recorded
    /// command coalesces with an adjacent coalescing command on the same
    /// editable (single undo step for a typing run).
    pub fn record_coalescing_change(
        &mut self,
        label: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.record(label, true)
    }

    fn record(&mut self, label: impl Into<String>, coalesce: bool) -> Result<(), SessionError> {
        let editable = self
            .active
            .as_ref()
            .ok_or(SessionError::NoActiveEditable)?
            .clone();
        let Some(before) = self.pending.take() else {
            return Ok(());
        };
        let after = Snapshot::capture(&editable);
        if before == after {
            return Ok(());
        }
        let mut command = EditCommand::new(editable, before, after, label);
        if coalesce {
            command = command.coalescing();
        }
        self.stack.execute(Box::new(command));
        Ok(())
    }

    /// Undo the last recorded change, if any. Invalidates the pending
    /// snapshot: the replay rewrote the state it described.
    pub fn undo(&mut self) {
        if !self.stack.can_undo() {
            return;
        }
        self.pending = None;
        self.stack.undo();
    }

    /// Redo the last undone change, if any.
    pub fn redo(&mut self) {
        if !self.stack.can_redo() {
            return;
        }
        self.pending = None;
        self.stack.redo();
    }

    pub fn can_undo(&self) -> bool {
        self.stack.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.stack.can_redo()
    }

    pub fn is_dirty(&self) -> bool {
        self.stack.is_dirty()
    }

    pub fn mark_saved(&mut self) {
        self.stack.mark_saved();
    }

    /// Clear history without touching the active editable.
    pub fn reset(&mut self) {
        self.pending = None;
        self.stack.reset();
    }

    pub fn undo_label(&self) -> Option<&str> {
        self.stack.undo_label()
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.stack.redo_label()
    }

    /// Register a change listener on the underlying stack, for wiring
    /// button/shortcut state.
    pub fn on_change<F>(&mut self, listener: F) -> u64
    where
        F: FnMut(ChangeEvent) + 'static,
    {
        self.stack.on_change(listener)
    }

    pub fn off_change(&mut self, listener_id: u64) -> bool {
        self.stack.off_change(listener_id)
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}
