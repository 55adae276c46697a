//! Ordered history of commands plus the cursors that make it undoable.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::command::Command;
use crate::events::{ChangeEvent, ChangeKind};

/// Precondition violations surfaced by the strict [`Stack::try_undo`] /
/// [`Stack::try_redo`] variants.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
}

struct Entry {
    /// Creation sequence of the most recent command folded into this slot.
    /// Used only to decide merge eligibility: merges are offered only to
    /// commands created back-to-back.
    seq: u64,
    command: Box<dyn Command>,
}

/// Where the last durably persisted state sits in history.
///
/// `At(None)` is the pristine bottom-of-history state; `Lost` means the
/// saved state was discarded by truncation and no position in the current
/// history corresponds to it, so the stack stays dirty everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SavePoint {
    Lost,
    At(Option<usize>),
}

/// Linear undo/redo history.
///
/// Holds an ordered sequence of executed [`Command`]s, a cursor for the
/// last command whose effect is currently applied (`None` meaning "before
/// the first command"), and a save point tracking which position
/// corresponds to persisted state. History is strictly linear: executing a
/// new command while undone commands remain discards them, it never
/// branches into a tree.
///
/// All operations are synchronous and single-threaded; a stack owns its
/// commands exclusively once they are appended.
pub struct Stack {
    entries: Vec<Entry>,
    position: Option<usize>,
    save: SavePoint,
    next_seq: u64,
    next_listener_id: u64,
    listeners: BTreeMap<u64, Box<dyn FnMut(ChangeEvent)>>,
}

impl Stack {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            position: None,
            save: SavePoint::At(None),
            next_seq: 0,
            next_listener_id: 1,
            listeners: BTreeMap::new(),
        }
    }

    /// Execute a command and record it at the top of history.
    ///
    /// Any commands above the cursor (undone but still redoable) are
    /// discarded first; if the save point indexed one of them it is
    /// invalidated rather than clamped, since that saved state is no
    /// longer reachable. The command's `execute()` always runs, exactly
    /// once. If the top of history was created immediately before this
    /// command, the top is offered the chance to absorb it via
    /// [`Command::merge`]; on a successful merge the cursor does not move
    /// and history keeps its length.
    ///
    /// Emits exactly one change event.
    pub fn execute(&mut self, command: Box<dyn Command>) {
        let mut command = command;

        let keep = self.position.map_or(0, |p| p + 1);
        if keep < self.entries.len() {
            self.entries.truncate(keep);
            if let SavePoint::At(Some(saved)) = self.save {
                if saved >= self.entries.len() {
                    self.save = SavePoint::Lost;
                }
            }
        }

        command.execute();

        let seq = self.next_seq;
        self.next_seq += 1;

        if let Some(top) = self.entries.last_mut() {
            if top.seq + 1 == seq {
                match top.command.merge(command) {
                    Ok(()) => {
                        top.seq = seq;
                        self.emit(ChangeKind::Merged);
                        return;
                    }
                    Err(rejected) => command = rejected,
                }
            }
        }

        self.entries.push(Entry { seq, command });
        self.position = Some(self.entries.len() - 1);
        self.emit(ChangeKind::Executed);
    }

    /// `true` iff a command is currently applied and can be undone.
    pub fn can_undo(&self) -> bool {
        self.position.is_some()
    }

    /// `true` iff an undone command sits above the cursor.
    pub fn can_redo(&self) -> bool {
        self.position.map_or(0, |p| p + 1) < self.entries.len()
    }

    /// Undo the current command. Silent no-op when there is nothing to
    /// undo, so UI wiring can call this unguarded.
    pub fn undo(&mut self) {
        let _ = self.try_undo();
    }

    /// Strict variant of [`undo`](Stack::undo) for non-UI callers.
    pub fn try_undo(&mut self) -> Result<(), StackError> {
        let index = self.position.ok_or(StackError::NothingToUndo)?;
        self.entries[index].command.undo();
        self.position = index.checked_sub(1);
        self.emit(ChangeKind::Undone);
        Ok(())
    }

    /// Redo the next undone command. Silent no-op when there is nothing
    /// to redo.
    pub fn redo(&mut self) {
        let _ = self.try_redo();
    }

    /// Strict variant of [`redo`](Stack::redo) for non-UI callers.
    pub fn try_redo(&mut self) -> Result<(), StackError> {
        let next = self.position.map_or(0, |p| p + 1);
        if next >= self.entries.len() {
            return Err(StackError::NothingToRedo);
        }
        self.entries[next].command.redo();
        self.position = Some(next);
        self.emit(ChangeKind::Redone);
        Ok(())
    }

    /// Record that the caller durably persisted current state. Emits a
    /// change event only when dirtiness actually changes.
    pub fn mark_saved(&mut self) {
        let was_dirty = self.is_dirty();
        self.save = SavePoint::At(self.position);
        if was_dirty {
            self.emit(ChangeKind::Saved);
        }
    }

    /// `true` iff current state differs from the last saved state,
    /// including when the saved state was truncated out of history.
    pub fn is_dirty(&self) -> bool {
        match self.save {
            SavePoint::Lost => true,
            SavePoint::At(saved) => saved != self.position,
        }
    }

    /// Clear history and both cursors. Callers invoke this when the
    /// editing scope changes, so history never grows across unrelated
    /// contexts.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.position = None;
        self.save = SavePoint::At(None);
        self.emit(ChangeKind::Reset);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the last applied command, `None` when before the first.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Label of the command [`undo`](Stack::undo) would revert.
    pub fn undo_label(&self) -> Option<&str> {
        self.position
            .and_then(|index| self.entries[index].command.label())
    }

    /// Label of the command [`redo`](Stack::redo) would re-apply.
    pub fn redo_label(&self) -> Option<&str> {
        let next = self.position.map_or(0, |p| p + 1);
        self.entries.get(next).and_then(|e| e.command.label())
    }

    /// Register a change listener. Returns an id for [`off_change`].
    ///
    /// Listeners run after every mutating operation completes, so reading
    /// `can_undo`/`can_redo`/`is_dirty` from the event sees post-mutation
    /// state. Exactly one event is delivered per mutating call.
    ///
    /// [`off_change`]: Stack::off_change
    pub fn on_change<F>(&mut self, listener: F) -> u64
    where
        F: FnMut(ChangeEvent) + 'static,
    {
        let id = self.next_listener_id;
        self.next_listener_id = self.next_listener_id.saturating_add(1);
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Remove a previously registered listener. Returns `false` when the
    /// id is unknown.
    pub fn off_change(&mut self, listener_id: u64) -> bool {
        self.listeners.remove(&listener_id).is_some()
    }

    fn emit(&mut self, kind: ChangeKind) {
        let event = ChangeEvent {
            kind,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            dirty: self.is_dirty(),
        };
        for listener in self.listeners.values_mut() {
            listener(event);
        }
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}
