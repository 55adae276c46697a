/// Which stack operation produced a [`ChangeEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A submitted command was executed and appended.
    Executed,
    /// A submitted command was executed and folded into the top of history.
    Merged,
    /// The current command was undone.
    Undone,
    /// The next command was redone.
    Redone,
    /// The save point moved and dirtiness changed.
    Saved,
    /// History was cleared.
    Reset,
}

/// Snapshot of stack state delivered to change listeners.
///
/// Events are emitted after the mutation completes, so the flags here
/// always describe post-mutation state; a listener enabling or disabling
/// UI affordances can rely on them without re-querying the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub can_undo: bool,
    pub can_redo: bool,
    pub dirty: bool,
}
