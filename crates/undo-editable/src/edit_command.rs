//! Snapshot-based edit command over one editable region.

use std::any::Any;

use undo_core::Command;

use crate::editable::{Editable, Snapshot};

/// A reversible content change, captured as before/after snapshots.
///
/// `execute` and `redo` restore the after snapshot, `undo` the before
/// snapshot; nothing is recomputed, so replays are deterministic even when
/// the surrounding editor context has moved on. Commands built with
/// [`coalescing`](EditCommand::coalescing) fold into a directly preceding
/// coalescing command on the same region, which gives typing bursts a
/// single undo step.
#[derive(Debug)]
pub struct EditCommand {
    editable: Editable,
    before: Snapshot,
    after: Snapshot,
    label: String,
    coalesce: bool,
}

impl EditCommand {
    pub fn new(
        editable: Editable,
        before: Snapshot,
        after: Snapshot,
        label: impl Into<String>,
    ) -> Self {
        Self {
            editable,
            before,
            after,
            label: label.into(),
            coalesce: false,
        }
    }

    /// Allow this command to merge with adjacent coalescing commands on
    /// the same region.
    pub fn coalescing(mut self) -> Self {
        self.coalesce = true;
        self
    }

    pub fn before(&self) -> &Snapshot {
        &self.before
    }

    pub fn after(&self) -> &Snapshot {
        &self.after
    }
}

impl Command for EditCommand {
    fn execute(&mut self) {
        // The edit itself already happened in the editable; applying the
        // after snapshot is a deterministic no-op that also covers
        // commands constructed ahead of the change.
        self.editable.restore(&self.after);
    }

    fn undo(&mut self) {
        self.editable.restore(&self.before);
    }

    fn redo(&mut self) {
        self.editable.restore(&self.after);
    }

    fn label(&self) -> Option<&str> {
        Some(&self.label)
    }

    fn merge(&mut self, next: Box<dyn Command>) -> Result<(), Box<dyn Command>> {
        match next.as_any().downcast_ref::<EditCommand>() {
            Some(other)
                if self.coalesce
                    && other.coalesce
                    && self.editable.same_region(&other.editable) =>
            {
                // Keep the earliest before and the latest after; undoing
                // the merged command reverses the whole burst.
                self.after = other.after.clone();
                Ok(())
            }
            _ => Err(next),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use undo_core::Stack;

    use super::*;
    use crate::editable::Bookmark;

    fn snapshot(content: &str, caret: usize) -> Snapshot {
        Snapshot {
            content: content.to_string(),
            bookmark: Bookmark::caret(caret),
        }
    }

    #[test]
    fn undo_and_redo_swap_snapshots() {
        let editable = Editable::new("main");
        editable.set_content("x");
        editable.set_bookmark(Bookmark::caret(1));

        let mut stack = Stack::new();
        stack.execute(Box::new(EditCommand::new(
            editable.clone(),
            snapshot("", 0),
            snapshot("x", 1),
            "type 'x'",
        )));

        stack.undo();
        assert_eq!(editable.content(), "");
        assert_eq!(editable.bookmark(), Bookmark::caret(0));

        stack.redo();
        assert_eq!(editable.content(), "x");
        assert_eq!(editable.bookmark(), Bookmark::caret(1));
        assert_eq!(stack.undo_label(), Some("type 'x'"));
    }

    #[test]
    fn coalescing_commands_merge_on_same_region() {
        let editable = Editable::new("main");
        let mut stack = Stack::new();

        editable.set_content("x");
        stack.execute(Box::new(
            EditCommand::new(editable.clone(), snapshot("", 0), snapshot("x", 1), "typing")
                .coalescing(),
        ));
        editable.set_content("xy");
        stack.execute(Box::new(
            EditCommand::new(
                editable.clone(),
                snapshot("x", 1),
                snapshot("xy", 2),
                "typing",
            )
            .coalescing(),
        ));

        assert_eq!(stack.len(), 1);
        stack.undo();
        assert_eq!(editable.content(), "");
        stack.redo();
        assert_eq!(editable.content(), "xy");
    }

    #[test]
    fn non_coalescing_commands_stay_separate() {
        let editable = Editable::new("main");
        let mut stack = Stack::new();

        editable.set_content("x");
        stack.execute(Box::new(EditCommand::new(
            editable.clone(),
            snapshot("", 0),
            snapshot("x", 1),
            "type 'x'",
        )));
        editable.set_content("xy");
        stack.execute(Box::new(EditCommand::new(
            editable.clone(),
            snapshot("x", 1),
            snapshot("xy", 2),
            "type 'y'",
        )));

        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn coalescing_refused_across_regions() {
        let first = Editable::new("first");
        let second = Editable::new("second");
        let mut stack = Stack::new();

        first.set_content("a");
        stack.execute(Box::new(
            EditCommand::new(first.clone(), snapshot("", 0), snapshot("a", 1), "typing")
                .coalescing(),
        ));
        second.set_content("b");
        stack.execute(Box::new(
            EditCommand::new(second.clone(), snapshot("", 0), snapshot("b", 1), "typing")
                .coalescing(),
        ));

        assert_eq!(stack.len(), 2);
    }
}
