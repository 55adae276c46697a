//! The in-memory editable surface that edit commands snapshot and restore.

use std::cell::RefCell;
use std::rc::Rc;

/// Caret or selection inside an editable, as character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bookmark {
    pub start: usize,
    pub end: usize,
}

impl Bookmark {
    /// A collapsed selection at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug)]
struct EditableState {
    id: String,
    content: String,
    bookmark: Bookmark,
}

/// Handle to one editable region: its content plus the caret/selection.
///
/// Cloning the handle shares the underlying region, which is what edit
/// commands rely on: every command holds a clone of the handle it was
/// recorded against and restores snapshots through it. Single-threaded by
/// construction.
#[derive(Debug, Clone)]
pub struct Editable {
    inner: Rc<RefCell<EditableState>>,
}

impl Editable {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(EditableState {
                id: id.into(),
                content: String::new(),
                bookmark: Bookmark::default(),
            })),
        }
    }

    pub fn id(&self) -> String {
        self.inner.borrow().id.clone()
    }

    pub fn content(&self) -> String {
        self.inner.borrow().content.clone()
    }

    pub fn bookmark(&self) -> Bookmark {
        self.inner.borrow().bookmark
    }

    pub fn set_content(&self, content: impl Into<String>) {
        self.inner.borrow_mut().content = content.into();
    }

    pub fn set_bookmark(&self, bookmark: Bookmark) {
        self.inner.borrow_mut().bookmark = bookmark;
    }

    /// Apply a snapshot: content and selection together, so observers
    /// never see one without the other.
    pub fn restore(&self, snapshot: &Snapshot) {
        let mut state = self.inner.borrow_mut();
        state.content = snapshot.content.clone();
        state.bookmark = snapshot.bookmark;
    }

    /// `true` iff both handles refer to the same underlying region.
    pub fn same_region(&self, other: &Editable) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Captured editable state: content plus bookmark at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub content: String,
    pub bookmark: Bookmark,
}

impl Snapshot {
    pub fn capture(editable: &Editable) -> Self {
        let state = editable.inner.borrow();
        Self {
            content: state.content.clone(),
            bookmark: state.bookmark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_region() {
        let editable = Editable::new("main");
        let alias = editable.clone();

        editable.set_content("hello");
        assert_eq!(alias.content(), "hello");
        assert!(editable.same_region(&alias));
        assert!(!editable.same_region(&Editable::new("main")));
    }

    #[test]
    fn restore_applies_content_and_bookmark_together() {
        let editable = Editable::new("main");
        editable.set_content("before");
        editable.set_bookmark(Bookmark::caret(6));
        let snapshot = Snapshot::capture(&editable);

        editable.set_content("after");
        editable.set_bookmark(Bookmark { start: 0, end: 5 });

        editable.restore(&snapshot);
        assert_eq!(editable.content(), "before");
        assert_eq!(editable.bookmark(), Bookmark::caret(6));
        assert!(editable.bookmark().is_caret());
    }
}
