//! The reversible unit of work recorded by a [`Stack`](crate::Stack).

use std::any::Any;

/// A single reversible unit of work.
///
/// A command captures everything it needs at construction time: the state
/// required to reverse the action (`undo`) and the state required to
/// re-apply it (`redo`). Re-applying must replay captured state rather than
/// recompute it, because recomputation may depend on external context that
/// has since moved on.
///
/// Commands are expected not to fail. An `undo` that does not actually
/// invert `execute` is a bug in the command implementation; the stack does
/// not attempt runtime verification of reversibility.
///
/// # Example
///
/// ```
/// use std::any::Any;
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use undo_core::{Command, Stack};
///
/// struct Append {
///     buf: Rc<RefCell<String>>,
///     text: String,
/// }
///
/// impl Command for Append {
///     fn execute(&mut self) {
///         self.buf.borrow_mut().push_str(&self.text);
///     }
///
///     fn undo(&mut self) {
///         let mut buf = self.buf.borrow_mut();
///         let keep = buf.len() - self.text.len();
///         buf.truncate(keep);
///     }
///
///     fn redo(&mut self) {
///         self.buf.borrow_mut().push_str(&self.text);
///     }
///
///     fn label(&self) -> Option<&str> {
///         Some("append")
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// let buf = Rc::new(RefCell::new(String::new()));
/// let mut stack = Stack::new();
/// stack.execute(Box::new(Append { buf: buf.clone(), text: "x".into() }));
/// assert_eq!(&*buf.borrow(), "x");
/// stack.undo();
/// assert_eq!(&*buf.borrow(), "");
/// stack.redo();
/// assert_eq!(&*buf.borrow(), "x");
/// ```
pub trait Command: 'static {
    /// Perform the action. Called exactly once per command instance, at the
    /// moment the command is first submitted to a stack.
    fn execute(&mut self);

    /// Restore external state to exactly what it was before [`execute`]
    /// ran. Before-state must be snapshotted at construction time, not at
    /// undo time.
    ///
    /// [`execute`]: Command::execute
    fn undo(&mut self);

    /// Restore external state to exactly what it was immediately after
    /// [`execute`] ran.
    ///
    /// [`execute`]: Command::execute
    fn redo(&mut self);

    /// Display label for diagnostics and UI affordances ("Undo Typing").
    fn label(&self) -> Option<&str> {
        None
    }

    /// Fold `next` into this command so that a single undo/redo behaves as
    /// if both commands had been executed back-to-back.
    ///
    /// Merging is advisory: return the candidate unchanged via `Err` when
    /// the two cannot be combined safely. The stack only offers merges
    /// between a newly submitted command and the current top of history,
    /// and only when the two were created back-to-back.
    fn merge(&mut self, next: Box<dyn Command>) -> Result<(), Box<dyn Command>> {
        Err(next)
    }

    /// Concrete-type access, used by [`merge`](Command::merge)
    /// implementations to inspect the candidate.
    fn as_any(&self) -> &dyn Any;
}
