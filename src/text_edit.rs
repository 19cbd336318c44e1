//! Inline text editing for a block's label.
//!
//! A node with a [`TextEdit`] attached shows its label normally. Clicking the
//! node switches the overlay to [`EditMode::Editing`], where the canvas draws a
//! text field over the block. Enter commits the draft, optionally through an
//! asynchronous callback that may reject it. Escape restores the committed
//! text.

use crate::tree::{BlockTree, NodeId};
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::task::{Context, Poll};

/// Resolves once the callback has accepted (`Ok`) or rejected (`Err`) a value.
pub type CommitFuture = LocalBoxFuture<'static, Result<(), String>>;

/// Validates a value the user wants to commit.
pub type CommitCallback = Box<dyn FnMut(&str) -> CommitFuture>;

/// Overlay state shared between a tree node and its click listener.
pub type SharedTextEdit = Rc<RefCell<TextEdit>>;

/// Whether the overlay is showing the label or a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// The label is shown
    #[default]
    Viewing,
    /// A text field replaces the label
    Editing,
}

/// Keys the overlay reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    /// Commit the draft
    Enter,
    /// Discard the draft
    Escape,
}

/// Result of a key press or a poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Nothing happened, for example Enter while viewing
    Ignored,
    /// The draft became the committed text
    Committed(String),
    /// The draft was discarded
    Cancelled,
    /// The callback has not resolved yet
    Pending,
    /// The callback rejected the draft; the field stays open
    Rejected,
}

/// Edit state of one text field.
pub struct TextEdit {
    mode: EditMode,
    committed: String,
    draft: String,
    callback: Option<CommitCallback>,
    pending: Option<CommitFuture>,
}

impl fmt::Debug for TextEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextEdit")
            .field("mode", &self.mode)
            .field("committed", &self.committed)
            .field("draft", &self.draft)
            .field("callback", &self.callback.is_some())
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

impl TextEdit {
    /// Creates a viewing overlay whose committed text is `initial`.
    pub fn new(initial: &str) -> Self {
        Self {
            mode: EditMode::Viewing,
            committed: initial.to_string(),
            draft: initial.to_string(),
            callback: None,
            pending: None,
        }
    }

    /// Replaces the commit callback. `None` commits without validation.
    pub fn set_callback(&mut self, callback: Option<CommitCallback>) {
        self.callback = callback;
    }

    /// Current mode.
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Whether the text field is open.
    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    /// Last accepted text.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Text currently in the field.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Text currently in the field, for widgets that edit it in place.
    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    /// Replaces the text in the field.
    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    /// Whether a commit is waiting on the callback.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Opens the text field, starting from the committed text.
    pub fn begin_edit(&mut self) {
        if self.is_editing() {
            return;
        }
        self.draft = self.committed.clone();
        self.mode = EditMode::Editing;
        log::debug!("text edit opened with {:?}", self.committed);
    }

    /// Handles a key press while the field is open.
    pub fn key(&mut self, key: EditKey) -> EditOutcome {
        if !self.is_editing() {
            return EditOutcome::Ignored;
        }
        match key {
            EditKey::Escape => {
                self.draft = self.committed.clone();
                self.pending = None;
                self.mode = EditMode::Viewing;
                log::debug!("text edit cancelled");
                EditOutcome::Cancelled
            }
            EditKey::Enter => match self.callback.as_mut() {
                None => self.commit(),
                Some(callback) => {
                    self.pending = Some(callback(&self.draft));
                    self.poll_commit()
                }
            },
        }
    }

    /// Polls an in-flight commit once.
    pub fn poll_commit(&mut self) -> EditOutcome {
        let Some(future) = self.pending.as_mut() else {
            return EditOutcome::Ignored;
        };
        let mut cx = Context::from_waker(futures::task::noop_waker_ref());
        match future.poll_unpin(&mut cx) {
            Poll::Pending => EditOutcome::Pending,
            Poll::Ready(Ok(())) => {
                self.pending = None;
                self.commit()
            }
            Poll::Ready(Err(reason)) => {
                self.pending = None;
                log::debug!("text edit commit rejected: {reason}");
                EditOutcome::Rejected
            }
        }
    }

    fn commit(&mut self) -> EditOutcome {
        self.committed = self.draft.clone();
        self.mode = EditMode::Viewing;
        log::debug!("text edit committed {:?}", self.committed);
        EditOutcome::Committed(self.committed.clone())
    }
}

impl BlockTree {
    /// Makes the label of `id` editable.
    ///
    /// The label is set to `initial` and a click on the block opens the text
    /// field. The click is not consumed, so the node is still selected.
    ///
    /// # Arguments
    ///
    /// * `id` - Node whose label becomes editable
    /// * `initial` - Starting text
    /// * `callback` - Optional validator for committed values
    ///
    /// # Returns
    ///
    /// The overlay state, also reachable later through [`BlockTree::text_edit`]
    pub fn attach_text_edit(
        &mut self,
        id: NodeId,
        initial: &str,
        callback: Option<CommitCallback>,
    ) -> SharedTextEdit {
        let mut edit = TextEdit::new(initial);
        edit.set_callback(callback);
        let edit = Rc::new(RefCell::new(edit));

        let block = self.block_mut(id);
        block.set_label(initial);
        let listener_edit = Rc::clone(&edit);
        block.interact().set_click_listener(move || {
            listener_edit.borrow_mut().begin_edit();
            false
        });

        self.set_text_edit(id, Rc::clone(&edit));
        edit
    }

    /// Forwards a key to the overlay of `id` and syncs the label on commit.
    pub fn text_edit_key(&mut self, id: NodeId, key: EditKey) -> EditOutcome {
        let Some(edit) = self.text_edit(id).cloned() else {
            return EditOutcome::Ignored;
        };
        let outcome = edit.borrow_mut().key(key);
        self.apply_edit_outcome(id, &outcome);
        outcome
    }

    /// Polls every pending commit. Returns whether any is still pending.
    pub fn poll_text_edits(&mut self) -> bool {
        let edits: Vec<(NodeId, SharedTextEdit)> = self
            .nodes()
            .filter_map(|node| node.text_edit().map(|edit| (node.id(), Rc::clone(edit))))
            .collect();
        let mut still_pending = false;
        for (id, edit) in edits {
            let outcome = edit.borrow_mut().poll_commit();
            still_pending |= outcome == EditOutcome::Pending;
            self.apply_edit_outcome(id, &outcome);
        }
        still_pending
    }

    fn apply_edit_outcome(&mut self, id: NodeId, outcome: &EditOutcome) {
        match outcome {
            EditOutcome::Committed(text) => self.block_mut(id).set_label(text),
            EditOutcome::Cancelled => self.block_mut(id).schedule_repaint(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_type::BlockType;
    use crate::direction::Direction;
    use std::cell::Cell;

    fn editing(initial: &str) -> TextEdit {
        let mut edit = TextEdit::new(initial);
        edit.begin_edit();
        edit
    }

    #[test]
    fn test_enter_without_callback_commits() {
        let mut edit = editing("old");
        edit.set_draft("new");
        assert_eq!(edit.key(EditKey::Enter), EditOutcome::Committed("new".into()));
        assert_eq!(edit.mode(), EditMode::Viewing);
        assert_eq!(edit.committed(), "new");
    }

    #[test]
    fn test_escape_restores_committed_text() {
        let mut edit = editing("keep");
        edit.draft_mut().push_str(" me not");
        assert_eq!(edit.key(EditKey::Escape), EditOutcome::Cancelled);
        assert_eq!(edit.draft(), "keep");
        assert!(!edit.is_editing());
    }

    #[test]
    fn test_keys_are_ignored_while_viewing() {
        let mut edit = TextEdit::new("x");
        assert_eq!(edit.key(EditKey::Enter), EditOutcome::Ignored);
        assert_eq!(edit.key(EditKey::Escape), EditOutcome::Ignored);
    }

    #[test]
    fn test_rejecting_callback_keeps_field_open() {
        let mut edit = editing("a");
        edit.set_callback(Some(Box::new(|_: &str| -> CommitFuture {
            async { Err("no".to_string()) }.boxed_local()
        })));
        edit.set_draft("b");
        assert_eq!(edit.key(EditKey::Enter), EditOutcome::Rejected);
        assert!(edit.is_editing());
        assert_eq!(edit.committed(), "a");
        assert_eq!(edit.draft(), "b");
    }

    #[test]
    fn test_accepting_callback_sees_draft() {
        let seen = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&seen);
        let mut edit = editing("a");
        edit.set_callback(Some(Box::new(move |value: &str| -> CommitFuture {
            *sink.borrow_mut() = value.to_string();
            async { Ok(()) }.boxed_local()
        })));
        edit.set_draft("checked");
        assert_eq!(
            edit.key(EditKey::Enter),
            EditOutcome::Committed("checked".into())
        );
        assert_eq!(*seen.borrow(), "checked");
    }

    #[test]
    fn test_unresolved_commit_stays_editing() {
        let mut edit = editing("a");
        edit.set_callback(Some(Box::new(|_: &str| -> CommitFuture {
            futures::future::pending().boxed_local()
        })));
        edit.set_draft("b");
        assert_eq!(edit.key(EditKey::Enter), EditOutcome::Pending);
        assert_eq!(edit.poll_commit(), EditOutcome::Pending);
        assert!(edit.is_editing());
        assert!(edit.is_pending());

        assert_eq!(edit.key(EditKey::Escape), EditOutcome::Cancelled);
        assert!(!edit.is_pending());
        assert_eq!(edit.poll_commit(), EditOutcome::Ignored);
    }

    #[test]
    fn test_click_opens_attached_editor() {
        let mut tree = BlockTree::new(BlockType::Bud, false);
        let node = tree.spawn(tree.root(), Direction::Forward, BlockType::Block).unwrap();
        let edit = tree.attach_text_edit(node, "hello", None);

        assert_eq!(tree.block(node).label(), Some("hello"));
        assert!(!tree.click(node));
        assert!(edit.borrow().is_editing());

        edit.borrow_mut().set_draft("world");
        assert_eq!(
            tree.text_edit_key(node, EditKey::Enter),
            EditOutcome::Committed("world".into())
        );
        assert_eq!(tree.block(node).label(), Some("world"));
        assert!(tree.needs_commit());
    }

    #[test]
    fn test_poll_text_edits_applies_late_commit() {
        let gate = Rc::new(Cell::new(false));
        let mut tree = BlockTree::new(BlockType::Block, false);
        let root = tree.root();
        let open = Rc::clone(&gate);
        let callback: CommitCallback = Box::new(move |_: &str| -> CommitFuture {
            let open = Rc::clone(&open);
            futures::future::poll_fn(move |_| {
                if open.get() {
                    Poll::Ready(Ok(()))
                } else {
                    Poll::Pending
                }
            })
            .boxed_local()
        });
        let edit = tree.attach_text_edit(root, "", Some(callback));
        tree.click(root);
        edit.borrow_mut().set_draft("late");

        assert_eq!(tree.text_edit_key(root, EditKey::Enter), EditOutcome::Pending);
        assert!(tree.poll_text_edits());
        assert_eq!(tree.block(root).label(), None);

        gate.set(true);
        assert!(!tree.poll_text_edits());
        assert_eq!(tree.block(root).label(), Some("late"));
    }
}
