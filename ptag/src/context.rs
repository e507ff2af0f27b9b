//! Implicit nesting: elements created while a scope is open join the
//! innermost open element.
//!
//! The stack is thread-local, so independent threads build independent trees.
//!
//! ```
//! use ptag::Tag;
//!
//! let div = Tag::new("div", "hello")?;
//! {
//!     let _scope = div.enter();
//!     Tag::new("p", "world")?;
//!     Tag::new("p", "🎉")?;
//! }
//! assert_eq!(div.to_string(), "<div>hello<p>world</p><p>🎉</p></div>");
//! # Ok::<(), ptag::Error>(())
//! ```

use std::cell::RefCell;
use std::ops::Deref;

use crate::content::Child;
use crate::tag::Tag;
use crate::tracing_macros::{debug, trace, trace_span};

thread_local! {
    static STACK: RefCell<Vec<Tag>> = const { RefCell::new(Vec::new()) };
}

/// The innermost open element on this thread, if any.
pub fn current() -> Option<Tag> {
    STACK.with_borrow(|stack| stack.last().cloned())
}

/// Number of open scopes on this thread.
pub fn depth() -> usize {
    STACK.with_borrow(Vec::len)
}

fn push(tag: Tag) {
    STACK.with_borrow_mut(|stack| stack.push(tag));
}

fn pop() -> Option<Tag> {
    STACK.with_borrow_mut(Vec::pop)
}

/// An open nesting scope. Dereferences to the scoped [`Tag`].
///
/// Dropping the guard closes the scope: the innermost open element is popped
/// (whatever it is), then the scoped element drops every child element that
/// has since been attached somewhere else.
#[must_use = "the scope closes as soon as the guard is dropped"]
pub struct Scope {
    tag: Tag,
}

impl Deref for Scope {
    type Target = Tag;

    fn deref(&self) -> &Tag {
        &self.tag
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        let popped = pop();
        if popped.as_ref() != Some(&self.tag) {
            debug!(
                tag = %self.tag.name(),
                popped = ?popped.as_ref().map(Tag::name),
                "scope closed out of order"
            );
        }
        self.tag.reconcile();
    }
}

impl Tag {
    /// Open a nesting scope on this element.
    ///
    /// Until the returned guard is dropped, every element created on this
    /// thread is attached to this element (or to a scope opened later).
    ///
    /// ```
    /// use ptag::Tag;
    ///
    /// let div = Tag::void("div");
    /// {
    ///     let div = div.enter();
    ///     Tag::new("p", "hello")?;
    ///     {
    ///         let _p = Tag::new("p", "shing")?.enter();
    ///         Tag::new("span", "world")?;
    ///     }
    ///     div.affix("!")?;
    /// }
    /// assert_eq!(
    ///     div.to_string(),
    ///     "<div><p>hello</p><p>shing<span>world</span></p>!</div>"
    /// );
    /// # Ok::<(), ptag::Error>(())
    /// ```
    pub fn enter(&self) -> Scope {
        trace!(tag = %self.name(), depth = depth(), "entering scope");
        push(self.clone());
        Scope { tag: self.clone() }
    }

    /// Run `f` inside a nesting scope on this element.
    ///
    /// The scope is closed when `f` returns, or unwinds.
    pub fn scope<R>(&self, f: impl FnOnce(&Tag) -> R) -> R {
        let scope = self.enter();
        f(&scope)
    }

    /// Keep only text children and child elements still parented here.
    pub(crate) fn reconcile(&self) {
        trace_span!("reconcile", tag = %self.name());
        let mut data = self.0.borrow_mut();
        if let Some(children) = data.children.as_mut() {
            children.retain(|child| match child {
                Child::Text(_) => true,
                Child::Tag(tag) => tag.is_child_of(self),
            });
            trace!(kept = children.len(), "reconciled children");
        }
    }
}
