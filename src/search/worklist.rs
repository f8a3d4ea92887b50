/*!
# Work Lists

Transient containers of values awaiting expansion during one search call: a
LIFO [`Stack`] for the depth-first key search and a FIFO [`Queue`] for the
breadth-first key-chain search.

When a work list is created with tracing enabled, every push and pop emits a
`trace` record under this module's log target, reporting the container depth
and the element now on top (stack) or in front (queue).
*/
use log::trace;
use std::collections::VecDeque;
use std::fmt::{self, Debug};

use crate::search::error::SearchError;

/// Which kind of work list an event or error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkListKind {
    Stack,
    Queue,
}

impl fmt::Display for WorkListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stack => f.write_str("stack"),
            Self::Queue => f.write_str("queue"),
        }
    }
}

/// Common interface of [`Stack`] and [`Queue`].
pub trait WorkList<T> {
    /// The kind of this work list.
    fn kind(&self) -> WorkListKind;

    /// Adds an element.
    fn push(&mut self, item: T);

    /// Removes and returns the next element, if any.
    fn pop(&mut self) -> Option<T>;

    /// Returns the element that [`WorkList::pop`] would return next.
    fn peek(&self) -> Option<&T>;

    /// Number of elements currently held.
    fn len(&self) -> usize;

    /// Whether no elements are held.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pushes each item in iteration order.
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I)
    where
        Self: Sized,
    {
        for item in items {
            self.push(item);
        }
    }

    /// Like [`WorkList::pop`], for call sites where the work list is known
    /// to be non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyContainerAccess`] if the work list is
    /// empty.
    fn try_pop(&mut self) -> Result<T, SearchError> {
        let kind = self.kind();
        self.pop().ok_or(SearchError::EmptyContainerAccess(kind))
    }
}

/// Emits one trace record for a push or pop.
fn trace_event<T: Debug>(
    kind: WorkListKind,
    event: &str,
    depth: usize,
    next: Option<&T>,
) {
    let end = match kind {
        WorkListKind::Stack => "top",
        WorkListKind::Queue => "front",
    };
    match next {
        Some(item) => {
            trace!("{kind} {event}: depth {depth}, {end}: {item:?}");
        }
        None => trace!("{kind} {event}: depth {depth}, empty"),
    }
}

/// LIFO work list backed by a `Vec`.
#[derive(Debug, Clone)]
pub struct Stack<T> {
    items: Vec<T>,
    trace: bool,
}

impl<T: Debug> Stack<T> {
    /// Constructs an empty stack; `trace` enables push/pop trace records.
    #[must_use]
    pub const fn new(trace: bool) -> Self {
        Self {
            items: Vec::new(),
            trace,
        }
    }

    /// Consumes the stack, returning its elements from bottom to top.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Debug> WorkList<T> for Stack<T> {
    fn kind(&self) -> WorkListKind {
        WorkListKind::Stack
    }

    fn push(&mut self, item: T) {
        self.items.push(item);
        if self.trace {
            trace_event(self.kind(), "push", self.items.len(), self.peek());
        }
    }

    fn pop(&mut self) -> Option<T> {
        let item = self.items.pop();
        if self.trace && item.is_some() {
            trace_event(self.kind(), "pop", self.items.len(), self.peek());
        }
        item
    }

    fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// FIFO work list backed by a `VecDeque`.
#[derive(Debug, Clone)]
pub struct Queue<T> {
    items: VecDeque<T>,
    trace: bool,
}

impl<T: Debug> Queue<T> {
    /// Constructs an empty queue; `trace` enables push/pop trace records.
    #[must_use]
    pub const fn new(trace: bool) -> Self {
        Self {
            items: VecDeque::new(),
            trace,
        }
    }

    /// Consumes the queue, returning its elements from front to back.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items.into()
    }
}

impl<T: Debug> WorkList<T> for Queue<T> {
    fn kind(&self) -> WorkListKind {
        WorkListKind::Queue
    }

    fn push(&mut self, item: T) {
        self.items.push_back(item);
        if self.trace {
            trace_event(self.kind(), "push", self.items.len(), self.peek());
        }
    }

    fn pop(&mut self) -> Option<T> {
        let item = self.items.pop_front();
        if self.trace && item.is_some() {
            trace_event(self.kind(), "pop", self.items.len(), self.peek());
        }
        item
    }

    fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_is_lifo() {
        let mut stack = Stack::new(false);
        stack.extend([1, 2, 3]);
        assert_eq!(stack.peek(), Some(&3));
        assert_eq!(stack.pop(), Some(3));
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.into_vec(), vec![1]);
    }

    #[test]
    fn queue_is_fifo() {
        let mut queue = Queue::new(false);
        queue.extend(["a", "b", "c"]);
        assert_eq!(queue.peek(), Some(&"a"));
        assert_eq!(queue.pop(), Some("a"));
        queue.push("d");
        assert_eq!(queue.into_vec(), vec!["b", "c", "d"]);
    }

    #[test]
    fn try_pop_on_empty_reports_container() {
        let mut stack: Stack<u8> = Stack::new(false);
        assert_eq!(
            stack.try_pop(),
            Err(SearchError::EmptyContainerAccess(WorkListKind::Stack))
        );
        let mut queue: Queue<u8> = Queue::new(false);
        assert!(queue.is_empty());
        assert_eq!(queue.peek(), None);
        assert_eq!(
            queue.try_pop(),
            Err(SearchError::EmptyContainerAccess(WorkListKind::Queue))
        );
    }

    #[test]
    fn tracing_does_not_change_contents() {
        env_logger::try_init().ok();
        let mut traced = Queue::new(true);
        let mut plain = Queue::new(false);
        for i in 0..5 {
            traced.push(i);
            plain.push(i);
        }
        assert_eq!(traced.pop(), plain.pop());
        assert_eq!(traced.into_vec(), plain.into_vec());
    }
}
