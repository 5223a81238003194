//! Arena-backed doubly linked list used for recency tracking.
//!
//! Nodes live in a `Vec` and refer to each other by index, so the list never
//! hands out raw pointers. Freed slots are threaded onto a free list and reused
//! by the next insertion, which keeps every operation O(1) and the arena no
//! larger than the peak number of live entries.
//!
//! The front of the list is the most recently used end; the back is the least
//! recently used end.

use core::fmt;
use core::num::NonZeroUsize;

/// Sentinel index meaning "no node".
const NIL: usize = usize::MAX;

/// A stable handle to a node in a [`List`].
///
/// A handle stays valid until the node it points to is removed. Using a
/// handle after removal is a logic error; the list detects it and treats the
/// operation as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIndex(usize);

/// A node in the doubly linked list.
struct Node<T> {
    /// `None` for slots currently on the free list.
    val: Option<T>,
    prev: usize,
    next: usize,
}

/// A doubly linked list with a fixed capacity, stored in an arena.
///
/// # Examples
///
/// ```ignore
/// use docstore::list::List;
/// use core::num::NonZeroUsize;
///
/// let mut list = List::new(NonZeroUsize::new(2).unwrap());
/// let a = list.add(10).unwrap();
/// let _b = list.add(20).unwrap();
///
/// // List is now full
/// assert!(list.add(30).is_none());
///
/// list.move_to_front(a);
/// assert_eq!(list.remove_last(), Some(20));
/// ```
pub struct List<T> {
    /// Maximum number of items the list can hold.
    cap: NonZeroUsize,
    /// Current number of items in the list.
    len: usize,
    nodes: Vec<Node<T>>,
    /// Head of the free-slot chain, linked through `next`.
    free: usize,
    head: usize,
    tail: usize,
}

impl<T> List<T> {
    /// Creates a new List that holds at most `cap` items.
    pub fn new(cap: NonZeroUsize) -> List<T> {
        List {
            cap,
            len: 0,
            nodes: Vec::new(),
            free: NIL,
            head: NIL,
            tail: NIL,
        }
    }

    /// Returns the maximum number of items the list can hold.
    pub fn cap(&self) -> NonZeroUsize {
        self.cap
    }

    /// Returns the current number of items in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the list is at capacity.
    pub fn is_full(&self) -> bool {
        self.len == self.cap.get()
    }

    fn is_live(&self, idx: usize) -> bool {
        self.nodes.get(idx).is_some_and(|n| n.val.is_some())
    }

    /// Adds a value to the front of the list.
    ///
    /// Returns a handle to the new node, or `None` if the list is full.
    pub fn add(&mut self, val: T) -> Option<NodeIndex> {
        if self.is_full() {
            return None;
        }

        let idx = if self.free != NIL {
            let idx = self.free;
            self.free = self.nodes[idx].next;
            let node = &mut self.nodes[idx];
            node.val = Some(val);
            node.prev = NIL;
            node.next = NIL;
            idx
        } else {
            self.nodes.push(Node {
                val: Some(val),
                prev: NIL,
                next: NIL,
            });
            self.nodes.len() - 1
        };

        self.attach_front(idx);
        self.len += 1;
        Some(NodeIndex(idx))
    }

    /// Unlinks `idx` from its neighbours without freeing the slot.
    fn detach(&mut self, idx: usize) {
        let (prev, next) = {
            let node = &self.nodes[idx];
            (node.prev, node.next)
        };

        if prev != NIL {
            self.nodes[prev].next = next;
        } else {
            self.head = next;
        }

        if next != NIL {
            self.nodes[next].prev = prev;
        } else {
            self.tail = prev;
        }

        let node = &mut self.nodes[idx];
        node.prev = NIL;
        node.next = NIL;
    }

    /// Links a detached slot in as the first node.
    fn attach_front(&mut self, idx: usize) {
        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = self.head;
        if self.head != NIL {
            self.nodes[self.head].prev = idx;
        } else {
            self.tail = idx;
        }
        self.head = idx;
    }

    /// Detaches the slot, returns its value and puts the slot on the free list.
    fn release(&mut self, idx: usize) -> Option<T> {
        if !self.is_live(idx) {
            return None;
        }
        self.detach(idx);
        self.len -= 1;
        let node = &mut self.nodes[idx];
        let val = node.val.take();
        node.next = self.free;
        self.free = idx;
        val
    }

    /// Moves a node to the front of the list.
    pub fn move_to_front(&mut self, node: NodeIndex) {
        let idx = node.0;
        if !self.is_live(idx) || self.head == idx {
            return;
        }
        self.detach(idx);
        self.attach_front(idx);
    }

    /// Removes the given node and returns its value.
    pub fn remove(&mut self, node: NodeIndex) -> Option<T> {
        self.release(node.0)
    }

    /// Removes the first (most recently used) item from the list.
    pub fn remove_first(&mut self) -> Option<T> {
        self.release(self.head)
    }

    /// Removes the last (least recently used) item from the list.
    pub fn remove_last(&mut self) -> Option<T> {
        self.release(self.tail)
    }

    /// Returns a reference to the value stored at `node`.
    pub fn get(&self, node: NodeIndex) -> Option<&T> {
        self.nodes.get(node.0).and_then(|n| n.val.as_ref())
    }

    /// Returns a mutable reference to the value stored at `node`.
    pub fn get_mut(&mut self, node: NodeIndex) -> Option<&mut T> {
        self.nodes.get_mut(node.0).and_then(|n| n.val.as_mut())
    }

    /// Replaces the value stored at `node`, returning the previous one.
    ///
    /// Does not change the node's position.
    pub fn update(&mut self, node: NodeIndex, val: T) -> Option<T> {
        let slot = self.nodes.get_mut(node.0)?;
        if slot.val.is_none() {
            return None;
        }
        slot.val.replace(val)
    }

    /// Returns a reference to the last (least recently used) value.
    pub fn back(&self) -> Option<&T> {
        self.nodes.get(self.tail).and_then(|n| n.val.as_ref())
    }

    /// Returns a reference to the first (most recently used) value.
    pub fn front(&self) -> Option<&T> {
        self.nodes.get(self.head).and_then(|n| n.val.as_ref())
    }

    /// Returns true if `node` is the first (most recently used) node.
    pub fn is_front(&self, node: NodeIndex) -> bool {
        self.head != NIL && self.head == node.0
    }

    /// Removes every item and releases the arena.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.len = 0;
        self.free = NIL;
        self.head = NIL;
        self.tail = NIL;
    }

    /// Iterates from the front (most recent) to the back (least recent).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("cap", &self.cap)
            .field("len", &self.len)
            .field("items", &DebugItems(self))
            .finish()
    }
}

struct DebugItems<'a, T>(&'a List<T>);

impl<T: fmt::Debug> fmt::Debug for DebugItems<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Front-to-back iterator over a [`List`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    list: &'a List<T>,
    cursor: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.cursor == NIL {
            return None;
        }
        let node = &self.list.nodes[self.cursor];
        self.cursor = node.next;
        self.remaining -= 1;
        node.val.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
