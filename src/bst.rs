//! Module containing the ordered index for records.
//!
//! The index is an unbalanced binary search tree keyed by the record timestamp. The nodes are
//! kept in an arena owned by the index. Every child link refers to a node that no other link
//! refers to, so the structure is a tree and dropping the arena drops every node.
use std::cmp::Ordering;

use crate::error::IndexError;
use crate::record::{Record, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Position of a node inside the arena of its index.
pub struct NodeId(usize);

#[derive(Debug)]
/// A single element of the tree holding one record.
pub struct Node
{
    record: Record,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl Node {
    /// The record stored in this node.
    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn timestamp(&self) -> Timestamp {
        self.record.timestamp
    }

    pub fn has_left(&self) -> bool {
        self.left.is_some()
    }

    pub fn has_right(&self) -> bool {
        self.right.is_some()
    }
}

#[derive(Debug, Default)]
/// Ordered index of records, keyed by timestamp.
///
/// Timestamps are unique: inserting a record whose timestamp is already present keeps the
/// stored record and discards the new one.
pub struct Index
{
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Index {
    /// Creates an empty index.
    pub fn new() -> Index {
        Index { nodes: Vec::new(), root: None }
    }

    /// Number of records stored in the index.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Allocates a new leaf node holding `record`.
    ///
    /// The node is not linked into the tree, the caller has to attach it to exactly one parent
    /// or make it the root.
    ///
    /// # Errors
    ///
    /// * `IndexError::AllocationFailure` - If the arena cannot grow by one node.
    fn create(&mut self, record: Record) -> Result<NodeId, IndexError> {
        self.nodes.try_reserve(1).map_err(|_| IndexError::AllocationFailure)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { record, left: None, right: None });
        Ok(id)
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Inserts a record into the index.
    ///
    /// The tree is descended by timestamp until an empty child is found, the new node takes that
    /// place. The first insert into an empty index creates the root. No rebalancing is done, so
    /// the insertion order determines the shape of the tree.
    ///
    /// If a record with the same timestamp already exists, nothing is changed and the new record
    /// is dropped without reporting it.
    ///
    /// # Errors
    ///
    /// * `IndexError::AllocationFailure` - If no memory is available for the new node. The index is
    ///     left unchanged in that case.
    pub fn insert(&mut self, record: Record) -> Result<(), IndexError> {
        let mut current = match self.root {
            Some(root) => root,
            None => {
                let root = self.create(record)?;
                self.root = Some(root);
                log::trace!(target: "envindex::bst", "Created root for timestamp {}", record.timestamp);
                return Ok(());
            }
        };

        // Walk down to the parent of the new leaf.
        let goes_left = loop {
            let node = self.node(current);
            let (next, goes_left) = match record.timestamp.cmp(&node.record.timestamp) {
                Ordering::Less => (node.left, true),
                Ordering::Greater => (node.right, false),
                Ordering::Equal => {
                    log::trace!(target: "envindex::bst", "Timestamp {} already indexed, keeping the stored record", record.timestamp);
                    return Ok(());
                }
            };
            match next {
                Some(child) => current = child,
                None => break goes_left,
            }
        };

        let leaf = self.create(record)?;
        let parent = &mut self.nodes[current.0];
        if goes_left {
            parent.left = Some(leaf);
        } else {
            parent.right = Some(leaf);
        }
        Ok(())
    }

    /// Looks up the record stored under `key`.
    ///
    /// Returns `None` if no record with this timestamp exists.
    pub fn lookup(&self, key: Timestamp) -> Option<&Record> {
        self.lookup_traced(key, |_| {})
    }

    /// Looks up the record stored under `key` and reports every visited node to `observer`.
    ///
    /// The observer is called before branching at each node, so it sees the search path from the
    /// root down to the matching node (or the last node before the empty child). On an empty
    /// index it is never called.
    pub fn lookup_traced<F>(&self, key: Timestamp, mut observer: F) -> Option<&Record>
        where F: FnMut(&Node)
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            observer(node);
            current = match key.cmp(&node.record.timestamp) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(&node.record),
            };
        }
        None
    }

    /// Returns an iterator over all records in ascending timestamp order.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { index: self, stack: Vec::new() };
        iter.descend_left(self.root);
        iter
    }

    /// Collects all records in ascending timestamp order.
    ///
    /// Every call walks the whole tree again.
    pub fn enumerate(&self) -> Vec<Record> {
        self.iter().copied().collect()
    }

    /// Number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut pending: Vec<(NodeId, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((id, depth)) = pending.pop() {
            height = height.max(depth);
            let node = self.node(id);
            for child in node.left.iter().chain(node.right.iter()) {
                pending.push((*child, depth + 1));
            }
        }
        height
    }

    /// Drops every node and returns the index to the empty state.
    ///
    /// Calling this on an empty index does nothing.
    pub fn release(&mut self) {
        if self.is_empty() {
            return;
        }
        log::debug!(target: "envindex::bst", "Releasing {} nodes", self.nodes.len());
        self.root = None;
        self.nodes = Vec::new();
    }
}

impl<'a> IntoIterator for &'a Index {
    type Item = &'a Record;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// In-order iterator over the records of an index.
///
/// Uses an explicit stack instead of recursion, so a fully skewed tree only costs heap memory.
pub struct Iter<'a> {
    index: &'a Index,
    stack: Vec<NodeId>,
}

impl<'a> Iter<'a> {
    fn descend_left(&mut self, mut current: Option<NodeId>) {
        let index = self.index;
        while let Some(id) = current {
            self.stack.push(id);
            current = index.node(id).left;
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<&'a Record> {
        let index = self.index;
        let node = index.node(self.stack.pop()?);
        self.descend_left(node.right);
        Some(&node.record)
    }
}
