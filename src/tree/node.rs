//! Trie vertex of the path tree.
//!
//! A node owns its label, its payload slot and its children. Children are
//! dispatched through `indices`, a byte list parallel to `children` holding
//! the first byte of each static child's label, or a marker byte (`:` or
//! `*`) for parameter children.

use std::fmt;

use super::pattern::{Token, CATCH_ALL_MARKER, PARAM_MARKER};
use crate::error::InsertError;

/// Kind of a trie node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Literal text, matched byte for byte
    Static,
    /// Named parameter, matches one non-empty path segment
    Parameter,
    /// Catch-all parameter, matches the remainder of the path
    CatchAll,
}

/// Structural conflict found while inserting a pattern.
///
/// Raised before any mutation of the node it was found at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Conflict {
    /// A catch-all would share its position with other children
    CatchAll,
    /// A parameter position is already bound to another name
    ParamName { name: String, existing: String },
}

impl Conflict {
    pub(crate) fn into_error(self, pattern: &str) -> InsertError {
        match self {
            Conflict::CatchAll => InsertError::ConflictingRoute(pattern.to_string()),
            Conflict::ParamName { name, existing } => InsertError::ParameterNameConflict {
                pattern: pattern.to_string(),
                name,
                existing,
            },
        }
    }
}

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) kind: NodeKind,
    /// Literal text for static nodes, parameter name otherwise
    pub(crate) label: Vec<u8>,
    pub(crate) payload: Option<T>,
    pub(crate) indices: Vec<u8>,
    pub(crate) children: Vec<Node<T>>,
    /// Parameter names along the root-to-node path, set on terminal nodes
    pub(crate) param_names: Vec<String>,
}

impl<T> Node<T> {
    pub(crate) fn new(kind: NodeKind, label: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            label: label.into(),
            payload: None,
            indices: Vec::new(),
            children: Vec::new(),
            param_names: Vec::new(),
        }
    }

    /// Byte under which this node is indexed by its parent.
    fn index_byte(&self) -> u8 {
        match self.kind {
            NodeKind::Static => self.label[0],
            NodeKind::Parameter => PARAM_MARKER,
            NodeKind::CatchAll => CATCH_ALL_MARKER,
        }
    }

    /// Position of the child indexed under `c`.
    pub(crate) fn find_child(&self, c: u8) -> Option<usize> {
        debug_assert_eq!(self.indices.len(), self.children.len());
        self.indices.iter().position(|&b| b == c)
    }

    /// Like [`find_child`](Self::find_child), restricted to static children.
    ///
    /// Request paths may contain `:` or `*` bytes, which must not dispatch
    /// into parameter children.
    fn static_child(&self, c: u8) -> Option<usize> {
        self.find_child(c)
            .filter(|&i| self.children[i].kind == NodeKind::Static)
    }

    /// Append a child, keeping a catch-all child the only child of its parent.
    pub(crate) fn add_child(&mut self, child: Node<T>) -> Result<usize, Conflict> {
        let has_catch_all = self.indices.contains(&CATCH_ALL_MARKER);
        if has_catch_all || (child.kind == NodeKind::CatchAll && !self.children.is_empty()) {
            return Err(Conflict::CatchAll);
        }

        self.indices.push(child.index_byte());
        self.children.push(child);
        Ok(self.children.len() - 1)
    }

    /// Split a static node so that it keeps `label[..offset]` and gains a
    /// single static child holding `label[offset..]` together with the
    /// node's former payload and children.
    pub(crate) fn split_at(&mut self, offset: usize) {
        debug_assert_eq!(self.kind, NodeKind::Static);
        debug_assert!(offset > 0 && offset < self.label.len());

        let child = Node {
            kind: NodeKind::Static,
            label: self.label.split_off(offset),
            payload: self.payload.take(),
            indices: std::mem::take(&mut self.indices),
            children: std::mem::take(&mut self.children),
            param_names: std::mem::take(&mut self.param_names),
        };

        self.indices.push(child.index_byte());
        self.children.push(child);
    }

    /// Insert literal `text` starting at this static node, then the
    /// remaining tokens. Returns the node terminating the pattern.
    ///
    /// Every conflict check happens before the first split or attachment;
    /// past that point only freshly created nodes are visited, so a failed
    /// insert never changes the tree.
    pub(crate) fn insert_static(
        &mut self,
        text: &[u8],
        rest: &[Token<'_>],
    ) -> Result<&mut Self, Conflict> {
        debug_assert_eq!(self.kind, NodeKind::Static);

        let common = common_prefix(&self.label, text);

        if common < self.label.len() {
            // After the split the only child is the static remainder
            if common == text.len() && matches!(rest.first(), Some(Token::CatchAll(_))) {
                return Err(Conflict::CatchAll);
            }
            self.split_at(common);
        }

        let text = &text[common..];
        if text.is_empty() {
            self.insert_tokens(rest)
        } else {
            self.insert_literal(text, rest)
        }
    }

    /// Insert tokens below this node, whose own label is fully consumed.
    pub(crate) fn insert_tokens(&mut self, tokens: &[Token<'_>]) -> Result<&mut Self, Conflict> {
        match tokens.split_first() {
            None => Ok(self),
            Some((Token::Static(text), rest)) => self.insert_literal(text.as_bytes(), rest),
            Some((Token::Param(name), rest)) => self.insert_param(NodeKind::Parameter, name, rest),
            Some((Token::CatchAll(name), rest)) => self.insert_param(NodeKind::CatchAll, name, rest),
        }
    }

    /// Descend into the static child sharing `text`'s first byte, or attach
    /// a new one holding all of `text`.
    fn insert_literal(&mut self, text: &[u8], rest: &[Token<'_>]) -> Result<&mut Self, Conflict> {
        match self.static_child(text[0]) {
            Some(i) => self.children[i].insert_static(text, rest),
            None => {
                let i = self.add_child(Node::new(NodeKind::Static, text))?;
                self.children[i].insert_tokens(rest)
            }
        }
    }

    fn insert_param(
        &mut self,
        kind: NodeKind,
        name: &str,
        rest: &[Token<'_>],
    ) -> Result<&mut Self, Conflict> {
        let marker = match kind {
            NodeKind::CatchAll => CATCH_ALL_MARKER,
            _ => PARAM_MARKER,
        };

        let i = match self.find_child(marker) {
            Some(i) => {
                let existing = &self.children[i].label;
                if existing.as_slice() != name.as_bytes() {
                    return Err(Conflict::ParamName {
                        name: name.to_string(),
                        existing: String::from_utf8_lossy(existing).into_owned(),
                    });
                }
                i
            }
            None => self.add_child(Node::new(kind, name))?,
        };

        self.children[i].insert_tokens(rest)
    }

    /// Match `path[pos..]` against this node and its descendants.
    ///
    /// Captured values are pushed to `values` in path order. On `None`,
    /// `values` is left as it was on entry.
    pub(crate) fn find<'a>(
        &'a self,
        path: &'a str,
        pos: usize,
        values: &mut Vec<&'a str>,
    ) -> Option<&'a Self> {
        let bytes = path.as_bytes();

        match self.kind {
            NodeKind::Static => {
                if !bytes[pos..].starts_with(&self.label) {
                    return None;
                }

                let end = pos + self.label.len();
                if end < bytes.len() {
                    return self.find_children(path, end, values);
                }

                if self.payload.is_some() {
                    return Some(self);
                }

                // `/files/*rest` also matches `/files/`, with an empty capture
                let i = self.find_child(CATCH_ALL_MARKER)?;
                let child = &self.children[i];
                child.payload.as_ref()?;
                values.push(&path[end..]);
                Some(child)
            }
            NodeKind::Parameter => {
                let end = bytes[pos..]
                    .iter()
                    .position(|&b| b == b'/')
                    .map_or(bytes.len(), |i| pos + i);

                if end == pos {
                    return None;
                }

                values.push(path.get(pos..end)?);

                let found = if end == bytes.len() {
                    self.payload.as_ref().map(|_| self)
                } else {
                    self.find_children(path, end, values)
                };

                if found.is_none() {
                    values.pop();
                }
                found
            }
            NodeKind::CatchAll => {
                self.payload.as_ref()?;
                values.push(path.get(pos..)?);
                Some(self)
            }
        }
    }

    /// Try children in specificity order: static, then parameter, then
    /// catch-all. A failed branch falls through to the next one.
    fn find_children<'a>(
        &'a self,
        path: &'a str,
        pos: usize,
        values: &mut Vec<&'a str>,
    ) -> Option<&'a Self> {
        let next = path.as_bytes()[pos];

        if let Some(i) = self.static_child(next) {
            if let Some(found) = self.children[i].find(path, pos, values) {
                return Some(found);
            }
        }

        if let Some(i) = self.find_child(PARAM_MARKER) {
            if let Some(found) = self.children[i].find(path, pos, values) {
                return Some(found);
            }
        }

        let i = self.find_child(CATCH_ALL_MARKER)?;
        self.children[i].find(path, pos, values)
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind)
            .field("label", &String::from_utf8_lossy(&self.label))
            .field("payload", &self.payload)
            .field("indices", &String::from_utf8_lossy(&self.indices))
            .field("param_names", &self.param_names)
            .field("children", &self.children)
            .finish()
    }
}

/// Length in bytes of the longest common prefix of `a` and `b`.
#[inline]
fn common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
