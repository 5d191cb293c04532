// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The search tree. Every position a search touches lives in one arena and
//! is referred to by its `NodeId`. A node's children and its evaluation are
//! computed on first request and cached until explicitly dropped.
use std::error::Error;
use std::fmt;

use crate::eval::{BoardEvaluator, Score};
use crate::movegen::MoveGenerator;
use crate::position::Position;

/// Index of a node in a `PositionTree`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PruneError {
    /// The node's children have not been generated, or were dumped.
    NotExpanded,
    /// The keep mask does not have one entry per cached child.
    LengthMismatch { children: usize, mask: usize },
}

impl fmt::Display for PruneError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PruneError::NotExpanded => write!(f, "cannot prune a node whose children are not cached"),
            PruneError::LengthMismatch { children, mask } => write!(
                f,
                "keep mask has {} entries but the node has {} children",
                mask, children
            ),
        }
    }
}

impl Error for PruneError {}

struct Node {
    position: Position,
    evaluation: Option<Score>,
    children: Option<Vec<NodeId>>,
}

impl Node {
    fn new(position: Position) -> Node {
        Node {
            position,
            evaluation: None,
            children: None,
        }
    }
}

/// An arena of positions rooted at the position a search started from.
///
/// The tree owns the move generator and evaluator it uses, so a tree must
/// not be shared between searches.
pub struct PositionTree<E> {
    nodes: Vec<Node>,
    generator: MoveGenerator,
    evaluator: E,
    expansions: u64,
    evaluations: u64,
}

impl<E: BoardEvaluator> PositionTree<E> {
    pub fn new(root: Position) -> PositionTree<E> {
        PositionTree::with_evaluator(root, E::default())
    }

    pub fn with_evaluator(root: Position, evaluator: E) -> PositionTree<E> {
        PositionTree {
            nodes: vec![Node::new(root)],
            generator: MoveGenerator::new(),
            evaluator,
            expansions: 0,
            evaluations: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn position(&self, id: NodeId) -> &Position {
        &self.nodes[id.0].position
    }

    /// The legal children of `id`, generated on first request.
    pub fn children(&mut self, id: NodeId) -> &[NodeId] {
        if self.nodes[id.0].children.is_none() {
            let children = self.generator.children(&self.nodes[id.0].position);
            let first = self.nodes.len();
            self.nodes.extend(children.into_iter().map(Node::new));
            let ids = (first..self.nodes.len()).map(NodeId).collect();
            self.nodes[id.0].children = Some(ids);
            self.expansions += 1;
        }

        match self.nodes[id.0].children {
            Some(ref ids) => ids.as_slice(),
            None => unreachable!(),
        }
    }

    /// The children of `id` if they are currently cached.
    pub fn cached_children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.nodes[id.0].children.as_ref().map(|ids| ids.as_slice())
    }

    /// Keeps only the cached children whose entry in `keep` is true.
    pub fn prune(&mut self, id: NodeId, keep: &[bool]) -> Result<(), PruneError> {
        let children = match self.nodes[id.0].children {
            Some(ref mut ids) => ids,
            None => return Err(PruneError::NotExpanded),
        };

        if children.len() != keep.len() {
            return Err(PruneError::LengthMismatch {
                children: children.len(),
                mask: keep.len(),
            });
        }

        let mut flags = keep.iter();
        children.retain(|_| *flags.next().unwrap_or(&false));
        Ok(())
    }

    /// Forgets the cached children of `id`; the next `children` call
    /// generates them again. Dropped nodes stay in the arena, unreachable.
    pub fn dump_children(&mut self, id: NodeId) {
        self.nodes[id.0].children = None;
    }

    /// The evaluator's score for `id`, computed once.
    pub fn evaluate(&mut self, id: NodeId) -> Score {
        if let Some(score) = self.nodes[id.0].evaluation {
            return score;
        }

        let score = self.evaluator.evaluate(&self.nodes[id.0].position);
        self.nodes[id.0].evaluation = Some(score);
        self.evaluations += 1;
        score
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Number of nodes in the arena, reachable or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// How many times children were generated.
    pub fn expansions(&self) -> u64 {
        self.expansions
    }

    /// How many evaluator calls were made, cache hits excluded.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}
