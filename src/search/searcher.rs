// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::error::Error;
use std::fmt;
use std::marker::PhantomData;
use std::time::{Duration, Instant};

use crate::eval::{BoardEvaluator, Score};
use crate::moves::Move;
use crate::position::{Position, TransitionError};
use crate::search::{DataRecorder, NodeId, NullDataRecorder, PositionTree, Record};

pub const DEFAULT_DEPTH: u32 = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Number of plies to look ahead. The last ply is scored by evaluating
    /// the children of the deepest nodes directly.
    pub depth: u32,
}

impl SearchConfig {
    pub fn new(depth: u32) -> SearchConfig {
        if depth == 0 {
            warn!("search depth 0 is not meaningful, searching to depth 1");
            return SearchConfig { depth: 1 };
        }

        SearchConfig { depth }
    }
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            depth: DEFAULT_DEPTH,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchResult {
    /// The move to play, `None` when the root has no legal move.
    pub best_move: Option<Move>,
    pub score: Score,
    /// The chosen line, starting with `best_move`.
    pub principal_variation: Vec<Move>,
    pub nodes_expanded: u64,
    pub leaves_evaluated: u64,
    pub expansion_time: Duration,
    pub evaluation_time: Duration,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// Two consecutive positions on the chosen line were not one move apart.
    BrokenLine(TransitionError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SearchError::BrokenLine(err) => write!(f, "could not recover a move from the chosen line: {}", err),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SearchError::BrokenLine(err) => Some(err),
        }
    }
}

impl From<TransitionError> for SearchError {
    fn from(err: TransitionError) -> SearchError {
        SearchError::BrokenLine(err)
    }
}

pub trait Searcher {
    fn search(&mut self, pos: &Position) -> Result<SearchResult, SearchError>;
}

/// A chosen line and its value. The path runs from the deepest position back
/// up to the node it was computed for.
struct Line {
    score: Score,
    path: Vec<NodeId>,
}

/// Fixed-depth minimax. The side to move at the root maximizes and its
/// opponent minimizes; among equal scores the first child generated wins.
/// Evaluations are negated when the evaluator favors the other side, so a
/// search always plays for the side to move. Every call builds a fresh
/// `PositionTree`, so nothing carries over from one search to the next.
pub struct MinimaxSearcher<E> {
    config: SearchConfig,
    recorder: Box<dyn DataRecorder>,
    evaluator: PhantomData<fn() -> E>,
}

impl<E: BoardEvaluator> MinimaxSearcher<E> {
    pub fn new(config: SearchConfig) -> MinimaxSearcher<E> {
        MinimaxSearcher::with_recorder(config, Box::new(NullDataRecorder))
    }

    pub fn with_recorder(config: SearchConfig, recorder: Box<dyn DataRecorder>) -> MinimaxSearcher<E> {
        MinimaxSearcher {
            config,
            recorder,
            evaluator: PhantomData,
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Searches an existing tree from its root. Children and evaluations
    /// already cached in the tree are reused.
    pub fn search_tree(&self, tree: &mut PositionTree<E>) -> Result<SearchResult, SearchError> {
        let root = tree.root();
        let depth = self.config.depth.max(1);
        let negate = tree.evaluator().favors() != tree.position(root).side_to_move();

        debug!("expanding search tree to depth {}", depth);
        let expansion_start = Instant::now();
        expand(tree, root, depth);
        let expansion_time = expansion_start.elapsed();

        let evaluations_before = tree.evaluations();
        let evaluation_start = Instant::now();
        let line = step(tree, depth, true, negate, root);
        let evaluation_time = evaluation_start.elapsed();

        let mut principal_variation = Vec::with_capacity(line.path.len());
        for pair in line.path.windows(2).rev() {
            let (child, parent) = (pair[0], pair[1]);
            principal_variation.push(tree.position(parent).transition_to(tree.position(child))?);
        }

        let result = SearchResult {
            best_move: principal_variation.first().cloned(),
            score: line.score,
            principal_variation,
            nodes_expanded: tree.expansions(),
            leaves_evaluated: tree.evaluations() - evaluations_before,
            expansion_time,
            evaluation_time,
        };

        match result.best_move {
            Some(mov) => info!(
                "best move {} ({}), pv: {}",
                mov,
                result.score,
                result
                    .principal_variation
                    .iter()
                    .map(|m| m.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            ),
            None => warn!("no legal move from {}", tree.position(root).as_fen()),
        }

        info!(
            "expanded {} nodes in {:?}, evaluated {} leaves in {:?}",
            result.nodes_expanded, result.expansion_time, result.leaves_evaluated, result.evaluation_time
        );

        Ok(result)
    }
}

impl<E: BoardEvaluator> Searcher for MinimaxSearcher<E> {
    fn search(&mut self, pos: &Position) -> Result<SearchResult, SearchError> {
        let mut tree = PositionTree::new(pos.clone());
        let result = self.search_tree(&mut tree)?;
        let record = Record::from_result(self.config.depth, &result);
        if let Err(err) = self.recorder.record(pos, &record) {
            warn!("failed to record search statistics: {}", err);
        }

        Ok(result)
    }
}

impl<E: BoardEvaluator> Default for MinimaxSearcher<E> {
    fn default() -> MinimaxSearcher<E> {
        MinimaxSearcher::new(SearchConfig::default())
    }
}

/// Generates children for every node less than `depth` plies below `id`.
fn expand<E: BoardEvaluator>(tree: &mut PositionTree<E>, id: NodeId, depth: u32) {
    if depth == 0 {
        return;
    }

    let children = tree.children(id).to_vec();
    for child in children {
        expand(tree, child, depth - 1);
    }
}

fn improves(maximizing: bool, candidate: Score, best: Score) -> bool {
    if maximizing {
        candidate > best
    } else {
        candidate < best
    }
}

fn step<E: BoardEvaluator>(
    tree: &mut PositionTree<E>,
    depth: u32,
    maximizing: bool,
    negate: bool,
    id: NodeId,
) -> Line {
    if depth <= 1 {
        return leaf(tree, maximizing, negate, id);
    }

    let children = tree.children(id).to_vec();
    let (first, rest) = match children.split_first() {
        Some(split) => split,
        // Nothing to recurse into; the last-ply rule scores the dead end.
        None => return leaf(tree, maximizing, negate, id),
    };

    let mut best = step(tree, depth - 1, !maximizing, negate, *first);
    for &child in rest {
        let line = step(tree, depth - 1, !maximizing, negate, child);
        if improves(maximizing, line.score, best.score) {
            best = line;
        }
    }

    best.path.push(id);
    best
}

/// Scores `id` by evaluating its children and picking the best for the side
/// to move. A node without children is lost for the side to move.
fn leaf<E: BoardEvaluator>(tree: &mut PositionTree<E>, maximizing: bool, negate: bool, id: NodeId) -> Line {
    let children = tree.children(id).to_vec();
    let mut best: Option<(NodeId, Score)> = None;
    for child in children {
        let score = if negate {
            -tree.evaluate(child)
        } else {
            tree.evaluate(child)
        };
        let better = match best {
            Some((_, best_score)) => improves(maximizing, score, best_score),
            None => true,
        };

        if better {
            best = Some((child, score));
        }
    }

    match best {
        Some((child, score)) => Line {
            score,
            path: vec![child, id],
        },
        None => {
            debug!("no legal move in {}", tree.position(id).as_fen());
            Line {
                score: Score::no_moves_for_maximizer(maximizing),
                path: vec![id],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{MaterialEvaluator, WeightedCountEvaluator};
    use crate::types::{PieceKind, Square};

    fn search<E: BoardEvaluator>(fen: &str, depth: u32) -> SearchResult {
        let pos = Position::from_fen(fen).unwrap();
        MinimaxSearcher::<E>::new(SearchConfig::new(depth))
            .search(&pos)
            .unwrap()
    }

    #[test]
    fn depth_zero_is_clamped() {
        assert_eq!(1, SearchConfig::new(0).depth);
        assert_eq!(4, SearchConfig::default().depth);
    }

    #[test]
    fn takes_hanging_queen() {
        let result = search::<MaterialEvaluator>("4k3/8/8/3q4/8/8/3R4/4K3 w", 1);
        assert_eq!(Some(Move::quiet(Square::D2, Square::D5)), result.best_move);
        assert_eq!(Score::Evaluated(5f32), result.score);
        assert_eq!(1, result.principal_variation.len());
    }

    #[test]
    fn promotes_to_queen() {
        let result = search::<MaterialEvaluator>("8/P3k3/8/8/8/8/8/4K3 w", 1);
        assert_eq!(
            Some(Move::promotion(Square::A7, Square::A8, PieceKind::Queen)),
            result.best_move
        );
    }

    #[test]
    fn finds_mate_in_one() {
        let result = search::<MaterialEvaluator>("6k1/5ppp/8/8/8/8/8/R5K1 w", 2);
        assert_eq!(Some(Move::quiet(Square::A1, Square::A8)), result.best_move);
        assert_eq!(Score::Win, result.score);
    }

    #[test]
    fn black_plays_for_black() {
        // material favors White, so the score is flipped to Black's side
        let result = search::<MaterialEvaluator>("4k3/3r4/8/8/8/8/3Q4/4K3 b", 1);
        assert_eq!(Some(Move::quiet(Square::D7, Square::D2)), result.best_move);
        assert_eq!(Score::Evaluated(5f32), result.score);
    }

    #[test]
    fn weighted_count_white_takes_hanging_queen() {
        let result = search::<WeightedCountEvaluator>("4k3/8/8/3q4/8/8/3R4/4K3 w", 1);
        assert_eq!(Some(Move::quiet(Square::D2, Square::D5)), result.best_move);
        assert_eq!(Score::Evaluated(6.5f32), result.score);
    }

    #[test]
    fn weighted_count_black_takes_hanging_queen() {
        let result = search::<WeightedCountEvaluator>("4k3/8/8/3Q4/8/8/3r4/4K3 b", 1);
        assert_eq!(Some(Move::quiet(Square::D2, Square::D5)), result.best_move);
        assert_eq!(Score::Evaluated(6.5f32), result.score);
    }

    #[test]
    fn weighted_count_capture_survives_the_reply() {
        let result = search::<WeightedCountEvaluator>("4k3/8/8/3q4/8/8/3R4/4K3 w", 2);
        assert_eq!(Some(Move::quiet(Square::D2, Square::D5)), result.best_move);
        assert_eq!(Score::Evaluated(6.5f32), result.score);
        assert_eq!(2, result.principal_variation.len());
    }

    #[test]
    fn ties_go_to_first_child() {
        // every child of the start position has equal material
        let result = search::<MaterialEvaluator>("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w", 1);
        assert_eq!(Some(Move::quiet(Square::B1, Square::A3)), result.best_move);
        assert_eq!(Score::Evaluated(0f32), result.score);
    }

    #[test]
    fn ties_go_to_first_child_below_the_root() {
        let result = search::<MaterialEvaluator>("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w", 2);
        assert_eq!(
            vec![
                Move::quiet(Square::B1, Square::A3),
                Move::quiet(Square::B8, Square::A6)
            ],
            result.principal_variation
        );
        assert_eq!(Score::Evaluated(0f32), result.score);
    }

    #[test]
    fn principal_variation_has_one_move_per_ply() {
        let result = search::<WeightedCountEvaluator>(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w",
            3,
        );
        assert_eq!(3, result.principal_variation.len());
        assert_eq!(result.best_move, result.principal_variation.first().cloned());
        assert_eq!(421, result.nodes_expanded);
    }

    #[test]
    fn no_moves_at_root() {
        let result = search::<MaterialEvaluator>("R5k1/5ppp/8/8/8/8/8/6K1 b", 3);
        assert_eq!(None, result.best_move);
        assert!(result.principal_variation.is_empty());
        assert_eq!(Score::Loss, result.score);
    }

    #[test]
    fn stalemate_counts_as_loss() {
        // black is not in check but has no legal move
        let result = search::<MaterialEvaluator>("7k/5Q2/6K1/8/8/8/8/8 b", 2);
        assert_eq!(None, result.best_move);
        assert_eq!(Score::Loss, result.score);
    }

    #[test]
    fn search_is_deterministic() {
        let fen = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b";
        let first = search::<WeightedCountEvaluator>(fen, 2);
        let second = search::<WeightedCountEvaluator>(fen, 2);
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.score, second.score);
        assert_eq!(first.principal_variation, second.principal_variation);
    }
}
