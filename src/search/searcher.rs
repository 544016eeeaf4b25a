// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::eval::{BoardEvaluator, PieceSquareEvaluator, Score};
use crate::move_generator::legal_moves;
use crate::moves::Move;
use crate::position::Position;
use crate::search::{DataRecorder, Record};
use crate::types::Color;

/// Number of plies searched below each root move unless configured otherwise.
pub const DEFAULT_DEPTH: u32 = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// None if the side to move had no legal move.
    pub best_move: Option<Move>,
    pub score: Score,
    pub nodes_searched: u64,
}

/// Exhaustive fixed-depth minimax. White maximizes and Black minimizes the evaluator's score.
/// There is no pruning and no move ordering: every legal line is searched to the configured depth
/// below each root move, and among equally scored root moves the first one generated wins.
pub struct Searcher<E> {
    evaluator: E,
    depth: u32,
    nodes_searched: u64,
}

pub type MinimaxSearcher = Searcher<PieceSquareEvaluator>;

impl<E: BoardEvaluator> Searcher<E> {
    pub fn new(depth: u32) -> Searcher<E> {
        Searcher {
            evaluator: Default::default(),
            depth,
            nodes_searched: 0,
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn set_depth(&mut self, depth: u32) {
        self.depth = depth;
    }

    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Picks the best move for `side`. Each legal root move is scored by a minimax search of the
    /// configured depth from the resulting position. The search works on copies; `pos` is never
    /// modified.
    pub fn search<R: DataRecorder>(
        &mut self,
        pos: &Position,
        side: Color,
        recorder: &R,
    ) -> SearchResult {
        self.nodes_searched = 0;
        let mut root = *pos;
        root.reset_en_passant(side);

        let mut best: Option<(Move, Score)> = None;
        for mov in legal_moves(&root, side) {
            let mut child = root;
            child.apply_move(mov);
            let score = self.minimax(&child, self.depth, side.toggle());
            debug!("root move {} scores {}", mov, score);
            let improves = match best {
                Some((_, best_score)) => prefers(side, score, best_score),
                None => true,
            };

            if improves {
                best = Some((mov, score));
            }
        }

        let result = match best {
            Some((mov, score)) => SearchResult {
                best_move: Some(mov),
                score,
                nodes_searched: self.nodes_searched,
            },
            None => SearchResult {
                best_move: None,
                score: self.evaluator.evaluate(&root, self.depth),
                nodes_searched: self.nodes_searched,
            },
        };

        let record = Record {
            fen: String::new(),
            depth: self.depth,
            nodes: result.nodes_searched,
            score: result.score.centipawns(),
            best_move: result
                .best_move
                .map(|m| m.to_string())
                .unwrap_or_default(),
        };
        recorder.record(pos, side, &record);
        result
    }

    /// Scores `pos` with `to_move` to play, searching `depth` more plies. Leaves, and positions
    /// where either side is mated or has no moves, are scored by the evaluator with the depth
    /// that remained.
    pub fn minimax(&mut self, pos: &Position, depth: u32, to_move: Color) -> Score {
        self.nodes_searched += 1;
        if depth == 0 || pos.is_game_over() {
            return self.evaluator.evaluate(pos, depth);
        }

        // en-passant rights of the side to move expired with the opponent's last move.
        let mut node = *pos;
        node.reset_en_passant(to_move);

        let mut best: Option<Score> = None;
        for mov in legal_moves(&node, to_move) {
            let mut child = node;
            child.apply_move(mov);
            let score = self.minimax(&child, depth - 1, to_move.toggle());
            best = match best {
                Some(best_score) if !prefers(to_move, score, best_score) => Some(best_score),
                _ => Some(score),
            };
        }

        match best {
            Some(score) => score,
            None => self.evaluator.evaluate(&node, depth),
        }
    }
}

impl<E: BoardEvaluator> Default for Searcher<E> {
    fn default() -> Searcher<E> {
        Searcher::new(DEFAULT_DEPTH)
    }
}

/// Returns true if `side` strictly prefers `candidate` over `incumbent`.
fn prefers(side: Color, candidate: Score, incumbent: Score) -> bool {
    match side {
        Color::White => candidate > incumbent,
        Color::Black => candidate < incumbent,
    }
}
