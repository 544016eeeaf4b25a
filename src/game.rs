// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A single human-versus-engine game. The `Game` owns the authoritative position and commits
//! exactly one validated move per ply; everything else (search, notation, rule queries) works on
//! copies.
use crate::eval::Score;
use crate::moves::Move;
use crate::notation::{self, Movetext};
use crate::position::Position;
use crate::search::{MinimaxSearcher, NullDataRecorder, DEFAULT_DEPTH};
use crate::status::GameStatus;
use crate::types::{Color, Piece, PieceKind, Square};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Plies searched below each of the engine's candidate moves.
    pub depth: u32,
    /// The color played by the human; the engine plays the other.
    pub human: Color,
}

impl Default for EngineConfig {
    fn default() -> EngineConfig {
        EngineConfig {
            depth: DEFAULT_DEPTH,
            human: Color::White,
        }
    }
}

/// Asked which piece a human pawn becomes when it reaches the last rank. The call may block for
/// as long as it likes.
pub trait PromotionChooser {
    fn choose(&mut self, square: Square, color: Color) -> PieceKind;
}

impl<F> PromotionChooser for F
where
    F: FnMut(Square, Color) -> PieceKind,
{
    fn choose(&mut self, square: Square, color: Color) -> PieceKind {
        self(square, color)
    }
}

/// Always promotes to a queen.
pub struct QueenPromotion;

impl PromotionChooser for QueenPromotion {
    fn choose(&mut self, _square: Square, _color: Color) -> PieceKind {
        PieceKind::Queen
    }
}

/// A committed ply.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveRecord {
    pub side: Color,
    pub mov: Move,
    pub san: String,
}

/// What the engine played and what it thought of it.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineReply {
    pub mov: Move,
    pub san: String,
    pub score: Score,
    pub nodes_searched: u64,
}

pub struct Game {
    position: Position,
    side_to_move: Color,
    config: EngineConfig,
    searcher: MinimaxSearcher,
    chooser: Box<dyn PromotionChooser>,
    history: Vec<MoveRecord>,
    movetext: Movetext,
}

impl Game {
    /// A game from the standard starting position, White to move.
    pub fn new(config: EngineConfig) -> Game {
        Game::from_position(Position::from_start_position(), Color::White, config)
    }

    pub fn from_position(position: Position, side_to_move: Color, config: EngineConfig) -> Game {
        Game {
            position,
            side_to_move,
            config,
            searcher: MinimaxSearcher::new(config.depth),
            chooser: Box::new(QueenPromotion),
            history: Vec::new(),
            movetext: Movetext::new(),
        }
    }

    pub fn with_promotion_chooser<C>(mut self, chooser: C) -> Game
    where
        C: PromotionChooser + 'static,
    {
        self.chooser = Box::new(chooser);
        self
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn human_color(&self) -> Color {
        self.config.human
    }

    pub fn engine_color(&self) -> Color {
        self.config.human.toggle()
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn movetext(&self) -> &str {
        self.movetext.as_str()
    }

    pub fn move_number(&self) -> u32 {
        self.movetext.move_number()
    }

    /// Validates the human's move from `origin` to `target` and, if it is legal, commits it. A
    /// pawn reaching the last rank is promoted to whatever the promotion chooser picks; kinds a
    /// pawn can't become fall back to a queen. The position is untouched on rejection.
    pub fn attempt_human_move(&mut self, origin: Square, target: Square) -> bool {
        let side = self.config.human;
        if self.side_to_move != side {
            trace!("rejected human move {}{}: not the human's turn", origin, target);
            return false;
        }

        let mov = Move::new(origin, target);
        let mut next = match self.position.make_move(side, mov) {
            Some(next) => next,
            None => {
                trace!("rejected illegal human move {}", mov);
                return false;
            }
        };

        let mut committed = mov;
        if let Some(square) = next.pending_promotion() {
            let kind = match self.chooser.choose(square, side) {
                PieceKind::Pawn | PieceKind::King => PieceKind::Queen,
                kind => kind,
            };

            if next.promote(square, kind).is_err() {
                trace!("rejected human move {}: promotion on {} failed", mov, square);
                return false;
            }

            committed = mov.with_promotion(kind);
        }

        let san = notation::san(&self.position, side, committed);
        info!("human plays {} ({})", san, committed);
        self.position = next;
        self.commit(side, committed, san);
        true
    }

    /// Searches for the engine's reply and commits it. Returns None if it isn't the engine's turn
    /// or the engine has no legal move.
    pub fn compute_and_apply_engine_move(&mut self) -> Option<EngineReply> {
        let side = self.engine_color();
        if self.side_to_move != side {
            return None;
        }

        // the engine's own flags expire as it moves; the session position only changes on commit.
        let mut current = self.position;
        current.reset_en_passant(side);
        let result = self.searcher.search(&current, side, &NullDataRecorder);
        let mov = result.best_move?;
        let next = current.make_move(side, mov)?;
        let san = notation::san(&current, side, mov);
        info!(
            "engine plays {} ({}), evaluation {}, {} nodes searched",
            san, mov, result.score, result.nodes_searched
        );

        self.position = next;
        self.commit(side, mov, san.clone());
        Some(EngineReply {
            mov,
            san,
            score: result.score,
            nodes_searched: result.nodes_searched,
        })
    }

    fn commit(&mut self, side: Color, mov: Move, san: String) {
        self.movetext.push(side, &san);
        self.history.push(MoveRecord { side, mov, san });
        self.side_to_move = side.toggle();
    }

    pub fn is_in_check(&self, side: Color) -> bool {
        self.position.is_check(side)
    }

    pub fn is_checkmate(&self, side: Color) -> bool {
        self.position.is_checkmate(side)
    }

    pub fn is_stalemate(&self, side: Color) -> bool {
        self.position.is_stalemate(side)
    }

    /// The piece at grid coordinates `row` (0 is rank 8) and `col` (0 is the a-file).
    pub fn get_piece(&self, row: usize, col: usize) -> Option<Piece> {
        if row >= 8 || col >= 8 {
            return None;
        }

        self.position.piece_at(Square::at(row, col))
    }

    /// Expires `side`'s en-passant eligibility. Hosts call this for a side before that side moves
    /// again, once the opponent has had its one ply to capture.
    pub fn reset_en_passant(&mut self, side: Color) {
        self.position.reset_en_passant(side);
    }

    pub fn status(&self) -> GameStatus {
        self.position.status(self.side_to_move)
    }
}
