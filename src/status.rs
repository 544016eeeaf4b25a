// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::move_generator::{MoveGenerator, MoveVec};
use crate::position::Position;
use crate::types::Color;

/// Outcome of a game from the point of view of the side to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The given side has been checkmated.
    Checkmate(Color),
    /// The given side has no legal move and is not in check.
    Stalemate(Color),
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "in progress"),
            GameStatus::Checkmate(Color::White) => write!(f, "checkmate, black wins"),
            GameStatus::Checkmate(Color::Black) => write!(f, "checkmate, white wins"),
            GameStatus::Stalemate(_) => write!(f, "stalemate"),
        }
    }
}

//
// Checkmate and stalemate detection
//
// Both predicates try every pseudo-legal move of the side on a scratch copy, castling and en
// passant included, and stop at the first move that leaves the king safe. Promotion kinds don't
// change whether the king is safe, so the first promotion branch settles it.
//

impl Position {
    /// Returns true if `side` has at least one move that leaves its king safe.
    pub fn has_legal_move(&self, side: Color) -> bool {
        let mut candidates = MoveVec::new();
        MoveGenerator::new().generate_moves(self, side, &mut candidates);
        candidates
            .iter()
            .any(|&mov| self.leaves_king_safe(side, mov))
    }

    pub fn is_checkmate(&self, side: Color) -> bool {
        self.is_check(side) && !self.has_legal_move(side)
    }

    /// Returns true if `side` has no legal move at all. This does not look at whether the king is
    /// in check, so a checkmated side is also stalemated here; callers that need to tell the two
    /// apart must ask about checkmate first.
    pub fn is_stalemate(&self, side: Color) -> bool {
        !self.has_legal_move(side)
    }

    /// Returns true if either side is checkmated or has no legal move. A checkmated side never
    /// has a legal move, so the stalemate test covers both.
    pub fn is_game_over(&self) -> bool {
        self.is_stalemate(Color::White) || self.is_stalemate(Color::Black)
    }

    pub fn status(&self, side_to_move: Color) -> GameStatus {
        if self.has_legal_move(side_to_move) {
            GameStatus::Ongoing
        } else if self.is_check(side_to_move) {
            GameStatus::Checkmate(side_to_move)
        } else {
            GameStatus::Stalemate(side_to_move)
        }
    }
}
