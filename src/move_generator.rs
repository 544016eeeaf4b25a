// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use arrayvec::ArrayVec;

use crate::attacks::{self, ALL_DIRECTIONS, KNIGHT_OFFSETS};
use crate::moves::Move;
use crate::position::Position;
use crate::types::{Color, Orientation, Piece, PieceKind, Square, PROMOTION_KINDS};

pub type MoveVec = ArrayVec<[Move; 256]>;

/// Enumerates the moves available to one side. The board is scanned row by row from a8, and each
/// piece's moves are produced in the fixed order of the direction tables, so two calls on the
/// same position always yield the same sequence. Search relies on that to break ties.
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> MoveGenerator {
        MoveGenerator
    }

    /// Generates every pseudo-legal move for `side`. Pawns reaching the last rank produce one
    /// move per promotion kind; castles are only produced when `Position::can_castle` allows them.
    pub fn generate_moves(&self, pos: &Position, side: Color, moves: &mut MoveVec) {
        let orient = Orientation::of(side);
        for (square, piece) in pos.occupied() {
            if piece.color != side {
                continue;
            }

            match piece.kind {
                PieceKind::Pawn => self.generate_pawn_moves(pos, &orient, square, moves),
                PieceKind::Knight => {
                    self.generate_steps(pos, side, square, &KNIGHT_OFFSETS, moves)
                }
                PieceKind::King => {
                    self.generate_steps(pos, side, square, &ALL_DIRECTIONS, moves);
                    if square == orient.king_home() {
                        if pos.can_castle(side, true) {
                            moves.push(Move::new(square, Square::at(orient.back_row, 6)));
                        }
                        if pos.can_castle(side, false) {
                            moves.push(Move::new(square, Square::at(orient.back_row, 2)));
                        }
                    }
                }
                kind => {
                    if let Some(dirs) = attacks::slide_directions(kind) {
                        for &dir in dirs {
                            attacks::walk_ray(pos.board(), square, dir, |target| {
                                if !side.owns(pos.code_at(target)) {
                                    moves.push(Move::new(square, target));
                                }
                            });
                        }
                    }
                }
            }
        }
    }

    /// Generates every legal move for `side`: the pseudo-legal moves that leave its king safe.
    pub fn generate_legal_moves(&self, pos: &Position, side: Color, moves: &mut MoveVec) {
        let mut candidates = MoveVec::new();
        self.generate_moves(pos, side, &mut candidates);
        for mov in candidates {
            if pos.leaves_king_safe(side, mov) {
                moves.push(mov);
            }
        }
    }

    fn generate_steps(
        &self,
        pos: &Position,
        side: Color,
        square: Square,
        offsets: &[(i8, i8)],
        moves: &mut MoveVec,
    ) {
        for &(dr, dc) in offsets {
            if let Some(target) = square.offset(dr, dc) {
                if !side.owns(pos.code_at(target)) {
                    moves.push(Move::new(square, target));
                }
            }
        }
    }

    fn generate_pawn_moves(
        &self,
        pos: &Position,
        orient: &Orientation,
        square: Square,
        moves: &mut MoveVec,
    ) {
        let push_pawn = |moves: &mut MoveVec, target: Square| {
            if target.row() == orient.promotion_row {
                for &kind in &PROMOTION_KINDS {
                    moves.push(Move::promoting(square, target, kind));
                }
            } else {
                moves.push(Move::new(square, target));
            }
        };

        // single push, then the double push from the home row.
        if let Some(ahead) = square.offset(orient.forward, 0) {
            if pos.code_at(ahead) == 0 {
                push_pawn(moves, ahead);
                if square.row() == orient.pawn_home_row {
                    if let Some(two_ahead) = ahead.offset(orient.forward, 0) {
                        if pos.code_at(two_ahead) == 0 {
                            moves.push(Move::new(square, two_ahead));
                        }
                    }
                }
            }
        }

        // captures towards the a-file, then towards the h-file.
        for &dc in &[-1, 1] {
            if let Some(target) = square.offset(orient.forward, dc) {
                if orient.opponent.owns(pos.code_at(target)) {
                    push_pawn(moves, target);
                }
            }
        }

        // en passant towards the h-file, then towards the a-file.
        if square.row() == orient.en_passant_row {
            let opposing_pawn = Piece::new(PieceKind::Pawn, orient.opponent).code();
            for &dc in &[1, -1] {
                let victim = match square.offset(0, dc) {
                    Some(victim) => victim,
                    None => continue,
                };

                if pos.code_at(victim) != opposing_pawn
                    || !pos.en_passant_flag(orient.opponent, victim.col())
                {
                    continue;
                }

                if let Some(target) = square.offset(orient.forward, dc) {
                    if pos.code_at(target) == 0 {
                        moves.push(Move::new(square, target));
                    }
                }
            }
        }
    }
}

impl Default for MoveGenerator {
    fn default() -> MoveGenerator {
        MoveGenerator::new()
    }
}

/// Convenience wrapper returning the legal moves of `side` in generation order.
pub fn legal_moves(pos: &Position, side: Color) -> MoveVec {
    let mut moves = MoveVec::new();
    MoveGenerator::new().generate_legal_moves(pos, side, &mut moves);
    moves
}
