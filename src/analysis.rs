// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::attacks;
use crate::move_generator::{MoveGenerator, MoveVec};
use crate::position::Position;
use crate::types::{Color, PieceKind, COLORS};

/// Provider of common board analyses upon a static position. It is suitable for use in board
/// evaluators, where a single immutable position is queried several times.
pub struct Analysis<'a> {
    pos: &'a Position,
}

impl<'a> Analysis<'a> {
    pub fn new(pos: &'a Position) -> Analysis<'a> {
        Analysis { pos }
    }

    /// Number of pawns of the given color on each file, a-file first.
    pub fn pawns_per_file(&self, color: Color) -> [u32; 8] {
        let mut files = [0; 8];
        for (square, piece) in self.pos.occupied() {
            if piece.color == color && piece.kind == PieceKind::Pawn {
                files[square.col()] += 1;
            }
        }

        files
    }

    /// Total height of every stack of two or more pawns. Three pawns on one file count three.
    pub fn doubled_pawns(&self, color: Color) -> u32 {
        self.pawns_per_file(color)
            .iter()
            .filter(|&&count| count > 1)
            .sum()
    }

    /// Number of files holding pawns with no friendly pawn on either neighboring file. Edge files
    /// only have one neighbor to check.
    pub fn isolated_pawns(&self, color: Color) -> u32 {
        let files = self.pawns_per_file(color);
        (0..8)
            .filter(|&file| {
                let left = if file > 0 { files[file - 1] } else { 0 };
                let right = if file < 7 { files[file + 1] } else { 0 };
                files[file] > 0 && left == 0 && right == 0
            })
            .count() as u32
    }

    /// Number of maximal runs of adjacent files that hold at least one pawn.
    pub fn pawn_islands(&self, color: Color) -> u32 {
        let mut islands = 0;
        let mut in_island = false;
        for &count in self.pawns_per_file(color).iter() {
            if count > 0 && !in_island {
                islands += 1;
            }

            in_island = count > 0;
        }

        islands
    }

    /// Counts the pseudo-legal moves of `color` without checking whether they leave the king
    /// safe. A pawn reaching the last rank counts once rather than once per promotion kind,
    /// castles are not counted, and the king may not step onto a square the opponent controls.
    pub fn mobility(&self, color: Color) -> u32 {
        let mut moves = MoveVec::new();
        MoveGenerator::new().generate_moves(self.pos, color, &mut moves);
        let opponent = color.toggle();
        moves
            .iter()
            .filter(|mov| {
                if let Some(kind) = mov.promotion() {
                    return kind == PieceKind::Queen;
                }

                let is_king = self
                    .pos
                    .piece_at(mov.source())
                    .map_or(false, |piece| piece.kind == PieceKind::King);
                if !is_king {
                    return true;
                }

                let (_, dc) = mov.delta();
                dc.abs() != 2
                    && !attacks::under_control(self.pos.board(), mov.destination(), opponent)
            })
            .count() as u32
    }

    /// Returns true if the position counts as an end game for king placement: no queens remain,
    /// or a side that still has its queen has at most one other piece. Knights, bishops and rooks
    /// all count towards that single "other piece" total.
    pub fn is_end_game(&self) -> bool {
        let queens: Vec<usize> = COLORS
            .iter()
            .map(|&c| self.pos.count(c, PieceKind::Queen))
            .collect();
        if queens.iter().all(|&q| q == 0) {
            return true;
        }

        COLORS.iter().zip(queens.iter()).any(|(&color, &q)| {
            q > 0 && self.other_pieces(color) <= 1
        })
    }

    fn other_pieces(&self, color: Color) -> usize {
        self.pos.count(color, PieceKind::Knight)
            + self.pos.count(color, PieceKind::Bishop)
            + self.pos.count(color, PieceKind::Rook)
    }
}
