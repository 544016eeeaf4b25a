// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::analysis::Analysis;
use crate::eval::tables;
use crate::eval::{BoardEvaluator, Score};
use crate::position::Position;
use crate::types::{Color, PieceKind};

const PAWN_WEIGHT: i32 = 100;
const KNIGHT_WEIGHT: i32 = 320;
const BISHOP_WEIGHT: i32 = 330;
const ROOK_WEIGHT: i32 = 500;
const QUEEN_WEIGHT: i32 = 900;
const MOBILITY_WEIGHT: i32 = 10;
const DOUBLED_PAWN_PENALTY: i32 = 15;
const ISOLATED_PAWN_PENALTY: i32 = 30;
const PAWN_ISLAND_PENALTY: i32 = 10;

/// Evaluator combining material, piece-square placement, mobility and pawn structure. Every call
/// evaluates the position from scratch.
pub struct PieceSquareEvaluator;

impl PieceSquareEvaluator {
    pub fn new() -> PieceSquareEvaluator {
        PieceSquareEvaluator
    }

    pub fn material(&self, pos: &Position) -> i32 {
        pos.occupied()
            .map(|(_, piece)| signed(piece.color, piece_weight(piece.kind)))
            .sum()
    }

    pub fn placement(&self, pos: &Position, end_game: bool) -> i32 {
        pos.occupied()
            .map(|(square, piece)| {
                let table = tables::table(piece.color, piece.kind, end_game);
                signed(piece.color, table[square.row()][square.col()])
            })
            .sum()
    }

    pub fn mobility(&self, analysis: &Analysis) -> i32 {
        evaluate_metric(MOBILITY_WEIGHT, |c| analysis.mobility(c) as i32)
    }

    pub fn pawn_structure(&self, analysis: &Analysis) -> i32 {
        let doubled = evaluate_metric(DOUBLED_PAWN_PENALTY, |c| analysis.doubled_pawns(c) as i32);
        let isolated =
            evaluate_metric(ISOLATED_PAWN_PENALTY, |c| analysis.isolated_pawns(c) as i32);
        let islands = evaluate_metric(PAWN_ISLAND_PENALTY, |c| analysis.pawn_islands(c) as i32);
        -(doubled + isolated + islands)
    }
}

impl Default for PieceSquareEvaluator {
    fn default() -> PieceSquareEvaluator {
        PieceSquareEvaluator
    }
}

impl BoardEvaluator for PieceSquareEvaluator {
    fn evaluate(&self, pos: &Position, depth: u32) -> Score {
        // Mates are checked before stalemates: a mated side also has no legal moves.
        let white_stuck = !pos.has_legal_move(Color::White);
        let black_stuck = !pos.has_legal_move(Color::Black);
        if white_stuck && pos.is_check(Color::White) {
            return Score::checkmated(Color::White, depth);
        }
        if black_stuck && pos.is_check(Color::Black) {
            return Score::checkmated(Color::Black, depth);
        }
        if white_stuck || black_stuck {
            return Score::draw();
        }

        let analysis = Analysis::new(pos);
        let end_game = analysis.is_end_game();
        Score::new(
            self.material(pos)
                + self.placement(pos, end_game)
                + self.mobility(&analysis)
                + self.pawn_structure(&analysis),
        )
    }
}

fn piece_weight(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_WEIGHT,
        PieceKind::Knight => KNIGHT_WEIGHT,
        PieceKind::Bishop => BISHOP_WEIGHT,
        PieceKind::Rook => ROOK_WEIGHT,
        PieceKind::Queen => QUEEN_WEIGHT,
        PieceKind::King => 0,
    }
}

fn signed(color: Color, value: i32) -> i32 {
    match color {
        Color::White => value,
        Color::Black => -value,
    }
}

fn evaluate_metric<F>(weight: i32, func: F) -> i32
where
    F: Fn(Color) -> i32,
{
    let white = func(Color::White);
    let black = func(Color::Black);
    weight * (white - black)
}
