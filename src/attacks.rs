// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Square control over a raw board layout. Nothing in this module knows whose turn it is, and
//! pins are ignored: a piece "controls" every square it could capture on if it were allowed to
//! move. Move generation and the evaluator both walk the direction tables below in order, so
//! their order is observable through search tie-breaking.
use arrayvec::ArrayVec;

use crate::types::{Color, Grid, PieceKind, Square};

pub type SquareVec = ArrayVec<[Square; 32]>;

pub static KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
];

pub static BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub static ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Every direction a queen slides or a king steps in.
pub static ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
    (0, 1),
    (1, 0),
    (-1, 0),
    (0, -1),
];

fn code_at(board: &Grid, sq: Square) -> i8 {
    board[sq.row()][sq.col()]
}

/// Direction vectors a sliding piece of the given kind moves along, or None for pieces that do
/// not slide.
pub fn slide_directions(kind: PieceKind) -> Option<&'static [(i8, i8)]> {
    match kind {
        PieceKind::Bishop => Some(&BISHOP_DIRECTIONS),
        PieceKind::Rook => Some(&ROOK_DIRECTIONS),
        PieceKind::Queen => Some(&ALL_DIRECTIONS),
        _ => None,
    }
}

/// Walks a ray from `from` in direction `dir`, calling `f` for every square reached. The walk
/// stops after the first occupied square, which is itself reported.
pub fn walk_ray<F>(board: &Grid, from: Square, dir: (i8, i8), mut f: F)
where
    F: FnMut(Square),
{
    let mut cursor = from;
    while let Some(next) = cursor.offset(dir.0, dir.1) {
        f(next);
        if code_at(board, next) != 0 {
            break;
        }

        cursor = next;
    }
}

/// Returns the squares controlled by the piece standing on `from`, in direction-table order. An
/// empty square controls nothing.
pub fn controlled_squares(board: &Grid, from: Square) -> SquareVec {
    let mut squares = SquareVec::new();
    let code = code_at(board, from);
    let kind = match PieceKind::from_code(code.abs()) {
        Some(kind) => kind,
        None => return squares,
    };

    match kind {
        PieceKind::Pawn => {
            // pawns only ever control the two squares diagonally in front of them.
            let forward = if code > 0 { -1 } else { 1 };
            for &dc in &[-1, 1] {
                if let Some(target) = from.offset(forward, dc) {
                    squares.push(target);
                }
            }
        }
        PieceKind::Knight => {
            for &(dr, dc) in &KNIGHT_OFFSETS {
                if let Some(target) = from.offset(dr, dc) {
                    squares.push(target);
                }
            }
        }
        PieceKind::King => {
            for &(dr, dc) in &ALL_DIRECTIONS {
                if let Some(target) = from.offset(dr, dc) {
                    squares.push(target);
                }
            }
        }
        _ => {
            if let Some(dirs) = slide_directions(kind) {
                for &dir in dirs {
                    walk_ray(board, from, dir, |sq| squares.push(sq));
                }
            }
        }
    }

    squares
}

/// Returns true if the piece on `from` controls `target`.
pub fn controls(board: &Grid, from: Square, target: Square) -> bool {
    let code = code_at(board, from);
    let kind = match PieceKind::from_code(code.abs()) {
        Some(kind) => kind,
        None => return false,
    };

    let dr = target.row() as i8 - from.row() as i8;
    let dc = target.col() as i8 - from.col() as i8;
    if dr == 0 && dc == 0 {
        return false;
    }

    match kind {
        PieceKind::Pawn => {
            let forward = if code > 0 { -1 } else { 1 };
            dr == forward && dc.abs() == 1
        }
        PieceKind::Knight => (dr.abs() == 1 && dc.abs() == 2) || (dr.abs() == 2 && dc.abs() == 1),
        PieceKind::King => dr.abs() <= 1 && dc.abs() <= 1,
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            let diagonal = dr.abs() == dc.abs();
            let straight = dr == 0 || dc == 0;
            let aligned = match kind {
                PieceKind::Bishop => diagonal,
                PieceKind::Rook => straight,
                _ => diagonal || straight,
            };
            if !aligned {
                return false;
            }

            // every square strictly between the two must be empty.
            let step = (dr.signum(), dc.signum());
            let mut cursor = from;
            while let Some(next) = cursor.offset(step.0, step.1) {
                if next == target {
                    return true;
                }

                if code_at(board, next) != 0 {
                    return false;
                }

                cursor = next;
            }

            false
        }
    }
}

/// Returns true if any piece of `side` anywhere on the board controls `target`.
pub fn under_control(board: &Grid, target: Square, side: Color) -> bool {
    for row in 0..8 {
        for col in 0..8 {
            let code = board[row][col];
            if side.owns(code) && controls(board, Square::at(row, col), target) {
                return true;
            }
        }
    }

    false
}

/// Returns every square holding a piece of `side` that controls `target`, in row-major order.
pub fn attackers(board: &Grid, target: Square, side: Color) -> SquareVec {
    let mut squares = SquareVec::new();
    for row in 0..8 {
        for col in 0..8 {
            let code = board[row][col];
            let from = Square::at(row, col);
            if side.owns(code) && controls(board, from, target) {
                squares.push(from);
            }
        }
    }

    squares
}
