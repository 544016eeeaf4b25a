// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::move_generator::{MoveGenerator, MoveVec};
use crate::position::Position;
use crate::types::Color;

/// Counts the move paths of length `depth` from `pos` with `side` to move. Every path goes through
/// the same king-safety gate the rest of the engine uses, so the counts check the rules against
/// published reference numbers.
pub fn perft(pos: &Position, side: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut node = *pos;
    node.reset_en_passant(side);
    let mut moves = MoveVec::default();
    let movegen = MoveGenerator::new();
    movegen.generate_moves(&node, side, &mut moves);
    moves
        .par_iter()
        .map(|&mov| {
            if !node.leaves_king_safe(side, mov) {
                return 0;
            }

            let mut child = node;
            child.apply_move(mov);
            perft(&child, side.toggle(), depth - 1)
        })
        .sum()
}

/// Perft counts broken down by root move, in generation order.
pub fn divide(pos: &Position, side: Color, depth: u32) -> Vec<(String, u64)> {
    let mut node = *pos;
    node.reset_en_passant(side);
    crate::move_generator::legal_moves(&node, side)
        .iter()
        .map(|&mov| {
            let mut child = node;
            child.apply_move(mov);
            let count = if depth <= 1 {
                1
            } else {
                perft(&child, side.toggle(), depth - 1)
            };
            (mov.to_string(), count)
        })
        .collect()
}
