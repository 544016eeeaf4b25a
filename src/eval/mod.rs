// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::position::Position;

mod piece_square_evaluator;
mod score;
pub mod tables;

pub use piece_square_evaluator::PieceSquareEvaluator;
pub use score::Score;

pub trait BoardEvaluator: Default {
    /// Scores a position from White's point of view. `depth` is the search depth remaining when
    /// the position was reached; it only matters for checkmates.
    fn evaluate(&self, pos: &Position, depth: u32) -> Score;
}
