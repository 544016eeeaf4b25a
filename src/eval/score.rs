// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::ops::{Add, Neg, Sub};

use crate::types::Color;

/// Score is the output of a board evaluation function, in centipawns. Positive scores favor
/// White. Checkmates are worth `MATE` plus the search depth that remained when the mate was
/// found, so a mate found closer to the root (with more depth left) scores higher.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Score(i32);

impl Score {
    pub const MATE: i32 = 100_000;

    pub fn new(centipawns: i32) -> Score {
        Score(centipawns)
    }

    pub fn draw() -> Score {
        Score(0)
    }

    /// The score of a position in which `loser` has been checkmated with `depth` plies of search
    /// remaining.
    pub fn checkmated(loser: Color, depth: u32) -> Score {
        let magnitude = Score::MATE + depth as i32;
        match loser {
            Color::White => Score(-magnitude),
            Color::Black => Score(magnitude),
        }
    }

    pub fn centipawns(self) -> i32 {
        self.0
    }

    /// The score in pawns, as reported to players.
    pub fn pawns(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    pub fn is_mate(self) -> bool {
        self.0.abs() >= Score::MATE
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.2}", self.pawns())
    }
}

impl Neg for Score {
    type Output = Score;

    fn neg(self) -> Score {
        Score(-self.0)
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, other: Score) -> Score {
        Score(self.0 + other.0)
    }
}

impl Sub for Score {
    type Output = Score;

    fn sub(self, other: Score) -> Score {
        Score(self.0 - other.0)
    }
}
