// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::types::{PieceKind, Square};

/// A move is a pair of squares and, for pawns reaching the last rank, the kind of piece the pawn
/// becomes. Moves carry no other information: whether a move is a capture, a castle, or an
/// en-passant capture is decided by the position it is applied to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    source: Square,
    destination: Square,
    promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(source: Square, destination: Square) -> Move {
        Move {
            source,
            destination,
            promotion: None,
        }
    }

    pub fn promoting(source: Square, destination: Square, kind: PieceKind) -> Move {
        Move {
            source,
            destination,
            promotion: Some(kind),
        }
    }

    pub fn source(self) -> Square {
        self.source
    }

    pub fn destination(self) -> Square {
        self.destination
    }

    pub fn promotion(self) -> Option<PieceKind> {
        self.promotion
    }

    pub fn with_promotion(self, kind: PieceKind) -> Move {
        Move::promoting(self.source, self.destination, kind)
    }

    /// Signed row and column distance covered by this move.
    pub fn delta(self) -> (i8, i8) {
        (
            self.destination.row() as i8 - self.source.row() as i8,
            self.destination.col() as i8 - self.source.col() as i8,
        )
    }

    pub fn as_uci(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.source, self.destination)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind)?;
        }

        Ok(())
    }
}

/// Possible errors that can arise when parsing a move typed by a player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveParseError {
    Malformed,
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MoveParseError::Malformed => write!(f, "expected a move like e2e4, e2 e4 or e7-e8q"),
        }
    }
}

impl Error for MoveParseError {}

lazy_static! {
    static ref COORDINATE_MOVE: Regex =
        Regex::new(r"^\s*([a-h][1-8])\s*[-x ]?\s*([a-h][1-8])\s*=?\s*([a-zA-Z])?\s*$").unwrap();
}

impl FromStr for Move {
    type Err = MoveParseError;

    /// Parses coordinate notation. The two squares may be separated by nothing, a space, a dash
    /// or an `x`, and may be followed by a promotion letter (`e7e8q`, `e7-e8=N`). The letter is
    /// read the same way as an answer to the promotion prompt.
    fn from_str(input: &str) -> Result<Move, MoveParseError> {
        let caps = COORDINATE_MOVE
            .captures(input)
            .ok_or(MoveParseError::Malformed)?;
        let source = Square::try_from(&caps[1]).map_err(|_| MoveParseError::Malformed)?;
        let destination = Square::try_from(&caps[2]).map_err(|_| MoveParseError::Malformed)?;
        let promotion = caps
            .get(3)
            .and_then(|m| m.as_str().chars().next())
            .map(PieceKind::from_promotion_char);

        Ok(Move {
            source,
            destination,
            promotion,
        })
    }
}
