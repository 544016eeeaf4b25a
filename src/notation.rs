// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Human-readable move tokens in standard algebraic notation ("e4", "Nbd7", "exd6", "O-O",
//! "e8=Q#") and the numbered movetext of a game. Tokens are for people; nothing reads them back.
use std::fmt::{self, Write};

use crate::move_generator::legal_moves;
use crate::moves::Move;
use crate::position::Position;
use crate::types::{Color, Piece, PieceKind};

/// Writes `mov`, a legal move of `side` in `pos`, in standard algebraic notation. A pawn move
/// onto the last rank without a promotion kind is written without the `=` suffix.
pub fn san(pos: &Position, side: Color, mov: Move) -> String {
    let piece = match pos.piece_at(mov.source()) {
        Some(piece) => piece,
        None => return mov.as_uci(),
    };

    let mut buf = String::new();
    let (_, dc) = mov.delta();
    if piece.kind == PieceKind::King && dc.abs() == 2 {
        buf.push_str(if dc > 0 { "O-O" } else { "O-O-O" });
    } else {
        let capture = pos.piece_at(mov.destination()).is_some()
            || (piece.kind == PieceKind::Pawn && dc != 0);
        if piece.kind == PieceKind::Pawn {
            if capture {
                write!(&mut buf, "{}", mov.source().file()).unwrap();
            }
        } else {
            buf.push(letter(piece.kind));
            disambiguate(&mut buf, pos, side, piece, mov);
        }

        if capture {
            buf.push('x');
        }

        write!(&mut buf, "{}", mov.destination()).unwrap();
        if let Some(kind) = mov.promotion() {
            buf.push('=');
            buf.push(letter(kind));
        }
    }

    let mut after = *pos;
    after.apply_move(mov);
    let opponent = side.toggle();
    if after.is_checkmate(opponent) {
        buf.push('#');
    } else if after.is_check(opponent) {
        buf.push('+');
    }

    buf
}

fn letter(kind: PieceKind) -> char {
    match kind {
        PieceKind::Pawn => 'P',
        PieceKind::Knight => 'N',
        PieceKind::Bishop => 'B',
        PieceKind::Rook => 'R',
        PieceKind::Queen => 'Q',
        PieceKind::King => 'K',
    }
}

/// Adds the origin file, rank, or both when another piece of the same kind can also legally
/// reach the destination. The file is preferred when it tells the pieces apart.
fn disambiguate(buf: &mut String, pos: &Position, side: Color, piece: Piece, mov: Move) {
    let rivals: Vec<Move> = legal_moves(pos, side)
        .iter()
        .cloned()
        .filter(|other| {
            other.destination() == mov.destination()
                && other.source() != mov.source()
                && pos.piece_at(other.source()) == Some(piece)
        })
        .collect();

    if rivals.is_empty() {
        return;
    }

    let source = mov.source();
    let shares_file = rivals.iter().any(|m| m.source().file() == source.file());
    let shares_rank = rivals.iter().any(|m| m.source().rank() == source.rank());
    match (shares_file, shares_rank) {
        (false, _) => write!(buf, "{}", source.file()).unwrap(),
        (true, false) => write!(buf, "{}", source.rank()).unwrap(),
        (true, true) => write!(buf, "{}", source).unwrap(),
    }
}

/// Numbered movetext, e.g. "1. e4 e5 2. Nf3". A game that starts with Black to move opens with
/// "1... ".
#[derive(Clone, Debug)]
pub struct Movetext {
    text: String,
    move_number: u32,
}

impl Movetext {
    pub fn new() -> Movetext {
        Movetext {
            text: String::new(),
            move_number: 1,
        }
    }

    /// The number of the move currently being played.
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    pub fn push(&mut self, side: Color, token: &str) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }

        match side {
            Color::White => write!(&mut self.text, "{}. {}", self.move_number, token).unwrap(),
            Color::Black if self.text.is_empty() => {
                write!(&mut self.text, "{}... {}", self.move_number, token).unwrap()
            }
            Color::Black => self.text.push_str(token),
        }

        if side == Color::Black {
            self.move_number += 1;
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Default for Movetext {
    fn default() -> Movetext {
        Movetext::new()
    }
}

impl fmt::Display for Movetext {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}
