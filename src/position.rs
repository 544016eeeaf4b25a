// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{self, Write};

use crate::attacks;
use crate::moves::Move;
use crate::types::TableIndex;
use crate::types::{CastleStatus, Color, File, Grid, Orientation, Piece, PieceKind, Rank, Square};
use crate::types::{FILES, RANKS};

/// Possible errors that can arise when parsing a FEN string into a `Position`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    FileDoesNotSumToEight,
    UnknownPiece,
    InvalidSideToMove,
    InvalidCastle,
    InvalidEnPassant,
    EmptyHalfmove,
    InvalidHalfmove,
    EmptyFullmove,
    InvalidFullmove,
}

impl fmt::Display for FenParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenParseError::UnexpectedChar(c) => write!(f, "unexpected character '{}'", c),
            FenParseError::UnexpectedEnd => write!(f, "unexpected end of input"),
            FenParseError::InvalidDigit => write!(f, "empty-square count must be 1 through 8"),
            FenParseError::FileDoesNotSumToEight => write!(f, "rank does not have eight files"),
            FenParseError::UnknownPiece => write!(f, "unknown piece letter"),
            FenParseError::InvalidSideToMove => write!(f, "side to move must be 'w' or 'b'"),
            FenParseError::InvalidCastle => write!(f, "invalid castling field"),
            FenParseError::InvalidEnPassant => write!(f, "invalid en-passant square"),
            FenParseError::EmptyHalfmove => write!(f, "missing halfmove clock"),
            FenParseError::InvalidHalfmove => write!(f, "invalid halfmove clock"),
            FenParseError::EmptyFullmove => write!(f, "missing fullmove number"),
            FenParseError::InvalidFullmove => write!(f, "invalid fullmove number"),
        }
    }
}

impl Error for FenParseError {}

static START_BOARD: Grid = [
    [-4, -2, -3, -5, -6, -3, -2, -4],
    [-1, -1, -1, -1, -1, -1, -1, -1],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [4, 2, 3, 5, 6, 3, 2, 4],
];

/// A snapshot of the board and the rights that outlive a single move: which files each side may
/// be captured en passant on, and which castles are still available. Positions are plain values;
/// every trial move is made on a copy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: Grid,
    en_passant: [[bool; 8]; 2],
    castle_status: CastleStatus,
}

//
// Board state getters
//

impl Position {
    pub fn new() -> Position {
        Position {
            board: [[0; 8]; 8],
            en_passant: [[false; 8]; 2],
            castle_status: CastleStatus::NONE,
        }
    }

    pub fn board(&self) -> &Grid {
        &self.board
    }

    pub fn code_at(&self, square: Square) -> i8 {
        self.board[square.row()][square.col()]
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        Piece::from_code(self.code_at(square))
    }

    pub fn castle_status(&self) -> CastleStatus {
        self.castle_status
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        self.castle_status.contains(CastleStatus::kingside(color))
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        self.castle_status.contains(CastleStatus::queenside(color))
    }

    /// Returns true if a pawn of `color` advanced two squares on the given file and may still be
    /// captured en passant.
    pub fn en_passant_flag(&self, color: Color, file: usize) -> bool {
        self.en_passant[color.as_index()][file]
    }

    pub fn en_passant_flags(&self, color: Color) -> [bool; 8] {
        self.en_passant[color.as_index()]
    }

    /// Expires every en-passant flag belonging to `color`.
    pub fn reset_en_passant(&mut self, color: Color) {
        self.en_passant[color.as_index()] = [false; 8];
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color).code();
        self.occupied()
            .find(|&(_, piece)| piece.code() == king)
            .map(|(sq, _)| sq)
    }

    /// Iterates over every occupied square in row-major order, starting from a8.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..64).filter_map(move |idx| {
            let square = Square::at(idx / 8, idx % 8);
            self.piece_at(square).map(|piece| (square, piece))
        })
    }

    pub fn count(&self, color: Color, kind: PieceKind) -> usize {
        let code = Piece::new(kind, color).code();
        self.board
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&c| c == code)
            .count()
    }
}

//
// Board manipulation
//

impl Position {
    pub fn add_piece(&mut self, square: Square, piece: Piece) -> Result<(), ()> {
        if self.code_at(square) != 0 {
            return Err(());
        }

        self.set_code(square, piece.code());
        Ok(())
    }

    fn set_code(&mut self, square: Square, code: i8) {
        self.board[square.row()][square.col()] = code;
    }

    fn revoke(&mut self, rights: CastleStatus) {
        self.castle_status &= !rights;
    }
}

//
// Check detection
//

impl Position {
    /// Returns true if the given color's king is controlled by any opposing piece. A position
    /// without that king is never in check.
    pub fn is_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => attacks::under_control(&self.board, king, color.toggle()),
            None => false,
        }
    }

    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        attacks::under_control(&self.board, square, by)
    }
}

//
// Move validation and application
//
// A move is legal if the piece rules allow it and, once it is applied to a scratch copy of the
// position, the mover's king is not controlled by the opponent. That last test is the only check
// against leaving a king in danger and every kind of move goes through it.
//

impl Position {
    /// Returns true if `mov` follows the movement rules for the piece of `side` standing on its
    /// source square. King safety after the move is not considered.
    pub fn is_pseudo_legal(&self, side: Color, mov: Move) -> bool {
        let source = mov.source();
        let destination = mov.destination();
        if source == destination {
            return false;
        }

        let piece = match self.piece_at(source) {
            Some(piece) if piece.color == side => piece,
            _ => return false,
        };

        // nothing may land on a friendly piece.
        if side.owns(self.code_at(destination)) {
            return false;
        }

        let orient = Orientation::of(side);
        if let Some(kind) = mov.promotion() {
            let promotes = piece.kind == PieceKind::Pawn && destination.row() == orient.promotion_row;
            if !promotes || kind == PieceKind::Pawn || kind == PieceKind::King {
                return false;
            }
        }

        let (dr, dc) = mov.delta();
        match piece.kind {
            PieceKind::Pawn => self.is_pseudo_legal_pawn(&orient, mov),
            PieceKind::Knight => {
                (dr.abs() == 1 && dc.abs() == 2) || (dr.abs() == 2 && dc.abs() == 1)
            }
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                attacks::controls(&self.board, source, destination)
            }
            PieceKind::King => {
                if dr.abs() <= 1 && dc.abs() <= 1 {
                    return true;
                }

                if source != orient.king_home() || dr != 0 {
                    return false;
                }

                match dc {
                    2 => self.can_castle(side, true),
                    -2 => self.can_castle(side, false),
                    _ => false,
                }
            }
        }
    }

    fn is_pseudo_legal_pawn(&self, orient: &Orientation, mov: Move) -> bool {
        let source = mov.source();
        let destination = mov.destination();
        let (dr, dc) = mov.delta();
        let target = self.code_at(destination);

        if dc == 0 {
            if dr == orient.forward {
                return target == 0;
            }

            if dr == 2 * orient.forward && source.row() == orient.pawn_home_row {
                let between = Square::at(
                    (source.row() as i8 + orient.forward) as usize,
                    source.col(),
                );
                return target == 0 && self.code_at(between) == 0;
            }

            return false;
        }

        if dr != orient.forward || dc.abs() != 1 {
            return false;
        }

        if orient.opponent.owns(target) {
            return true;
        }

        // en passant: the captured pawn sits beside us, behind the target square.
        if target == 0 && source.row() == orient.en_passant_row {
            let victim = Square::at(source.row(), destination.col());
            let opposing_pawn = Piece::new(PieceKind::Pawn, orient.opponent).code();
            return self.code_at(victim) == opposing_pawn
                && self.en_passant_flag(orient.opponent, destination.col());
        }

        false
    }

    /// Returns true if `side` may castle on the given wing right now: the right is held, king and
    /// rook stand on their home squares, the squares between them are empty, and none of the
    /// squares the king starts on, crosses or lands on is controlled by the opponent.
    pub fn can_castle(&self, side: Color, kingside: bool) -> bool {
        let orient = Orientation::of(side);
        let (right, rook_square) = if kingside {
            (CastleStatus::kingside(side), orient.kingside_rook_home())
        } else {
            (CastleStatus::queenside(side), orient.queenside_rook_home())
        };

        if !self.castle_status.contains(right) {
            return false;
        }

        if self.code_at(orient.king_home()) != Piece::new(PieceKind::King, side).code()
            || self.code_at(rook_square) != Piece::new(PieceKind::Rook, side).code()
        {
            return false;
        }

        let (between, king_path): (&[usize], &[usize]) = if kingside {
            (&[5, 6], &[4, 5, 6])
        } else {
            (&[1, 2, 3], &[4, 3, 2])
        };

        let row = orient.back_row;
        if between
            .iter()
            .any(|&col| self.code_at(Square::at(row, col)) != 0)
        {
            return false;
        }

        !king_path
            .iter()
            .any(|&col| self.is_square_attacked(Square::at(row, col), orient.opponent))
    }

    /// Applies a move without validating it. Captures, en-passant removal, castling rook
    /// relocation, promotion and all rights bookkeeping happen here. A pawn reaching the last
    /// rank without a promotion kind stays a pawn until `promote` is called.
    pub fn apply_move(&mut self, mov: Move) {
        let source = mov.source();
        let destination = mov.destination();
        let moving_code = self.code_at(source);
        let piece = match Piece::from_code(moving_code) {
            Some(piece) => piece,
            None => {
                debug_assert!(false, "invalid move: no piece at source square");
                return;
            }
        };

        let side = piece.color;
        let orient = Orientation::of(side);
        let (dr, dc) = mov.delta();
        let captured = self.code_at(destination);

        // Capturing a rook on its home corner takes away the opponent's castle on that wing.
        if captured == Piece::new(PieceKind::Rook, orient.opponent).code() {
            let theirs = Orientation::of(orient.opponent);
            if destination == theirs.kingside_rook_home() {
                self.revoke(CastleStatus::kingside(orient.opponent));
            } else if destination == theirs.queenside_rook_home() {
                self.revoke(CastleStatus::queenside(orient.opponent));
            }
        }

        match piece.kind {
            PieceKind::Pawn => {
                if dc != 0 && captured == 0 {
                    // en passant removes the pawn behind the target, not the target itself.
                    self.set_code(Square::at(source.row(), destination.col()), 0);
                }

                if dr.abs() == 2 {
                    self.en_passant[side.as_index()][source.col()] = true;
                }
            }
            PieceKind::King => {
                if dc.abs() == 2 {
                    let row = orient.back_row;
                    let (rook_from, rook_to) = if dc > 0 { (7, 5) } else { (0, 3) };
                    let rook = self.code_at(Square::at(row, rook_from));
                    self.set_code(Square::at(row, rook_from), 0);
                    self.set_code(Square::at(row, rook_to), rook);
                }

                self.revoke(CastleStatus::both(side));
            }
            PieceKind::Rook => {
                if source == orient.kingside_rook_home() {
                    self.revoke(CastleStatus::kingside(side));
                } else if source == orient.queenside_rook_home() {
                    self.revoke(CastleStatus::queenside(side));
                }
            }
            _ => {}
        }

        let placed = match mov.promotion() {
            Some(kind) if piece.kind == PieceKind::Pawn => Piece::new(kind, side).code(),
            _ => moving_code,
        };

        self.set_code(source, 0);
        self.set_code(destination, placed);
    }

    /// Returns true if applying `mov` to a copy of this position leaves the king of `side` out of
    /// the opponent's control.
    pub fn leaves_king_safe(&self, side: Color, mov: Move) -> bool {
        let mut scratch = *self;
        scratch.apply_move(mov);
        !scratch.is_check(side)
    }

    pub fn is_legal(&self, side: Color, mov: Move) -> bool {
        self.is_pseudo_legal(side, mov) && self.leaves_king_safe(side, mov)
    }

    /// Validates `mov` and returns the resulting position, leaving `self` untouched. Returns None
    /// if the move is illegal.
    pub fn make_move(&self, side: Color, mov: Move) -> Option<Position> {
        if !self.is_pseudo_legal(side, mov) {
            return None;
        }

        let mut scratch = *self;
        scratch.apply_move(mov);
        if scratch.is_check(side) {
            return None;
        }

        Some(scratch)
    }

    /// Returns the square of a pawn standing on its last rank, waiting to be promoted.
    pub fn pending_promotion(&self) -> Option<Square> {
        for &color in &[Color::White, Color::Black] {
            let row = Orientation::of(color).promotion_row;
            let pawn = Piece::new(PieceKind::Pawn, color).code();
            if let Some(col) = (0..8).find(|&col| self.board[row][col] == pawn) {
                return Some(Square::at(row, col));
            }
        }

        None
    }

    /// Replaces the pawn waiting on `square` with a piece of the given kind.
    pub fn promote(&mut self, square: Square, kind: PieceKind) -> Result<(), ()> {
        if kind == PieceKind::Pawn || kind == PieceKind::King {
            return Err(());
        }

        let piece = match self.piece_at(square) {
            Some(piece) if piece.kind == PieceKind::Pawn => piece,
            _ => return Err(()),
        };

        if square.row() != Orientation::of(piece.color).promotion_row {
            return Err(());
        }

        self.set_code(square, Piece::new(kind, piece.color).code());
        Ok(())
    }
}

//
// FEN parsing and generation.
//
// Positions don't carry a side to move, so parsing hands it back next to the position and
// generation takes it as an argument. An en-passant square on the third rank marks White's flag
// on that file; one on the sixth rank marks Black's. Clocks are checked and discarded.
//

impl Position {
    pub fn from_start_position() -> Position {
        Position {
            board: START_BOARD,
            en_passant: [[false; 8]; 2],
            castle_status: CastleStatus::WHITE | CastleStatus::BLACK,
        }
    }

    /// Constructs a new position from a FEN representation of a board position.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<(Position, Color), FenParseError> {
        use std::iter::Peekable;
        use std::str::Chars;

        type Stream<'a> = Peekable<Chars<'a>>;

        fn eat<'a>(iter: &mut Stream<'a>, expected: char) -> Result<(), FenParseError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(FenParseError::UnexpectedChar(c)),
                None => Err(FenParseError::UnexpectedEnd),
            }
        }

        fn advance<'a>(iter: &mut Stream<'a>) -> Result<(), FenParseError> {
            let _ = iter.next();
            Ok(())
        }

        fn peek<'a>(iter: &mut Stream<'a>) -> Result<char, FenParseError> {
            if let Some(c) = iter.peek() {
                Ok(*c)
            } else {
                Err(FenParseError::UnexpectedEnd)
            }
        }

        fn eat_side_to_move<'a>(iter: &mut Stream<'a>) -> Result<Color, FenParseError> {
            let side = match peek(iter)? {
                'w' => Color::White,
                'b' => Color::Black,
                _ => return Err(FenParseError::InvalidSideToMove),
            };

            advance(iter)?;
            Ok(side)
        }

        fn eat_castle_status<'a>(iter: &mut Stream<'a>) -> Result<CastleStatus, FenParseError> {
            if peek(iter)? == '-' {
                advance(iter)?;
                return Ok(CastleStatus::NONE);
            }

            let mut status = CastleStatus::NONE;
            for _ in 0..4 {
                match peek(iter)? {
                    'K' => status |= CastleStatus::WHITE_KINGSIDE,
                    'k' => status |= CastleStatus::BLACK_KINGSIDE,
                    'Q' => status |= CastleStatus::WHITE_QUEENSIDE,
                    'q' => status |= CastleStatus::BLACK_QUEENSIDE,
                    ' ' => break,
                    _ => return Err(FenParseError::InvalidCastle),
                }

                advance(iter)?;
            }

            Ok(status)
        }

        fn eat_en_passant<'a>(
            iter: &mut Stream<'a>,
        ) -> Result<Option<(Color, usize)>, FenParseError> {
            let c = peek(iter)?;
            if c == '-' {
                advance(iter)?;
                return Ok(None);
            }

            let file = File::try_from(c).map_err(|_| FenParseError::InvalidEnPassant)?;
            advance(iter)?;
            let rank = Rank::try_from(peek(iter)?).map_err(|_| FenParseError::InvalidEnPassant)?;
            advance(iter)?;
            match rank {
                Rank::Three => Ok(Some((Color::White, file.as_index()))),
                Rank::Six => Ok(Some((Color::Black, file.as_index()))),
                _ => Err(FenParseError::InvalidEnPassant),
            }
        }

        fn eat_halfmove<'a>(iter: &mut Stream<'a>) -> Result<u32, FenParseError> {
            let mut buf = String::new();
            loop {
                let c = peek(iter)?;
                if !c.is_digit(10) {
                    break;
                }

                buf.push(c);
                advance(iter)?;
            }

            if buf.is_empty() {
                return Err(FenParseError::EmptyHalfmove);
            }

            buf.parse::<u32>()
                .map_err(|_| FenParseError::InvalidHalfmove)
        }

        fn eat_fullmove<'a>(iter: &mut Stream<'a>) -> Result<u32, FenParseError> {
            let mut buf = String::new();
            for ch in iter {
                if !ch.is_digit(10) {
                    break;
                }

                buf.push(ch);
            }

            if buf.is_empty() {
                return Err(FenParseError::EmptyFullmove);
            }

            buf.parse::<u32>()
                .map_err(|_| FenParseError::InvalidFullmove)
        }

        let mut pos = Position::new();
        let str_ref = fen.as_ref();
        let iter = &mut str_ref.chars().peekable();
        for row in 0..8 {
            let mut col = 0;
            while col < 8 {
                let c = peek(iter)?;
                // digits 1 through 8 indicate empty squares.
                if c.is_digit(10) {
                    if c < '1' || c > '8' {
                        return Err(FenParseError::InvalidDigit);
                    }

                    col += c as usize - '0' as usize;
                    if col > 8 {
                        return Err(FenParseError::FileDoesNotSumToEight);
                    }

                    advance(iter)?;
                    continue;
                }

                // if it's not a digit, it represents a piece.
                let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece)?;
                pos.set_code(Square::at(row, col), piece.code());
                advance(iter)?;
                col += 1;
            }

            if row != 7 {
                eat(iter, '/')?;
            }
        }

        eat(iter, ' ')?;
        let side = eat_side_to_move(iter)?;
        eat(iter, ' ')?;
        pos.castle_status = eat_castle_status(iter)?;
        eat(iter, ' ')?;
        if let Some((color, file)) = eat_en_passant(iter)? {
            pos.en_passant[color.as_index()][file] = true;
        }

        // the clocks are optional; plenty of hand-written FEN leaves them off.
        if iter.peek().is_none() {
            return Ok((pos, side));
        }

        eat(iter, ' ')?;
        eat_halfmove(iter)?;
        eat(iter, ' ')?;
        eat_fullmove(iter)?;
        Ok((pos, side))
    }

    /// Produces FEN for this position with the given side to move. Only the en-passant flags of
    /// the side that just moved are meaningful to the side to move, so only they are written.
    pub fn as_fen(&self, side_to_move: Color) -> String {
        let mut buf = String::new();
        for (row, rank) in self.board.iter().zip(RANKS.iter().rev()) {
            let mut empty_squares = 0;
            for &code in row.iter() {
                if let Some(piece) = Piece::from_code(code) {
                    if empty_squares != 0 {
                        write!(&mut buf, "{}", empty_squares).unwrap();
                    }
                    write!(&mut buf, "{}", piece).unwrap();
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                write!(&mut buf, "{}", empty_squares).unwrap();
            }

            if *rank != Rank::One {
                buf.push('/');
            }
        }

        buf.push(' ');
        write!(&mut buf, "{}", side_to_move).unwrap();
        buf.push(' ');
        if self.castle_status.is_empty() {
            buf.push('-');
        }
        if self.can_castle_kingside(Color::White) {
            buf.push('K');
        }
        if self.can_castle_queenside(Color::White) {
            buf.push('Q');
        }
        if self.can_castle_kingside(Color::Black) {
            buf.push('k');
        }
        if self.can_castle_queenside(Color::Black) {
            buf.push('q');
        }
        buf.push(' ');

        let just_moved = side_to_move.toggle();
        let flagged = (0..8).find(|&file| self.en_passant_flag(just_moved, file));
        match flagged {
            Some(file) => {
                let rank = match just_moved {
                    Color::White => Rank::Three,
                    Color::Black => Rank::Six,
                };
                write!(&mut buf, "{}{}", FILES[file], rank).unwrap();
            }
            None => buf.push('-'),
        }

        buf.push_str(" 0 1");
        buf
    }
}

//
// Trait implementations
//

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (row, rank) in self.board.iter().zip(RANKS.iter().rev()) {
            for &code in row.iter() {
                if let Some(piece) = Piece::from_code(code) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in &FILES {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for &file in &FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::moves::Move;
    use crate::position::Position;
    use crate::types::{Color, Piece, PieceKind, Square};

    fn parse(fen: &str) -> Position {
        Position::from_fen(fen).unwrap().0
    }

    #[test]
    fn check_smoke() {
        let (pos, side) =
            Position::from_fen("r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1")
                .unwrap();
        assert_eq!(Color::Black, side);
        assert!(pos.is_check(Color::Black));
        assert!(!pos.is_check(Color::White));
    }

    #[test]
    fn missing_king_is_never_in_check() {
        let pos = parse("8/8/8/8/8/8/8/R7 w - - 0 1");
        assert!(!pos.is_check(Color::White));
        assert!(!pos.is_check(Color::Black));
    }

    mod fen {
        use super::parse;
        use crate::position::{FenParseError, Position};
        use crate::types::{Color, Piece, PieceKind, Square};

        #[test]
        fn start_position() {
            let (pos, side) =
                Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
                    .unwrap();
            assert_eq!(Color::White, side);
            assert_eq!(Position::from_start_position(), pos);
        }

        #[test]
        fn pieces_land_on_grid() {
            let pos = parse("8/8/8/8/8/8/8/4K2r w - - 0 1");
            assert_eq!(6, pos.board()[7][4]);
            assert_eq!(-4, pos.board()[7][7]);
            assert_eq!(
                Some(Piece::new(PieceKind::King, Color::White)),
                pos.piece_at(Square::E1)
            );
        }

        #[test]
        fn castle_rights() {
            let pos = parse("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1");
            assert!(pos.can_castle_kingside(Color::White));
            assert!(!pos.can_castle_queenside(Color::White));
            assert!(!pos.can_castle_kingside(Color::Black));
            assert!(pos.can_castle_queenside(Color::Black));
        }

        #[test]
        fn en_passant_square_sets_flag() {
            // white just pushed e2-e4.
            let pos = parse("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1");
            assert!(pos.en_passant_flag(Color::White, 4));
            assert!(!pos.en_passant_flag(Color::Black, 4));

            // black just pushed d7-d5.
            let pos = parse("4k3/8/8/3p4/8/8/8/4K3 w - d6 0 1");
            assert!(pos.en_passant_flag(Color::Black, 3));
        }

        #[test]
        fn clocks_optional() {
            let (_, side) = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();
            assert_eq!(Color::Black, side);

            // the en-passant field itself is still required.
            assert_eq!(
                Err(FenParseError::UnexpectedEnd),
                Position::from_fen("4k3/8/8/8/8/8/8/4K3 b -").map(|_| ())
            );
        }

        #[test]
        fn errors() {
            assert_eq!(
                Err(FenParseError::FileDoesNotSumToEight),
                Position::from_fen("72/8/8/8/8/8/8/8 w - - 0 1").map(|_| ())
            );
            assert_eq!(
                Err(FenParseError::UnknownPiece),
                Position::from_fen("8/8/8/8/8/8/8/7X w - - 0 1").map(|_| ())
            );
            assert_eq!(
                Err(FenParseError::InvalidSideToMove),
                Position::from_fen("8/8/8/8/8/8/8/8 x - - 0 1").map(|_| ())
            );
            assert_eq!(
                Err(FenParseError::InvalidEnPassant),
                Position::from_fen("8/8/8/8/8/8/8/8 w - e4 0 1").map(|_| ())
            );
            assert_eq!(
                Err(FenParseError::UnexpectedEnd),
                Position::from_fen("8/8/8").map(|_| ())
            );
        }

        #[test]
        fn as_fen() {
            let text = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
            let (pos, side) = Position::from_fen(text).unwrap();
            assert_eq!(text, pos.as_fen(side));

            let text = "4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1";
            let (pos, side) = Position::from_fen(text).unwrap();
            assert_eq!(text, pos.as_fen(side));
        }
    }

    mod apply {
        use super::parse;
        use crate::moves::Move;
        use crate::types::{Color, PieceKind, Square};

        #[test]
        fn quiet_pawn_push() {
            let mut pos = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
            pos.apply_move(Move::new(Square::E2, Square::E3));
            assert_eq!(None, pos.piece_at(Square::E2));
            assert_eq!(Some(PieceKind::Pawn), pos.piece_at(Square::E3).map(|p| p.kind));

            // a single push never marks the file.
            assert!(!pos.en_passant_flag(Color::White, 4));
        }

        #[test]
        fn double_push_sets_flag() {
            let mut pos = parse("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
            pos.apply_move(Move::new(Square::E2, Square::E4));
            assert!(pos.en_passant_flag(Color::White, 4));
            assert_eq!([false, false, false, false, true, false, false, false], pos.en_passant_flags(Color::White));

            pos.reset_en_passant(Color::White);
            assert!(!pos.en_passant_flag(Color::White, 4));
        }

        #[test]
        fn en_passant_removes_pawn_behind_target() {
            // black just played d7-d5, white pawn on e5 takes en passant.
            let mut pos = parse("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
            pos.apply_move(Move::new(Square::E5, Square::D6));
            assert_eq!(None, pos.piece_at(Square::D5));
            assert_eq!(None, pos.piece_at(Square::E5));
            assert_eq!(Some(PieceKind::Pawn), pos.piece_at(Square::D6).map(|p| p.kind));
        }

        #[test]
        fn white_kingside_castle() {
            // white to move, white castles kingside
            let mut pos = parse("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
            pos.apply_move(Move::new(Square::E1, Square::G1));
            assert_eq!(Some(PieceKind::King), pos.piece_at(Square::G1).map(|p| p.kind));
            assert_eq!(Some(PieceKind::Rook), pos.piece_at(Square::F1).map(|p| p.kind));
            assert_eq!(None, pos.piece_at(Square::H1));
            assert_eq!(None, pos.piece_at(Square::E1));
            assert!(!pos.can_castle_kingside(Color::White));
            assert!(!pos.can_castle_queenside(Color::White));
            assert!(pos.can_castle_kingside(Color::Black));
        }

        #[test]
        fn black_queenside_castle() {
            // black to move, black castles queenside
            let mut pos = parse("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
            pos.apply_move(Move::new(Square::E8, Square::C8));
            assert_eq!(Some(PieceKind::King), pos.piece_at(Square::C8).map(|p| p.kind));
            assert_eq!(Some(PieceKind::Rook), pos.piece_at(Square::D8).map(|p| p.kind));
            assert_eq!(None, pos.piece_at(Square::A8));
            assert!(!pos.can_castle_kingside(Color::Black));
            assert!(!pos.can_castle_queenside(Color::Black));
            assert!(pos.can_castle_queenside(Color::White));
        }

        #[test]
        fn rook_move_clears_one_right() {
            let mut pos = parse("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
            pos.apply_move(Move::new(Square::H1, Square::H4));
            assert!(!pos.can_castle_kingside(Color::White));
            assert!(pos.can_castle_queenside(Color::White));
        }

        #[test]
        fn rook_capture_clears_opponent_right() {
            // white rook takes the black rook on a8.
            let mut pos = parse("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
            pos.apply_move(Move::new(Square::A1, Square::A8));
            assert!(!pos.can_castle_queenside(Color::White));
            assert!(!pos.can_castle_queenside(Color::Black));
            assert!(pos.can_castle_kingside(Color::Black));
        }

        #[test]
        fn king_step_clears_both_rights() {
            let mut pos = parse("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
            pos.apply_move(Move::new(Square::E8, Square::E7));
            assert!(!pos.can_castle_kingside(Color::Black));
            assert!(!pos.can_castle_queenside(Color::Black));

            // walking back home does not restore anything.
            pos.apply_move(Move::new(Square::E7, Square::E8));
            assert!(!pos.can_castle_kingside(Color::Black));
        }

        #[test]
        fn promotion_with_kind() {
            let mut pos = parse("8/P3k3/8/8/8/8/8/4K3 w - - 0 1");
            pos.apply_move(Move::promoting(Square::A7, Square::A8, PieceKind::Knight));
            assert_eq!(Some(PieceKind::Knight), pos.piece_at(Square::A8).map(|p| p.kind));
            assert_eq!(None, pos.pending_promotion());
        }

        #[test]
        fn promotion_pending_until_chosen() {
            let mut pos = parse("8/4k2P/8/8/8/8/8/4K3 w - - 0 1");
            pos.apply_move(Move::new(Square::H7, Square::H8));
            assert_eq!(Some(Square::H8), pos.pending_promotion());

            assert!(pos.promote(Square::H8, PieceKind::King).is_err());
            assert!(pos.promote(Square::E1, PieceKind::Queen).is_err());
            pos.promote(Square::H8, PieceKind::Rook).unwrap();
            assert_eq!(Some(PieceKind::Rook), pos.piece_at(Square::H8).map(|p| p.kind));
            assert_eq!(None, pos.pending_promotion());
        }
    }

    mod legality {
        use super::parse;
        use crate::moves::Move;
        use crate::types::{Color, PieceKind, Square};

        #[test]
        fn pawn_pushes() {
            let pos = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
            assert!(pos.is_legal(Color::White, Move::new(Square::E2, Square::E3)));
            assert!(pos.is_legal(Color::White, Move::new(Square::E2, Square::E4)));
            assert!(!pos.is_legal(Color::White, Move::new(Square::E2, Square::E5)));
            assert!(!pos.is_legal(Color::White, Move::new(Square::E2, Square::D3)));

            // not white's piece.
            assert!(!pos.is_legal(Color::White, Move::new(Square::E7, Square::E5)));
            assert!(pos.is_legal(Color::Black, Move::new(Square::E7, Square::E5)));
        }

        #[test]
        fn blocked_double_push() {
            let pos = parse("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
            assert!(!pos.is_legal(Color::White, Move::new(Square::E2, Square::E3)));
            assert!(!pos.is_legal(Color::White, Move::new(Square::E2, Square::E4)));
        }

        #[test]
        fn double_push_only_from_home_row() {
            let pos = parse("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1");
            assert!(!pos.is_legal(Color::White, Move::new(Square::E3, Square::E5)));
        }

        #[test]
        fn en_passant_needs_flag() {
            let with_flag = parse("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
            assert!(with_flag.is_legal(Color::White, Move::new(Square::E5, Square::D6)));

            let without_flag = parse("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1");
            assert!(!without_flag.is_legal(Color::White, Move::new(Square::E5, Square::D6)));
        }

        #[test]
        fn en_passant_that_exposes_king() {
            // capturing en passant removes both pawns from the fifth rank, opening the rook's line.
            let pos = parse("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
            assert!(!pos.is_legal(Color::White, Move::new(Square::E5, Square::D6)));

            // the plain push keeps the black pawn in the way.
            assert!(pos.is_legal(Color::White, Move::new(Square::E5, Square::E6)));
        }

        #[test]
        fn pinned_piece_cannot_leave_line() {
            let pos = parse("4r2k/8/8/8/8/4B3/4K3/8 w - - 0 1");
            assert!(!pos.is_legal(Color::White, Move::new(Square::E3, Square::D4)));
            assert!(pos.is_legal(Color::White, Move::new(Square::E2, Square::D2)));
        }

        #[test]
        fn king_cannot_step_into_control() {
            let pos = parse("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1");
            assert!(!pos.is_legal(Color::White, Move::new(Square::E1, Square::E2)));
            assert!(!pos.is_legal(Color::White, Move::new(Square::E1, Square::D1)));
            assert!(pos.is_legal(Color::White, Move::new(Square::E1, Square::F1)));

            // taking the undefended rook is fine.
            assert!(pos.is_legal(Color::White, Move::new(Square::E1, Square::D2)));
        }

        #[test]
        fn castling_requirements() {
            let pos = parse("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
            assert!(pos.is_legal(Color::White, Move::new(Square::E1, Square::G1)));
            assert!(pos.is_legal(Color::White, Move::new(Square::E1, Square::C1)));

            // no right.
            let pos = parse("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1");
            assert!(!pos.is_legal(Color::White, Move::new(Square::E1, Square::G1)));

            // blocked on b1, which the king never crosses.
            let pos = parse("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1");
            assert!(!pos.is_legal(Color::White, Move::new(Square::E1, Square::C1)));
        }

        #[test]
        fn castling_through_control() {
            // black rook on f8 controls f1, which the king crosses.
            let pos = parse("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
            assert!(!pos.is_legal(Color::White, Move::new(Square::E1, Square::G1)));
            assert!(pos.is_legal(Color::White, Move::new(Square::E1, Square::C1)));

            // no castling out of check either.
            let pos = parse("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
            assert!(!pos.is_legal(Color::White, Move::new(Square::E1, Square::G1)));
            assert!(!pos.is_legal(Color::White, Move::new(Square::E1, Square::C1)));
        }

        #[test]
        fn castling_needs_rook_on_corner() {
            let pos = parse("4k3/8/8/8/8/8/8/4K3 w K - 0 1");
            assert!(!pos.is_legal(Color::White, Move::new(Square::E1, Square::G1)));
        }

        #[test]
        fn promotion_kind_rules() {
            let pos = parse("4k3/P7/8/8/8/8/1P6/4K3 w - - 0 1");
            assert!(pos.is_legal(Color::White, Move::promoting(Square::A7, Square::A8, PieceKind::Queen)));
            assert!(pos.is_legal(Color::White, Move::new(Square::A7, Square::A8)));
            assert!(!pos.is_legal(Color::White, Move::promoting(Square::A7, Square::A8, PieceKind::King)));
            assert!(!pos.is_legal(Color::White, Move::promoting(Square::B2, Square::B3, PieceKind::Queen)));
        }

        #[test]
        fn make_move_leaves_original() {
            let pos = parse("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
            let before = pos;
            let after = pos.make_move(Color::White, Move::new(Square::E1, Square::G1)).unwrap();
            assert_eq!(before, pos);
            assert_ne!(before, after);
            assert!(pos.make_move(Color::White, Move::new(Square::E1, Square::E3)).is_none());
        }
    }

    #[test]
    fn copies_are_independent() {
        let original = Position::from_start_position();
        let mut copy = original;
        copy.apply_move(Move::new(Square::E2, Square::E4));
        copy.reset_en_passant(Color::White);
        copy.add_piece(Square::E5, Piece::new(PieceKind::Queen, Color::Black)).unwrap();
        assert_eq!(Position::from_start_position(), original);
        assert_ne!(original, copy);
    }
}
