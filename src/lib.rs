// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod analysis;
pub mod attacks;
pub mod eval;
pub mod game;
mod move_generator;
mod moves;
pub mod notation;
mod perft;
mod position;
pub mod search;
mod status;
mod types;

pub use analysis::Analysis;
pub use game::{EngineConfig, EngineReply, Game, MoveRecord, PromotionChooser, QueenPromotion};
pub use move_generator::{legal_moves, MoveGenerator, MoveVec};
pub use moves::{Move, MoveParseError};
pub use perft::{divide, perft};
pub use position::{FenParseError, Position};
pub use status::GameStatus;
pub use types::{
    CastleStatus, Color, File, Orientation, Piece, PieceKind, Rank, Square, COLORS, FILES,
    PIECE_KINDS, PROMOTION_KINDS, RANKS, SQUARES,
};
