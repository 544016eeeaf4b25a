// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::io::Write;
use std::sync::Mutex;

use csv::Writer;

use crate::position::Position;
use crate::types::Color;

/// One line of search output: the searched position, how hard the searcher looked at it, and
/// what it found. `score` is in centipawns from White's point of view and `best_move` is empty
/// when the side to move had no legal move.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub fen: String,
    pub depth: u32,
    pub nodes: u64,
    pub score: i32,
    pub best_move: String,
}

pub trait DataRecorder {
    /// Records a finished search. The recorder fills in `fen` from `pos` and `side`.
    fn record(&self, pos: &Position, side: Color, rec: &Record);
}

pub struct NullDataRecorder;
impl DataRecorder for NullDataRecorder {
    fn record(&self, _pos: &Position, _side: Color, _rec: &Record) {}
}

pub struct CsvDataRecorder<W: Write> {
    writer: Mutex<Writer<W>>,
}

impl<W: Write> CsvDataRecorder<W> {
    pub fn new(writer: W) -> CsvDataRecorder<W> {
        CsvDataRecorder {
            writer: Mutex::new(Writer::from_writer(writer)),
        }
    }

    pub fn into_inner(self) -> Option<W> {
        let writer = match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };

        writer.into_inner().ok()
    }
}

impl<W: Write> DataRecorder for CsvDataRecorder<W> {
    fn record(&self, pos: &Position, side: Color, rec: &Record) {
        let mut copy = rec.clone();
        copy.fen = pos.as_fen(side);
        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Err(e) = writer.serialize(&copy) {
            error!("failed to record search: {}", e);
            return;
        }

        if let Err(e) = writer.flush() {
            error!("failed to flush search record: {}", e);
        }
    }
}
