// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate criterion;

use artemis::attacks;
use artemis::eval::{BoardEvaluator, PieceSquareEvaluator};
use artemis::search::{MinimaxSearcher, NullDataRecorder};
use artemis::{Color, MoveGenerator, MoveVec, Position, Square};
use criterion::black_box;
use criterion::Criterion;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("queen control f3 kiwipete", |b| {
        let (pos, _) = Position::from_fen(KIWIPETE).unwrap();
        b.iter(|| attacks::controlled_squares(pos.board(), black_box(Square::F3)))
    });

    c.bench_function("under control e1 kiwipete", |b| {
        let (pos, _) = Position::from_fen(KIWIPETE).unwrap();
        b.iter(|| attacks::under_control(pos.board(), black_box(Square::E1), Color::Black))
    });

    c.bench_function("position copy", |b| {
        let pos = Position::from_start_position();
        b.iter(|| *black_box(&pos))
    });

    c.bench_function("generate moves start", |b| {
        let pos = Position::from_start_position();
        b.iter(|| {
            let mut vec = MoveVec::default();
            let gen = MoveGenerator::new();
            gen.generate_moves(black_box(&pos), Color::White, &mut vec);
        });
    });

    c.bench_function("generate legal moves kiwipete", |b| {
        let (pos, side) = Position::from_fen(KIWIPETE).unwrap();
        b.iter(|| {
            let mut vec = MoveVec::default();
            let gen = MoveGenerator::new();
            gen.generate_legal_moves(black_box(&pos), side, &mut vec);
        });
    });

    c.bench_function("evaluate kiwipete", |b| {
        let (pos, _) = Position::from_fen(KIWIPETE).unwrap();
        let eval = PieceSquareEvaluator::new();
        b.iter(|| eval.evaluate(black_box(&pos), 0))
    });

    c.bench_function("search start depth 1", |b| {
        let pos = Position::from_start_position();
        b.iter(|| {
            let mut searcher = MinimaxSearcher::new(1);
            searcher.search(black_box(&pos), Color::White, &NullDataRecorder)
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
