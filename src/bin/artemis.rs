// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use std::cell::Cell;
use std::convert::TryFrom;
use std::fs::File;
use std::io::{self, Write};
use std::process;
use std::rc::Rc;
use std::time::Instant;

use artemis::eval::{BoardEvaluator, PieceSquareEvaluator};
use artemis::search::{CsvDataRecorder, MinimaxSearcher, NullDataRecorder, Record, DEFAULT_DEPTH};
use artemis::{
    divide, perft, Color, EngineConfig, Game, GameStatus, Move, PieceKind, Position, Square,
};
use clap::{App, Arg, ArgMatches, SubCommand};

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name("play")
                .about("Play a game against the engine")
                .arg(depth_arg())
                .arg(
                    Arg::with_name("color")
                        .help("Color played by the human")
                        .value_name("COLOR")
                        .short("-c")
                        .long("--color")
                        .possible_values(&["white", "black"])
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("fen")
                        .help("FEN string for the starting position")
                        .value_name("FEN")
                        .long("--fen")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of board positions")
                .arg(fen_arg())
                .arg(depth_arg())
                .arg(
                    Arg::with_name("divide")
                        .help("Break the deepest count down by root move")
                        .long("--divide"),
                ),
        )
        .subcommand(
            SubCommand::with_name("evaluate")
                .about("Evaluate a board position")
                .arg(fen_arg())
                .arg(depth_arg())
                .arg(
                    Arg::with_name("json")
                        .help("Print the search result as JSON")
                        .long("--json"),
                )
                .arg(
                    Arg::with_name("record")
                        .help("Append the search result to a CSV file")
                        .value_name("FILE")
                        .long("--record")
                        .takes_value(true),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("perft", Some(matches)) => run_perft(matches),
        ("evaluate", Some(matches)) => run_evaluate(matches),
        ("play", Some(matches)) => run_play(matches),
        _ => run_play(&ArgMatches::default()),
    }
}

fn fen_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("FEN")
        .help("FEN string for a board position")
        .required(true)
        .index(1)
}

fn depth_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("depth")
        .help("Depth of move tree to search")
        .value_name("DEPTH")
        .short("-d")
        .long("--depth")
        .takes_value(true)
}

fn depth_or(matches: &ArgMatches, default: u32) -> u32 {
    if matches.is_present("depth") {
        value_t_or_exit!(matches, "depth", u32)
    } else {
        default
    }
}

fn parse_fen(fen: &str) -> (Position, Color) {
    match Position::from_fen(fen) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("invalid fen: {}", e);
            process::exit(1);
        }
    }
}

fn run_perft(matches: &ArgMatches) -> ! {
    let fen = matches.value_of("FEN").unwrap_or_default();
    let depth = depth_or(matches, 1);
    let (pos, side) = parse_fen(fen);

    println!("fen:   {}", fen);
    println!("depth: {}", depth);
    println!();
    println!("{}", pos);
    println!();
    for i in 1..=depth {
        let start = Instant::now();
        let results = perft(&pos, side, i);
        let duration = start.elapsed();
        println!("perft({}) = {} ({} ms)", i, results, duration.as_millis());
    }

    if matches.is_present("divide") && depth > 0 {
        println!();
        for (mov, count) in divide(&pos, side, depth) {
            println!("{}: {}", mov, count);
        }
    }

    process::exit(0);
}

fn run_evaluate(matches: &ArgMatches) -> ! {
    let fen = matches.value_of("FEN").unwrap_or_default();
    let depth = depth_or(matches, DEFAULT_DEPTH);
    let (pos, side) = parse_fen(fen);

    let mut searcher = MinimaxSearcher::new(depth);
    let start = Instant::now();
    let result = match matches.value_of("record") {
        Some(path) => {
            let file = match File::create(path) {
                Ok(file) => file,
                Err(e) => {
                    eprintln!("failed to create {}: {}", path, e);
                    process::exit(1);
                }
            };

            let recorder = CsvDataRecorder::new(file);
            searcher.search(&pos, side, &recorder)
        }
        None => searcher.search(&pos, side, &NullDataRecorder),
    };
    let duration = start.elapsed();
    let best_move = result
        .best_move
        .map(|m| m.to_string())
        .unwrap_or_default();

    if matches.is_present("json") {
        let record = Record {
            fen: pos.as_fen(side),
            depth,
            nodes: result.nodes_searched,
            score: result.score.centipawns(),
            best_move,
        };

        match serde_json::to_string_pretty(&record) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("failed to serialize search result: {}", e);
                process::exit(1);
            }
        }

        process::exit(0);
    }

    let evaluator = PieceSquareEvaluator::new();
    println!("fen:   {}", fen);
    println!("depth: {}", depth);
    println!();
    println!("{}", pos);
    println!();
    println!("   static: {}", evaluator.evaluate(&pos, 0));
    println!("best move: {}", if best_move.is_empty() { "none" } else { &best_move });
    println!("    score: {}", result.score);
    println!("    nodes: {}", result.nodes_searched);
    println!("     time: {} ms", duration.as_millis());
    process::exit(0);
}

fn run_play(matches: &ArgMatches) -> ! {
    let human = match matches.value_of("color") {
        Some(color) => Color::try_from(color).unwrap_or(Color::White),
        None => Color::White,
    };

    let config = EngineConfig {
        depth: depth_or(matches, DEFAULT_DEPTH),
        human,
    };

    let (pos, side) = match matches.value_of("fen") {
        Some(fen) => parse_fen(fen),
        None => (Position::from_start_position(), Color::White),
    };

    // a promotion letter typed with the move answers the promotion question up front.
    let typed_promotion: Rc<Cell<Option<PieceKind>>> = Rc::new(Cell::new(None));
    let answer = Rc::clone(&typed_promotion);
    let mut game = Game::from_position(pos, side, config).with_promotion_chooser(
        move |square: Square, _color: Color| {
            answer.take().unwrap_or_else(|| prompt_promotion(square))
        },
    );

    info!(
        "starting game: human plays {}, search depth {}",
        config.human, config.depth
    );
    loop {
        println!();
        println!("{}", game.position());
        match game.status() {
            GameStatus::Ongoing => {}
            status => {
                println!("{}", status);
                break;
            }
        }

        if game.side_to_move() == game.engine_color() {
            match game.compute_and_apply_engine_move() {
                Some(reply) => println!(
                    "engine plays {} (evaluation {}, {} nodes)",
                    reply.san, reply.score, reply.nodes_searched
                ),
                None => break,
            }

            let human = game.human_color();
            game.reset_en_passant(human);
            continue;
        }

        if game.is_in_check(game.human_color()) {
            println!("check!");
        }

        let line = match prompt(&format!("{} {}> ", game.move_number(), game.human_color())) {
            Some(line) => line,
            None => break,
        };

        match line.trim() {
            "" => continue,
            "quit" | "resign" => break,
            "moves" => {
                println!("{}", game.movetext());
                continue;
            }
            input => {
                let mov = match input.parse::<Move>() {
                    Ok(mov) => mov,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };

                typed_promotion.set(mov.promotion());
                let accepted = game.attempt_human_move(mov.source(), mov.destination());
                typed_promotion.set(None);
                if !accepted {
                    println!("illegal move: {}", mov);
                }
            }
        }
    }

    println!();
    println!("{}", game.movetext());
    process::exit(0);
}

/// Prints `message` and reads one line from stdin. Returns None at end of input.
fn prompt(message: &str) -> Option<String> {
    print!("{}", message);
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

fn prompt_promotion(square: Square) -> PieceKind {
    let message = format!("promote on {} to (q, r, b, n)? ", square);
    match prompt(&message) {
        Some(line) => line
            .trim()
            .chars()
            .next()
            .map(PieceKind::from_promotion_char)
            .unwrap_or(PieceKind::Queen),
        None => PieceKind::Queen,
    }
}
