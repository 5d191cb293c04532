// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::fs::OpenOptions;
use std::process;
use std::time::Instant;

use bitchess::eval::{BoardEvaluator, MaterialEvaluator, WeightedCountEvaluator};
use bitchess::search::{
    CsvDataRecorder, DataRecorder, MinimaxSearcher, NullDataRecorder, Record, SearchConfig, Searcher,
};
use bitchess::{perft, perft_divide, Color, MoveGenerator, Position};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

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
        .short("d")
        .long("depth")
        .takes_value(true)
}

fn main() {
    env_logger::init();
    bitchess::initialize();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of board positions")
                .arg(fen_arg())
                .arg(depth_arg().required(true))
                .arg(
                    Arg::with_name("divide")
                        .help("Report leaf counts per root move")
                        .long("divide"),
                ),
        )
        .subcommand(
            SubCommand::with_name("search")
                .about("Search a board position for the best move")
                .arg(fen_arg())
                .arg(depth_arg())
                .arg(
                    Arg::with_name("json")
                        .help("Print the search record as JSON")
                        .long("json"),
                )
                .arg(
                    Arg::with_name("record")
                        .help("Append the search record to a CSV file")
                        .value_name("FILE")
                        .long("record")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("evaluator")
                        .help("Board evaluator to score leaves with")
                        .long("evaluator")
                        .possible_values(&["weighted", "material"])
                        .default_value("weighted"),
                ),
        )
        .subcommand(
            SubCommand::with_name("show")
                .about("Print the masks, hash and evaluation of a board position")
                .arg(fen_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        ("perft", Some(matches)) => run_perft(matches),
        ("search", Some(matches)) => run_search(matches),
        ("show", Some(matches)) => run_show(matches),
        _ => unreachable!(),
    }
}

fn parse_position(matches: &ArgMatches) -> Position {
    let fen = matches.value_of("FEN").unwrap();
    match Position::from_fen(fen) {
        Ok(pos) => pos,
        Err(err) => {
            eprintln!("invalid fen: {}", err);
            process::exit(1);
        }
    }
}

fn run_perft(matches: &ArgMatches) -> ! {
    let depth = value_t_or_exit!(matches, "depth", u32);
    let pos = parse_position(matches);

    println!("fen:   {}", pos.as_fen());
    println!("depth: {}", depth);
    println!();
    println!("{}", pos);
    println!();
    if matches.is_present("divide") {
        let divided = perft_divide(&pos, depth);
        for (mov, count) in &divided {
            println!("{}: {}", mov, count);
        }

        println!();
        println!("moves: {}", divided.len());
        println!("total: {}", divided.iter().map(|&(_, count)| count).sum::<u64>());
        process::exit(0);
    }

    for i in 1..=depth {
        let start = Instant::now();
        let results = perft(&pos, i);
        let duration = start.elapsed();
        let ms = duration.as_secs() * 1000 + u64::from(duration.subsec_millis());
        println!("perft({}) = {} ({} ms)", i, results, ms);
    }

    process::exit(0);
}

fn run_search(matches: &ArgMatches) -> ! {
    match matches.value_of("evaluator") {
        Some("material") => search_with::<MaterialEvaluator>(matches),
        _ => search_with::<WeightedCountEvaluator>(matches),
    }
}

fn search_with<E: BoardEvaluator>(matches: &ArgMatches) -> ! {
    let config = if matches.is_present("depth") {
        SearchConfig::new(value_t_or_exit!(matches, "depth", u32))
    } else {
        SearchConfig::default()
    };
    let pos = parse_position(matches);

    let recorder: Box<dyn DataRecorder> = match matches.value_of("record") {
        Some(path) => {
            let file = match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => file,
                Err(err) => {
                    eprintln!("failed to open {}: {}", path, err);
                    process::exit(1);
                }
            };

            let empty = file.metadata().map(|meta| meta.len() == 0).unwrap_or(true);
            if empty {
                Box::new(CsvDataRecorder::new(file))
            } else {
                Box::new(CsvDataRecorder::without_headers(file))
            }
        }
        None => Box::new(NullDataRecorder),
    };

    let mut searcher = MinimaxSearcher::<E>::with_recorder(config, recorder);
    let result = match searcher.search(&pos) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("search failed: {}", err);
            process::exit(1);
        }
    };

    if matches.is_present("json") {
        let mut record = Record::from_result(config.depth, &result);
        record.fen = pos.as_fen();
        match serde_json::to_string_pretty(&record) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("failed to serialize search record: {}", err);
                process::exit(1);
            }
        }

        process::exit(0);
    }

    println!("fen:   {}", pos.as_fen());
    println!("depth: {}", config.depth);
    println!();
    println!("{}", pos);
    println!();
    match result.best_move {
        Some(mov) => println!("best move: {}", mov),
        None => println!("best move: (none)"),
    }
    println!("    score: {}", result.score);
    println!("       pv: {}", Record::from_result(config.depth, &result).principal_variation);
    println!(" expanded: {} ({:?})", result.nodes_expanded, result.expansion_time);
    println!("evaluated: {} ({:?})", result.leaves_evaluated, result.evaluation_time);
    process::exit(0);
}

fn run_show(matches: &ArgMatches) -> ! {
    let pos = parse_position(matches);
    let mut gen = MoveGenerator::new();

    println!("fen:   {}", pos.as_fen());
    println!("hash:  {:08x}", pos.hash_key());
    println!();
    println!("{}", pos);
    println!();
    println!("white pieces:");
    println!("{}", pos.pieces(Color::White));
    println!("black pieces:");
    println!("{}", pos.pieces(Color::Black));
    println!("control zone ({}):", pos.side_to_move());
    println!("{}", gen.control_zone(&pos));
    println!("white in check: {}", pos.is_check(Color::White));
    println!("black in check: {}", pos.is_check(Color::Black));
    println!(
        "weighted count: {}",
        WeightedCountEvaluator::new().evaluate(&pos)
    );
    println!("material:       {}", MaterialEvaluator::new().evaluate(&pos));

    let successors = gen.successors(&pos);
    let moves: Vec<String> = successors.iter().map(|(mov, _)| mov.to_string()).collect();
    println!("legal moves ({}): {}", moves.len(), moves.join(" "));
    process::exit(0);
}
