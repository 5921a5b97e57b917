//! Play chess at the terminal.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]
#![warn(clippy::option_unwrap_used, clippy::result_unwrap_used)]

use std::collections::HashMap;
use std::fs::{write, File};
use std::io::{stdin, stdout};
use std::path::PathBuf;
use clap::{App, Arg, SubCommand, crate_version};
use simplelog::{WriteLogger, LevelFilter, Config};
use chrono::Local;
use arbiter::chess::{variations, Board, Game};
use arbiter::console::{self, Console, Frontend};

fn main() -> Result<(), Error> {
    let matches =
        App::new("Arbiter")
            .version(crate_version!())
            .about("Referees a game of chess between two players at the terminal")
            .arg(Arg::with_name("fen")
                .long("fen")
                .value_name("FEN_STRING")
                .takes_value(true)
                .help("Starts from the given position in Forsyth-Edwards Notation (FEN)"))
            .arg(Arg::with_name("pgn")
                .long("pgn")
                .value_name("PGN_FILE")
                .takes_value(true)
                .help("Writes the game to the given file in Portable Game Notation (PGN)"))
            .arg(Arg::with_name("config")
                .long("config")
                .short("c")
                .value_name("CONFIG_FILE")
                .takes_value(true)
                .help("Reads display settings from the given file [default: ~/.arbiter/config.yaml]"))
            .arg(Arg::with_name("log")
                .long("log")
                .short("l")
                .global(true)
                .help("Turns on logging"))
            .arg(Arg::with_name("log-file")
                .long("log-file")
                .global(true)
                .value_name("LOG_FILE")
                .takes_value(true)
                .default_value("arbiter.log")
                .help("Sets the log file if logging is turned on"))
            .arg(Arg::with_name("log-level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .takes_value(true)
                .default_value("info")
                .help("Sets the log level if logging is turned on"))
            .subcommand(SubCommand::with_name("counts")
                .about("Counts the number of variations from a given starting position \
                        to a specified\ndepth. Defaults to the standard starting position.")
                .arg(Arg::with_name("depth")
                    .long("depth")
                    .short("d")
                    .value_name("DEPTH")
                    .takes_value(true)
                    .required(true)
                    .help("Depth to search the position"))
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .default_value("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
                    .hide_default_value(true)
                    .multiple(true)
                    .help("Position to search in Forsyth-Edwards Notation (FEN)")))
            .get_matches();

    let log_file = PathBuf::from(matches.value_of_os("log-file").expect("INFALLIBLE"));
    let log_level = match matches.value_of("log-level") {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        Some(level) => return Err(Error(format!("{}: invalid log level", level))),
        None => unreachable!(),
    };

    let _logger = if matches.is_present("log") {
        WriteLogger::init(
            log_level,
            Config::default(),
            File::create(&log_file).map_err(|err| {
                Error(format!("{}: {}", log_file.display(), err))
            })?)
    } else {
        WriteLogger::init(LevelFilter::Off, Config::default(), std::io::sink())
    };

    match matches.subcommand() {
        (_, None) => {
            let config_file = matches.value_of_os("config")
                .map(PathBuf::from)
                .unwrap_or_else(console::Config::default_path);
            let config = console::Config::load(&config_file).map_err(|err| {
                Error(format!("{}: {}", config_file.display(), err))
            })?;

            let stdin = stdin();
            let mut frontend = Console::new(stdin.lock(), stdout(), config);

            let mut game = match matches.value_of("fen") {
                Some(fen) => Some(fen.to_owned()),
                None => frontend.select_starting_position(),
            }.map_or_else(|| Ok(Game::new()), |fen| {
                Game::from_fen(&fen).map_err(|err| Error(format!("{}: {}", fen, err)))
            })?;

            console::run(&mut frontend, &mut game)?;

            if let Some(pgn_file) = matches.value_of_os("pgn") {
                write(pgn_file, game.to_pgn(&pgn_tags()))?;
            }
        },
        ("counts", Some(matches)) => {
            let depth = matches
                .value_of("depth")
                .expect("INFALLIBLE")
                .parse()
                .map_err(|_| {Error("depth must be numeric".to_owned())})?;

            println!();
            for fen in matches.values_of("fen").expect("INFALLIBLE") {
                let mut board: Board = fen.parse().map_err(|err| {Error(format!("{}: {}", fen, err))})?;
                println!("{}", fen);
                let count = variations::print(&mut board, depth);
                println!("Depth {} total:\t{:12}\n", depth, count);
            }
        },
        _ => unreachable!(),
    }

    Ok(())
}

fn pgn_tags() -> HashMap<String, String> {
    let mut pgn_tags = HashMap::new();
    pgn_tags.insert("Event".to_owned(), "Casual game".to_owned());
    if let Ok(hostname) = hostname::get() {
        if let Ok(hostname) = hostname.into_string() {
            pgn_tags.insert("Site".to_owned(), hostname);
        }
    }
    pgn_tags.insert("Date".to_owned(), Local::now().format("%Y.%m.%d").to_string());
    pgn_tags.insert("Round".to_owned(), "-".to_owned());

    pgn_tags
}

struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Error { }

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error(err.to_string())
    }
}
