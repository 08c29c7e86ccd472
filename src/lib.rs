//! # tableindex
//! B+Tree and Extendable Hashing indexes for a simple relational table
//! engine.
//!
//! ## Features
//! - [`OrderedIndex`]: B+Tree map with point lookup, ordered traversal,
//!   first/last key and half-open range extraction.
//! - [`HashIndex`]: Extendable Hashing map with a power-of-two directory,
//!   bucket splitting and directory doubling.
//! - [`KeyIndex`]: the uniform contract a table engine drives both with.
//! - A small line-oriented shell (`tableindex` binary) over a [`Session`]
//!   that indexes one `String` key column both ways.
//!
//! ## Usage
//! The indexes are plain library types. The shell logic lives here too
//! so it can be tested with `cargo test`.
// =====================================================================
// File: lib.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Final Project
// Date: Dec. 3, 2025
//
//   The shell accepts the following commands (case-insensitive):
//
//     `PUT <key> <value>`        -> Insert into every index: OK, or ERR on duplicate
//     `GET <key> [TREE|HASH]`    -> Value from the chosen index (default TREE) or NULL
//     `FIRST` / `LAST`           -> Smallest / largest key, ERR when empty
//     `RANGE <from> <to>`        -> Entries with from <= key < to, one `key value`
//                                   per line then END. `*` is an open bound.
//     `SCAN [TREE|HASH]`         -> Every entry, one per line then END
//     `SIZE`                     -> Tree key count and hash slot capacity
//     `STATS`                    -> Shape and access counters of both indexes
//     `DUMP [TREE|HASH]`         -> Structural dump of an index
//     `EXIT` / `QUIT`            -> Terminate the program
// =====================================================================
pub mod config;
pub use config::{DEFAULT_DIRECTORY, IndexConfig};

pub mod error;
pub use error::{IndexError, Result};

pub mod index;
pub use index::{DEFAULT_FANOUT, Iter, KeyIndex, MIN_FANOUT, Node, OrderedIndex, Range};

pub mod hash;
pub use hash::{Bucket, DEFAULT_SLOTS, HashIndex, MAX_GLOBAL_DEPTH};

pub mod session;
pub use session::{IndexKind, Session};

use std::io::{self, BufRead, Write};
use std::ops::Bound;

/// Result of handling a single user command.
///
/// - `Continue` means the REPL should keep running.
/// - `Exit` means the REPL should break out and terminate.
pub enum CommandResult {
    Continue,
    Exit,
}

const PROPER_SYNTAX: &str =
    "Syntax Usage: PUT <key> <value>, GET <key> [TREE|HASH], FIRST, LAST, RANGE <from> <to>, SCAN, SIZE, STATS, DUMP, EXIT";


/// Read–Evaluate–Print Loop (REPL) over standard input and output.
///
/// # Example
/// ```no_run
/// use tableindex::{Session, repl_loop};
///
/// let mut session = Session::new();
/// repl_loop(&mut session).unwrap(); // <- waits for user input interactively
/// ```
pub fn repl_loop(session: &mut Session) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_repl(stdin.lock(), &mut stdout.lock(), session)
}


/// Runs commands from `input` against `session`, writing responses to
/// `output`, until `EXIT` or end of input.
///
/// # Example
/// ```
/// use tableindex::{Session, run_repl};
///
/// let mut session = Session::new();
/// let mut out = Vec::new();
/// run_repl("PUT dog bark\nGET dog\nEXIT\n".as_bytes(), &mut out, &mut session).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "OK\nbark\nExiting...\n");
/// ```
pub fn run_repl<R: BufRead, W: Write>(input: R, output: &mut W, session: &mut Session) -> io::Result<()> {
    for input_line in input.lines() {
        let full_command = input_line?;
        let (cmd, args) = parse_command(&full_command);

        match handle_command(&cmd, &args, session, output)? {
            CommandResult::Exit => break,
            CommandResult::Continue => (),
        }
        output.flush()?;
    }
    Ok(())
}


/// Parses a raw input line into a command and its arguments.
///
/// The first token is treated as the command (normalized to uppercase),
/// and the remaining tokens are collected as arguments. Leading and
/// trailing whitespace is ignored.
fn parse_command(line: &str) -> (String, Vec<String>) {
    let mut command_segments = line.split_whitespace();
    let cmd = command_segments.next().unwrap_or("").to_uppercase();
    let args: Vec<String> = command_segments.map(|s| s.to_string()).collect();
    (cmd, args)
}


/// Reads the optional `[TREE|HASH]` argument at `pos`.
fn index_kind_arg(args: &[String], pos: usize) -> std::result::Result<IndexKind, String> {
    match args.get(pos) {
        None => Ok(IndexKind::Tree),
        Some(raw) => IndexKind::parse(raw).ok_or_else(|| format!("unknown index '{}'", raw)),
    }
}


/// `*` is an open bound.
fn range_bound(raw: &str, make: fn(String) -> Bound<String>) -> Bound<String> {
    if raw == "*" {
        Bound::Unbounded
    } else {
        make(raw.to_string())
    }
}


/// Handles a single user command and returns whether the REPL should
/// continue or exit. Unsupported input prints an error and the syntax.
fn handle_command<W: Write>(
    cmd: &str,
    args: &[String],
    session: &mut Session,
    out: &mut W,
) -> io::Result<CommandResult> {
    match cmd {

        // Put command format:  PUT <key> <value>
        "PUT" => {
            if args.len() == 2 {
                match session.put(args[0].clone(), args[1].clone()) {
                    Ok(()) => writeln!(out, "OK")?,
                    Err(IndexError::DuplicateKey) => {
                        writeln!(out, "ERR: duplicate key '{}'", args[0])?
                    }
                    Err(e) => writeln!(out, "ERR: {}", e)?,
                }
            } else {
                writeln!(out, "ERR: PUT requires a key and value")?;
            }
        }

        // Get command format:  GET <key> [TREE|HASH]
        "GET" => match (args.first(), index_kind_arg(args, 1)) {
            (None, _) => writeln!(out, "ERR: GET requires a key")?,
            (Some(_), Err(msg)) => writeln!(out, "ERR: {}", msg)?,
            (Some(key), Ok(kind)) => match session.get(key, kind) {
                Some(value) => writeln!(out, "{}", value)?,
                None => writeln!(out, "NULL")?,
            },
        },

        "FIRST" | "LAST" => {
            let key = if cmd == "FIRST" {
                session.tree.first_key()
            } else {
                session.tree.last_key()
            };
            match key {
                Ok(key) => writeln!(out, "{}", key)?,
                Err(e) => writeln!(out, "ERR: {}", e)?,
            }
        }

        // Range command format:  RANGE <from|*> <to|*>
        "RANGE" => {
            if args.len() == 2 {
                let from = range_bound(&args[0], Bound::Included);
                let to = range_bound(&args[1], Bound::Excluded);
                for (key, value) in session.tree.range_iter((from, to)) {
                    writeln!(out, "{} {}", key, value)?;
                }
                writeln!(out, "END")?;
            } else {
                writeln!(out, "ERR: RANGE requires a start and end")?;
            }
        }

        "SCAN" => match index_kind_arg(args, 0) {
            Ok(IndexKind::Tree) => {
                for (key, value) in session.tree.iter() {
                    writeln!(out, "{} {}", key, value)?;
                }
                writeln!(out, "END")?;
            }
            Ok(IndexKind::Hash) => {
                for (key, value) in session.hash.iter() {
                    writeln!(out, "{} {}", key, value)?;
                }
                writeln!(out, "END")?;
            }
            Err(msg) => writeln!(out, "ERR: {}", msg)?,
        },

        "SIZE" => {
            writeln!(out, "tree {}", session.tree.len())?;
            writeln!(out, "hash {}", session.hash.size())?;
        }

        "STATS" => {
            let tree = &session.tree;
            writeln!(
                out,
                "tree len={} height={} nodes={} fanout={} visits={}",
                tree.len(),
                tree.height(),
                tree.node_count(),
                tree.fanout(),
                tree.node_visits()
            )?;
            let hash = &session.hash;
            writeln!(
                out,
                "hash len={} buckets={} global_depth={} slots={} splits={} accesses={}",
                hash.len(),
                hash.bucket_count(),
                hash.global_depth(),
                hash.slots(),
                hash.splits(),
                hash.bucket_accesses()
            )?;
        }

        "DUMP" => match index_kind_arg(args, 0) {
            Ok(IndexKind::Tree) => write!(out, "{}", session.tree)?,
            Ok(IndexKind::Hash) => writeln!(out, "{}", session.hash)?,
            Err(msg) => writeln!(out, "ERR: {}", msg)?,
        },

        // Exit command
        "EXIT" | "QUIT" => {
            writeln!(out, "Exiting...")?;
            return Ok(CommandResult::Exit);
        }

        // Empty input
        "" => writeln!(out, "Enter a command.")?,

        // Everything else will be noted and returned as an error
        _ => {
            writeln!(out, "ERR: command '{}' not handled", cmd)?;
            writeln!(out, "{}", PROPER_SYNTAX)?;
        }
    }
    Ok(CommandResult::Continue)
}



// =================================================================
// lib.rs Unit tests
// =================================================================
