// ============================================================
// File: main.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Final Project
// Date: Dec. 3, 2025
//
// Description:
//   Entry point for the table index shell. Builds a session
//   whose B+Tree and hash index are sized from the
//   TABLEINDEX_* environment variables, then hands off to
//   the command loop in lib.rs.
//
//   Diagnostics go to stderr through `tracing`; set RUST_LOG
//   (e.g. RUST_LOG=tableindex=debug) to watch splits happen.
//   Stdout carries only command responses so the shell can
//   be driven by automated black-box tests.
// ============================================================
use std::process::ExitCode;

use tableindex::{IndexConfig, Session, repl_loop};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;


/// Entry point for the table index shell.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let session = IndexConfig::from_env().and_then(Session::with_config);
    let mut session = match session {
        Ok(session) => session,
        Err(e) => {
            error!("cannot start: {}", e);
            eprintln!("ERR: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        fanout = session.config.fanout,
        slots = session.config.slots,
        directory = session.hash.directory_len(),
        "table index session ready"
    );

    // Hand off to the main command loop
    if let Err(e) = repl_loop(&mut session) {
        error!("shell i/o failed: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
