// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::process::ExitCode;

use anyhow::Result;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use cashlens::categories::CategoryMap;
use cashlens::commands::{self, Session};
use cashlens::{cli, db};

fn main() -> ExitCode {
    let matches = cli::build_cli().get_matches();
    let verbose = matches
        .subcommand()
        .map(|(_, sub)| sub.get_count("verbose"))
        .unwrap_or_else(|| matches.get_count("verbose"));
    init_logger(match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    });

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    let conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("config", sub)) => commands::config::handle(&conn, sub)?,
        Some(("categories", sub)) => commands::categories::handle(&CategoryMap::standard(), sub)?,
        Some((name, sub)) => {
            let session = Session::from_args(&conn, sub)?;
            match name {
                "sync" => commands::sync::handle(&session, sub)?,
                "health" => commands::health::handle(&session, sub)?,
                "history" => commands::history::handle(&session, sub)?,
                "costs" => commands::costs::handle(&session, sub)?,
                "projections" => commands::projections::handle(&session, sub)?,
                "networth" => commands::networth::handle(&session, sub)?,
                "goals" => commands::goals::handle(&session, sub)?,
                "export" => commands::exporter::handle(&session, sub)?,
                _ => print_help()?,
            }
        }
        None => print_help()?,
    }
    Ok(())
}

fn print_help() -> Result<()> {
    cli::build_cli().print_help()?;
    println!();
    Ok(())
}

/// Initializes the tracing subscriber. `RUST_LOG` wins over `-v`.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
