// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print JSON lines"),
    ]
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .short('m')
        .value_name("MONTH")
        .help("Payment month, by name (Janeiro..Dezembro) or number (1-12)")
}

pub fn build_cli() -> Command {
    Command::new("cashlens")
        .version(crate_version!())
        .about("Personal ledger analytics: cash-flow health, budgets, installments and net worth")
        .arg(
            Arg::new("csv")
                .long("csv")
                .global(true)
                .value_name("PATH")
                .help("Read the ledger from a CSV export instead of Notion"),
        )
        .arg(
            Arg::new("refresh")
                .long("refresh")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Ignore the cached ledger and fetch again"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More logging (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("sync")
                .about("Fetch the ledger and refresh the local cache")
                .arg(
                    Arg::new("clear")
                        .long("clear")
                        .action(ArgAction::SetTrue)
                        .help("Drop every cached snapshot instead of fetching"),
                ),
        )
        .subcommand(
            Command::new("health")
                .about("Cash-flow health and savings rate for one month")
                .arg(month_arg())
                .args(json_args()),
        )
        .subcommand(
            Command::new("history")
                .about("Monthly balances and the year's income and cost composition")
                .args(json_args()),
        )
        .subcommand(
            Command::new("costs")
                .about("Cost evolution by group, drill-down and top payees")
                .arg(
                    Arg::new("group")
                        .long("group")
                        .short('g')
                        .value_name("GROUP")
                        .help("Macro-group to drill into"),
                )
                .arg(month_arg().help("Restrict the drill-down to one month"))
                .arg(
                    Arg::new("top")
                        .long("top")
                        .value_parser(value_parser!(usize))
                        .default_value("10")
                        .help("How many payees to rank"),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("projections")
                .about("Future installment costs")
                .arg(month_arg().help("Month to detail (default: current month)"))
                .args(json_args()),
        )
        .subcommand(
            Command::new("networth")
                .about("Fixed-income balance, debt payments and net worth")
                .args(json_args()),
        )
        .subcommand(
            Command::new("goals")
                .about("Investment target and spending ceilings for one month")
                .arg(month_arg())
                .args(json_args()),
        )
        .subcommand(
            Command::new("categories")
                .about("Show how categories roll up into macro-groups")
                .arg(
                    Arg::new("group")
                        .long("group")
                        .short('g')
                        .value_name("GROUP"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write the normalized ledger to a file")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["csv", "json"])
                        .default_value("csv"),
                )
                .arg(Arg::new("out").long("out").required(true).value_name("PATH")),
        )
        .subcommand(
            Command::new("config")
                .about("Goals, baselines and ledger credentials")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                )
                .subcommand(Command::new("list")),
        )
}
