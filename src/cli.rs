// Copyright (c) FinTrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

use crate::db::THEMES;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .version(crate_version!())
        .about("Local-first personal finance tracking with spreadsheet cloud sync")
        .subcommand(Command::new("init").about("Initialize the local cache"))
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction (optimistic local write, then cloud push)")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"])
                                .default_value("expense"),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .help("Category id or name"),
                        )
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, most recent first")
                        .arg(Arg::new("month").long("month").help("Restrict to YYYY-MM"))
                        .arg(Arg::new("category").long("category").help("Category id or name"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction locally (the cloud copy is untouched)")
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories (local only, never synced)")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("icon").long("icon"))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(Command::new("list"))
                .subcommand(
                    Command::new("rm").arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Derived views over the transaction list")
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Balance plus current-month income and expenses")
                        .arg(Arg::new("month").long("month").help("Reference month YYYY-MM")),
                )),
        )
        .subcommand(
            Command::new("sync")
                .about("Cloud synchronization")
                .subcommand(Command::new("pull").about("Fetch the cloud snapshot and merge it"))
                .subcommand(Command::new("push").about("Re-push records still pending"))
                .subcommand(Command::new("status").about("Endpoint, cached and pending counts")),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv or json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Preferences and maintenance")
                .subcommand(
                    Command::new("theme").arg(
                        Arg::new("value")
                            .value_parser(THEMES)
                            .help("Show the theme when omitted"),
                    ),
                )
                .subcommand(
                    Command::new("endpoint")
                        .arg(Arg::new("url").help("Show the endpoint when omitted")),
                )
                .subcommand(
                    Command::new("clear")
                        .about("Reset local data; the cloud store is untouched")
                        .arg(
                            Arg::new("yes")
                                .long("yes")
                                .short('y')
                                .action(ArgAction::SetTrue),
                        ),
                ),
        )
        .subcommand(Command::new("doctor").about("Check the local data for inconsistencies"))
}
