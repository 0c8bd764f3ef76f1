// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn bucket_arg(required: bool) -> Arg {
    Arg::new("bucket")
        .long("bucket")
        .required(required)
        .help("needs | wants | savings | investments")
}

fn month_arg() -> Arg {
    Arg::new("month").long("month").help("YYYY-MM")
}

pub fn build_cli() -> Command {
    Command::new("savvy-saver")
        .about("Bucketed budget ledger: Needs, Wants, Savings, Investments")
        .version(clap::crate_version!())
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .help("User id (overrides the configured one)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("settings")
                .about("Monthly salary and bucket percentages")
                .subcommand(json_args(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("salary").long("salary"))
                        .arg(Arg::new("needs").long("needs"))
                        .arg(Arg::new("wants").long("wants"))
                        .arg(Arg::new("investments").long("investments")),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("credit | debit"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .arg(month_arg())
                        .arg(bucket_arg(false))
                        .arg(Arg::new("account").long("account"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("account")
                .about("Registered accounts and balances")
                .subcommand(json_args(Command::new("list").arg(bucket_arg(false)))),
        )
        .subcommand(
            Command::new("category")
                .about("Per-bucket category lists")
                .subcommand(json_args(Command::new("list").arg(bucket_arg(false))))
                .subcommand(
                    Command::new("add")
                        .arg(bucket_arg(true))
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("rename")
                        .arg(bucket_arg(true))
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(bucket_arg(true))
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true)),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(
                    Command::new("contribute")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        ),
                )
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Derived views over the ledger")
                .subcommand(json_args(
                    Command::new("summary")
                        .about("Allocated, spent and remaining per bucket")
                        .arg(month_arg()),
                ))
                .subcommand(json_args(
                    Command::new("breakdown")
                        .about("Top categories in a bucket")
                        .arg(bucket_arg(true))
                        .arg(month_arg().conflicts_with("day"))
                        .arg(Arg::new("day").long("day").help("YYYY-MM-DD"))
                        .arg(
                            Arg::new("top")
                                .long("top")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(json_args(
                    Command::new("trend")
                        .about("Monthly allocated vs spent from recorded snapshots")
                        .arg(bucket_arg(true)),
                ))
                .subcommand(json_args(
                    Command::new("networth").about("Cumulative balance by month"),
                ))
                .subcommand(json_args(
                    Command::new("calendar")
                        .about("Daily credits and debits for a month")
                        .arg(month_arg().required(true)),
                )),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv | json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for integrity issues"))
}
