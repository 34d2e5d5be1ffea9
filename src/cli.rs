// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .help("Print as pretty JSON")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .help("Print as JSON lines")
            .action(ArgAction::SetTrue),
    )
}

pub fn build_cli() -> Command {
    Command::new("financeflow")
        .version(crate_version!())
        .about("Accounts, categorized operations, budgets with alerts, and savings goals")
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .about("Add an account")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("cash")
                                .help("cash|card|deposit|wallet|crypto"),
                        )
                        .arg(Arg::new("currency").long("currency").default_value("USD"))
                        .arg(
                            Arg::new("balance")
                                .long("balance")
                                .default_value("0")
                                .help("Opening balance"),
                        ),
                )
                .subcommand(Command::new("list").about("List accounts"))
                .subcommand(
                    Command::new("rm")
                        .about("Remove an account (operations referencing it are kept)")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .about("Add a custom category")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .help("expense|income|transfer"),
                        )
                        .arg(Arg::new("icon").long("icon").default_value("📌"))
                        .arg(
                            Arg::new("color")
                                .long("color")
                                .default_value("CCCCCC")
                                .help("Hex color, no leading '#'"),
                        ),
                )
                .subcommand(Command::new("list").about("List categories"))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category (operations referencing it are kept)")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("op")
                .about("Record and inspect operations")
                .subcommand(
                    Command::new("add")
                        .about("Record an operation and apply its balance effect")
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .help("expense|income|transfer"),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD, defaults to today"),
                        )
                        .arg(Arg::new("desc").long("desc").default_value("")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List operations, newest first")
                        .arg(Arg::new("type").long("type").help("expense|income|transfer"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .help("Case-insensitive match on description"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete an operation (its balance effect is not reversed)")
                        .arg(Arg::new("id").required(true).help("Operation id")),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Spending caps per category")
                .subcommand(
                    Command::new("set")
                        .about("Create a budget for a category")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("limit").long("limit").required(true))
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .default_value("month")
                                .help("week|month|quarter|year"),
                        )
                        .arg(
                            Arg::new("start")
                                .long("start")
                                .help("YYYY-MM-DD, defaults to today"),
                        )
                        .arg(Arg::new("currency").long("currency").default_value("USD")),
                )
                .subcommand(Command::new("list").about("List budgets"))
                .subcommand(json_flags(
                    Command::new("status").about("Spent, percentage, and alert state per budget"),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Remove the budgets of a category")
                        .arg(Arg::new("category").required(true)),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .about("Add a savings goal")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(
                            Arg::new("deadline")
                                .long("deadline")
                                .required(true)
                                .help("YYYY-MM-DD"),
                        )
                        .arg(Arg::new("account").long("account").required(true)),
                )
                .subcommand(Command::new("list").about("List goals with progress"))
                .subcommand(
                    Command::new("fund")
                        .about("Add funds to a goal (caps at the target)")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a goal")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Derived views over the ledger")
                .subcommand(json_flags(Command::new("dashboard").about(
                    "Total balance, this week's flows, and recent operations",
                )))
                .subcommand(json_flags(
                    Command::new("monthly")
                        .about("Trailing-month income/expenses and top categories"),
                ))
                .subcommand(json_flags(
                    Command::new("trend").about("Expense totals for the last 12 months"),
                )),
        )
        .subcommand(
            Command::new("settings")
                .about("App preferences and data management")
                .subcommand(
                    Command::new("lock")
                        .about("Toggle the app-lock preference")
                        .arg(Arg::new("state").required(true).help("on|off")),
                )
                .subcommand(
                    Command::new("reset")
                        .about("Delete all records and re-seed built-in categories"),
                ),
        )
}
