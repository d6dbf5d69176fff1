//! Argument parsing

use crate::commands::Command as Action;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use pertes_model::ProductId;
use std::path::PathBuf;

/// What the process was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Invocation {
    /// Drive a hydrated session
    Session(Action),
    /// Remove the stored catalog so the next launch imports the seed again
    Reset,
}

/// Global options plus the invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Args {
    pub(crate) config: PathBuf,
    pub(crate) data_dir: Option<PathBuf>,
    pub(crate) invocation: Invocation,
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Product id as printed by `list`")
}

fn name_arg() -> Arg {
    Arg::new("name").required(true).help("Product name")
}

fn barcode_arg() -> Arg {
    Arg::new("barcode").required(true).help("Barcode text")
}

pub(crate) fn command() -> Command {
    Command::new("pertes")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Barcode catalog for recording losses")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .default_value("pertes.toml")
                .value_parser(value_parser!(PathBuf))
                .help("Configuration file; defaults apply when missing"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding the stored catalog (overrides the config file)"),
        )
        .subcommand(
            Command::new("list")
                .about("List products")
                .arg(
                    Arg::new("edit")
                        .long("edit")
                        .action(ArgAction::SetTrue)
                        .help("Edit mode: include hidden products with their visibility"),
                )
                .arg(
                    Arg::new("search")
                        .long("search")
                        .value_name("QUERY")
                        .help("Only products whose name contains QUERY"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                )
                .arg(
                    Arg::new("barcodes")
                        .long("barcodes")
                        .action(ArgAction::SetTrue)
                        .help("Draw each barcode under its row"),
                ),
        )
        .subcommand(
            Command::new("add")
                .about("Add a product")
                .arg(name_arg())
                .arg(barcode_arg()),
        )
        .subcommand(
            Command::new("edit")
                .about("Rename or recode a product")
                .arg(id_arg())
                .arg(name_arg())
                .arg(barcode_arg()),
        )
        .subcommand(
            Command::new("toggle")
                .about("Show or hide a product in browse mode")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a product after confirmation")
                .arg(id_arg())
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue)
                        .help("Do not ask for confirmation"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Draw the large barcode of a visible product")
                .arg(id_arg()),
        )
        .subcommand(Command::new("reset").about("Forget the stored catalog"))
}

fn string(args: &ArgMatches, name: &str) -> String {
    args.get_one::<String>(name).cloned().unwrap_or_default()
}

fn id(args: &ArgMatches) -> ProductId {
    ProductId::new(string(args, "id"))
}

/// Parse `matches` produced by [`command`]
pub(crate) fn parse(matches: &ArgMatches) -> Args {
    let config = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("pertes.toml"));
    let data_dir = matches.get_one::<PathBuf>("data-dir").cloned();

    let invocation = match matches.subcommand() {
        Some(("list", args)) => Invocation::Session(Action::List {
            edit: args.get_flag("edit"),
            search: args.get_one::<String>("search").cloned(),
            json: args.get_flag("json"),
            barcodes: args.get_flag("barcodes"),
        }),
        Some(("add", args)) => Invocation::Session(Action::Add {
            name: string(args, "name"),
            barcode: string(args, "barcode"),
        }),
        Some(("edit", args)) => Invocation::Session(Action::Edit {
            id: id(args),
            name: string(args, "name"),
            barcode: string(args, "barcode"),
        }),
        Some(("toggle", args)) => Invocation::Session(Action::Toggle { id: id(args) }),
        Some(("delete", args)) => Invocation::Session(Action::Delete {
            id: id(args),
            yes: args.get_flag("yes"),
        }),
        Some(("show", args)) => Invocation::Session(Action::Show { id: id(args) }),
        Some(("reset", _)) => Invocation::Reset,
        _ => Invocation::Session(Action::List {
            edit: false,
            search: None,
            json: false,
            barcodes: false,
        }),
    };

    Args {
        config,
        data_dir,
        invocation,
    }
}
