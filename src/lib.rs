pub mod cli;
pub mod config;
pub mod constants;
pub mod json;
pub mod parsing;
pub mod symbol;

mod custom_serde;

use clap::{Arg, ArgAction, Command};

pub use json::{
    parser::{parse, JsonError, JsonParser},
    value::{Map, Number, Value},
};

#[cfg(test)]
#[ctor::ctor]
fn initialize_logger() {
    env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Off)
        // .filter_level(log::LevelFilter::Debug)
        // .filter_level(log::LevelFilter::Trace)
        .init();
}

fn input_arg() -> Arg {
    Arg::new("input")
        .required(true)
        .help("Path of the JSON document to read, or '-' for stdin.")
}

fn pretty_arg() -> Arg {
    Arg::new("pretty")
        .long("pretty")
        .short('p')
        .action(ArgAction::SetTrue)
        .help("Indent the output.")
}

pub fn build_cli() -> Command {
    Command::new("unjson")
        .version("0.1")
        .about("Decodes JSON documents with a top-down operator precedence parser")
        .propagate_version(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file with parser settings (error_context_length, decode_escapes, require_object_root, allow_trailing_input, max_depth)."),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log output. Repeat for more detail."),
        )
        .subcommand(
            Command::new("decode")
                .about("Decodes a JSON document and prints it back as JSON.")
                .arg(input_arg())
                .arg(pretty_arg()),
        )
        .subcommand(
            Command::new("tree")
                .about("Prints the parse tree of a JSON document as an s-expression.")
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("tokens")
                .about("Prints the tokens of a JSON document, one per line.")
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("sample")
                .about("Decodes a built-in sample document.")
                .arg(pretty_arg()),
        )
}
