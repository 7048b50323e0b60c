use std::{env::current_dir, process::ExitCode};

use log::LevelFilter;
use unjson::{
    build_cli,
    cli::{cli::Cli, filesystem::FileSystem},
};

fn main() -> ExitCode {
    let matches = build_cli().get_matches();

    let level = match matches.get_count("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    let current_directory = match current_dir() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Couldn't get current directory: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let filesystem = FileSystem::new(current_directory);
    let result = Cli::from_matches(filesystem, &matches).and_then(|cli| cli.run(&matches));

    match result {
        Ok(message) => {
            println!("{}", message);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
