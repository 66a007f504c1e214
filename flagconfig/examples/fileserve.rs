//! A pretend file server whose unset flags are filled from a config file.
//!
//! Try it with a config file:
//!
//! ```text
//! printf 'host=files.example.com\n' > fileserve.conf
//! cargo run --example fileserve -- --port 9090 -c fileserve.conf
//! ```
//!
//! The explicit `--port` wins; `host` comes from the file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Arg, Command, value_parser};
use flagconfig::bridge::flag_set_from_matches;
use flagconfig::load_with_override;

fn cli() -> Command {
    Command::new("fileserve")
        .about("Serve files over HTTP (demo)")
        .arg(
            Arg::new("host")
                .long("host")
                .default_value("localhost")
                .help("Host to bind"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .default_value("8080")
                .help("Port to listen on"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Config file to read flags from"),
        )
}

fn main() -> ExitCode {
    let command = cli();
    let matches = command.clone().get_matches();
    let override_path = matches.get_one::<PathBuf>("config").cloned();

    let mut flags = match flag_set_from_matches(&command, &matches) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("fileserve: {err}");
            return ExitCode::FAILURE;
        }
    };

    match load_with_override(&mut flags, override_path.as_deref()) {
        Ok(Some(path)) => println!("loaded config from {}", path.display()),
        Ok(None) => println!("no config file found; using command-line values"),
        Err(err) => {
            // Misconfiguration is fatal for startup: report and exit non-zero.
            eprintln!("fileserve: {err}");
            return ExitCode::FAILURE;
        }
    }

    print!("{}", flags.usage());
    println!(
        "would serve on {}:{}",
        flags.value("host").unwrap_or_default(),
        flags.value("port").unwrap_or_default()
    );
    ExitCode::SUCCESS
}
