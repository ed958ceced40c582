use std::io;
use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use colored::Colorize;

pub mod analysis;
pub mod api;
pub mod audio;
pub mod command_handlers;
pub mod config;
pub mod error;
pub mod fft;
pub mod models;
pub mod utils;
pub mod wav;

use config::Config;

fn file_arg() -> Arg {
    Arg::new("path")
        .required(true)
        .help("Path to a WAV file")
}

fn pretty_arg() -> Arg {
    Arg::new("pretty")
        .long("pretty")
        .action(ArgAction::SetTrue)
        .help("Pretty-print the JSON output")
}

fn steps_arg() -> Arg {
    Arg::new("steps")
        .short('s')
        .long("steps")
        .value_parser(value_parser!(usize))
        .help("Number of leading values traced for the step view")
}

fn cli() -> Command {
    Command::new("wavefft")
        .about("Fast Fourier Transform analysis of WAV audio")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("analyze")
                .about("Transform a WAV file and print spectrum, phase and steps as JSON")
                .arg(file_arg())
                .arg(
                    Arg::new("window")
                        .short('w')
                        .long("window")
                        .value_parser(value_parser!(usize))
                        .help("Number of samples kept after downsampling"),
                )
                .arg(steps_arg())
                .arg(
                    Arg::new("planned")
                        .long("planned")
                        .action(ArgAction::SetTrue)
                        .help("Use the planned iterative transform"),
                )
                .arg(pretty_arg()),
        )
        .subcommand(
            Command::new("steps")
                .about("Print the even/odd decomposition steps as JSON")
                .arg(file_arg())
                .arg(steps_arg())
                .arg(pretty_arg()),
        )
        .subcommand(
            Command::new("stats")
                .about("Print sample statistics as JSON")
                .arg(file_arg())
                .arg(pretty_arg()),
        )
        .subcommand(
            Command::new("api-server")
                .about("Serve analysis results over HTTP")
                .arg(Arg::new("host").help("Address to bind"))
                .arg(
                    Arg::new("port")
                        .value_parser(value_parser!(u16))
                        .help("Port to bind"),
                ),
        )
}

fn path_of(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or_default()
}

fn run(matches: ArgMatches) -> anyhow::Result<()> {
    let config = Config::from_env();
    let mut out = io::stdout().lock();

    match matches.subcommand() {
        Some(("analyze", sub)) => {
            let config = config
                .with_window_size(sub.get_one::<usize>("window").copied())
                .with_steps_window(sub.get_one::<usize>("steps").copied())
                .with_planned(sub.get_flag("planned"));
            command_handlers::analyze(&mut out, path_of(sub), &config, sub.get_flag("pretty"))
        }
        Some(("steps", sub)) => {
            let config = config.with_steps_window(sub.get_one::<usize>("steps").copied());
            command_handlers::steps(&mut out, path_of(sub), &config, sub.get_flag("pretty"))
        }
        Some(("stats", sub)) => command_handlers::stats(&mut out, path_of(sub), sub.get_flag("pretty")),
        Some(("api-server", sub)) => {
            let mut config = config;
            if let Some(host) = sub.get_one::<String>("host") {
                config.host = host.clone();
            }
            if let Some(&port) = sub.get_one::<u16>("port") {
                config.port = port;
            }

            drop(out);
            println!("Starting API server on http://{}:{}", config.host, config.port);
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(api::start_server(config))?;
            Ok(())
        }
        _ => unreachable!("subcommand_required is set"),
    }
}

fn main() {
    let matches = cli().get_matches();
    if let Err(e) = run(matches) {
        eprintln!("{}", format!("Error: {:#}", e).yellow());
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn test_parses_analyze_flags() {
        let matches = cli()
            .try_get_matches_from(["wavefft", "analyze", "tone.wav", "--window", "1024", "-s", "8", "--planned", "--pretty"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "analyze");
        assert_eq!(path_of(sub), "tone.wav");
        assert_eq!(sub.get_one::<usize>("window"), Some(&1024));
        assert_eq!(sub.get_one::<usize>("steps"), Some(&8));
        assert!(sub.get_flag("pretty"));
        assert!(sub.get_flag("planned"));
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(cli().try_get_matches_from(["wavefft", "api-server", "0.0.0.0", "http"]).is_err());
    }
}
