mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "dgramlink",
    version,
    about = "Point-to-point datagram channel roles"
)]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    match cmd::run(cli.command, format) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lead_subcommand() {
        let cli = Cli::try_parse_from([
            "dgramlink",
            "lead",
            "--name",
            "bench-leader",
            "--peer",
            "bench-follower",
        ])
        .expect("lead args should parse");

        assert!(matches!(cli.command, Command::Lead(_)));
    }

    #[test]
    fn parses_follow_with_repeated_payload_sizes() {
        let cli = Cli::try_parse_from([
            "dgramlink",
            "follow",
            "--name",
            "bench-follower",
            "--peer",
            "bench-leader",
            "--payload-size",
            "1024",
            "--payload-size",
            "16384",
            "--count",
            "3",
        ])
        .expect("follow args should parse");

        match cli.command {
            Command::Follow(args) => {
                assert_eq!(args.payload_sizes, vec![1024, 16384]);
                assert_eq!(args.count, 3);
            }
            other => panic!("expected follow, got {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_peer_name() {
        let err = Cli::try_parse_from(["dgramlink", "lead", "--name", "solo"])
            .expect_err("missing --peer should fail");
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }
}
