mod follow;
mod lead;

use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Wait to be contacted, then receive messages until a stop arrives.
    Lead(RoleArgs),
    /// Contact the leader, then send sized messages and a final stop.
    Follow(FollowArgs),
}

#[derive(Args, Debug)]
pub struct RoleArgs {
    /// This process's receive endpoint name.
    #[arg(long)]
    pub name: String,

    /// The peer's receive endpoint name.
    #[arg(long)]
    pub peer: String,
}

#[derive(Args, Debug)]
pub struct FollowArgs {
    #[command(flatten)]
    pub role: RoleArgs,

    /// Logical message size(s) to send, in bytes. Repeatable.
    #[arg(long = "payload-size", value_name = "BYTES", default_values_t = [4096u32])]
    pub payload_sizes: Vec<u32>,

    /// Messages to send per payload size.
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub count: u32,
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Lead(args) => lead::run(args, format),
        Command::Follow(args) => follow::run(args, format),
    }
}
