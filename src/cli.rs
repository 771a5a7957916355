//! Command-line interface definition.

use clap::{ArgAction, Parser};

#[derive(Debug, Parser)]
#[command(name = "eventcard")]
#[command(version, about = "Show where I'll be: talks, meetups, booths", long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Print the events as JSON instead of a card
    #[arg(long, short)]
    pub json: bool,

    /// Include events that already happened
    #[arg(long, short = 'h')]
    pub historical: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}
