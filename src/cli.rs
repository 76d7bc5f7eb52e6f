use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::domain::Gender;

#[derive(Parser, Debug)]
#[command(author, version, about = "Grand Slam tipping pool backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum GenderArg {
    Men,
    Women,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Men => Gender::Men,
            GenderArg::Women => Gender::Women,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Create the database schema
    Init {
        /// Drop all tables first
        #[arg(long)]
        reset: bool,
    },
    /// Import a player roster from a CSV file (name,ranking)
    Import {
        #[arg(short, long)]
        file: PathBuf,
        #[arg(short, long, value_enum)]
        gender: GenderArg,
        /// Replace the roster instead of merging by name
        #[arg(long)]
        replace: bool,
    },
    /// Print the leaderboard of a tournament
    Leaderboard {
        /// Tournament id (defaults to the active tournament)
        #[arg(short, long)]
        tournament: Option<String>,
        /// Also count players still in the draw
        #[arg(short, long)]
        remaining: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
