use crate::types::*;
use clap::{ArgAction, Parser, Subcommand};

/// Truncate Japanese encoded text to a byte length without breaking characters
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Arg {
    #[arg(short = 'e', long, value_enum, global = true)]
    /// Text encoding (detected from the content when not given)
    pub encoding: Option<TextEncoding>,
    #[arg(global = true, action = ArgAction::SetTrue, short, long)]
    /// Print backtrace on error
    pub backtrace: bool,
    #[command(subcommand)]
    /// Command
    pub command: Command,
}

#[derive(Subcommand, Debug)]
/// Commands
pub enum Command {
    /// Truncate input to at most a given number of bytes
    Truncate {
        /// Maximum output size in bytes
        #[arg(short, long)]
        length: usize,
        /// Input file ("-" for stdin)
        input: String,
        /// Output file ("-" or absent for stdout)
        output: Option<String>,
    },
    /// Detect the encoding of input
    Detect {
        /// Input file ("-" for stdin)
        input: String,
    },
}

pub fn parse_args() -> Arg {
    Arg::parse()
}
