//! CLI module for the perception gateway
//!
//! - `serve`: run the HTTP server
//! - `algorithms`: list every capability and the algorithms it accepts

pub mod algorithms;
pub mod serve;

use clap::{Parser, Subcommand};

/// Perception Gateway - HTTP front-end for pluggable perception engines
#[derive(Parser)]
#[command(name = "perception-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Print the accepted algorithm names per capability
    Algorithms(algorithms::AlgorithmsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["perception-gateway", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_parse_algorithms_json() {
        let cli = Cli::try_parse_from(["perception-gateway", "algorithms", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Algorithms(args) if args.json));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["perception-gateway"]).is_err());
    }
}
