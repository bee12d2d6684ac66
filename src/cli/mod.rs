//! Command-line parsing for the house price predictor.
//!
//! The prediction surface itself has no subcommands: the binary always opens
//! the interactive form. The only flags are the two file paths, which default
//! to the fixed local names the application has always used.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "homeval", version, about = "House Price Predictor (terminal)")]
pub struct Cli {
    /// Path to the serialized model artifact (JSON).
    #[arg(long, default_value = "house_price_model.json")]
    pub model: PathBuf,

    /// Path to the housing dataset CSV used by the charts screen.
    #[arg(long, default_value = "Housing.csv")]
    pub data: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_fixed_local_paths() {
        let cli = Cli::parse_from(["homeval"]);
        assert_eq!(cli.model, PathBuf::from("house_price_model.json"));
        assert_eq!(cli.data, PathBuf::from("Housing.csv"));
    }

    #[test]
    fn paths_are_overridable() {
        let cli = Cli::parse_from(["homeval", "--model", "m.json", "--data", "d.csv"]);
        assert_eq!(cli.model, PathBuf::from("m.json"));
        assert_eq!(cli.data, PathBuf::from("d.csv"));
    }
}
