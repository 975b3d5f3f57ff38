//! Command-line argument definitions for the orgchart CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, which nodes are expanded before export, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the orgchart tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input JSON hierarchy
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Toggle a node before export; may be repeated and runs in order
    #[arg(short = 'x', long = "expand", value_name = "ID")]
    pub expand: Vec<String>,

    /// Mark a node as the current person
    #[arg(long, value_name = "ID")]
    pub current: Option<String>,

    /// Collapse everything below the root's direct reports first
    #[arg(long, conflicts_with = "expand_all")]
    pub collapse_all: bool,

    /// Expand every node first
    #[arg(long)]
    pub expand_all: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Arguments rendering `input` to `output` with nothing toggled.
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            config: None,
            expand: Vec::new(),
            current: None,
            collapse_all: false,
            expand_all: false,
            log_level: String::from("off"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeated_expand() {
        let args = Args::parse_from([
            "orgchart", "team.json", "-o", "team.svg", "-x", "100", "--expand", "36", "--current",
            "36",
        ]);
        assert_eq!(args.input, "team.json");
        assert_eq!(args.output, "team.svg");
        assert_eq!(args.expand, ["100", "36"]);
        assert_eq!(args.current.as_deref(), Some("36"));
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_collapse_and_expand_all_conflict() {
        let result = Args::try_parse_from(["orgchart", "team.json", "--collapse-all", "--expand-all"]);
        assert!(result.is_err());
    }
}
