// File: crates/popularity-demo/src/cli.rs
// Summary: Command-line arguments; every flag overrides the matching config file value.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

/// Render the approval scatter and prediction line to PNG and SVG.
#[derive(Parser, Debug)]
#[command(name = "popularity-demo")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// TOML file with feed sources, surface size and output directory
    #[arg(long, short, value_name = "PATH", env = "POPULARITY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Polls feed: URL or local CSV path
    #[arg(long, value_name = "URL|PATH")]
    pub polls: Option<String>,

    /// Predictions feed: URL or local CSV path
    #[arg(long, value_name = "URL|PATH")]
    pub predictions: Option<String>,

    /// Directory the images are written to
    #[arg(long, short, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    #[arg(long)]
    pub width: Option<i32>,

    #[arg(long)]
    pub height: Option<i32>,

    /// Hover the line chart at this date before rendering (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub hover: Option<NaiveDate>,

    /// Click a marker of this pollster in the scatter before rendering
    #[arg(long, value_name = "POLLSTER")]
    pub select: Option<String>,

    /// Let the pointer leave both charts after the replayed events
    #[arg(long)]
    pub leave: bool,

    /// Colour theme: light or dark
    #[arg(long)]
    pub theme: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_leaves_everything_to_config() {
        let args = Args::parse_from(["popularity-demo"]);
        assert!(args.polls.is_none());
        assert!(args.hover.is_none());
        assert!(!args.leave);
    }

    #[test]
    fn hover_parses_as_date() {
        let args = Args::parse_from(["popularity-demo", "--hover", "2021-06-15", "--select", "IFOP"]);
        assert_eq!(args.hover, NaiveDate::from_ymd_opt(2021, 6, 15));
        assert_eq!(args.select.as_deref(), Some("IFOP"));
    }

    #[test]
    fn bad_hover_date_is_rejected() {
        assert!(Args::try_parse_from(["popularity-demo", "--hover", "June"]).is_err());
    }
}
