// File: crates/popularity-demo/src/config.rs
// Summary: Dashboard configuration file (TOML) merged with CLI overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use popularity_core::loader::{POLLS_URL, PREDICTIONS_URL};
use popularity_core::style;
use popularity_core::types::{HEIGHT, WIDTH};
use popularity_core::{ChartLayout, FeedSource, Theme};
use serde::Deserialize;

use crate::cli::Args;

/// Everything the demo needs besides the replayed pointer events.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub polls: String,
    pub predictions: String,
    pub out_dir: PathBuf,
    pub width: i32,
    pub height: i32,
    pub theme: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            polls: POLLS_URL.to_string(),
            predictions: PREDICTIONS_URL.to_string(),
            out_dir: PathBuf::from("target/out"),
            width: WIDTH,
            height: HEIGHT,
            theme: "light".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// File values (or defaults), then CLI flags on top.
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut cfg = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        cfg.apply(args);
        Ok(cfg)
    }

    pub fn apply(&mut self, args: &Args) {
        if let Some(v) = &args.polls { self.polls = v.clone(); }
        if let Some(v) = &args.predictions { self.predictions = v.clone(); }
        if let Some(v) = &args.out_dir { self.out_dir = v.clone(); }
        if let Some(v) = args.width { self.width = v; }
        if let Some(v) = args.height { self.height = v; }
        if let Some(v) = &args.theme { self.theme = v.clone(); }
    }

    pub fn polls_source(&self) -> FeedSource { FeedSource::parse(&self.polls) }

    pub fn predictions_source(&self) -> FeedSource { FeedSource::parse(&self.predictions) }

    pub fn layout(&self) -> ChartLayout {
        ChartLayout { width: self.width, height: self.height, ..ChartLayout::default() }
    }

    pub fn theme(&self) -> Theme { style::find(&self.theme) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_point_at_published_feeds() {
        let cfg = DashboardConfig::default();
        assert!(matches!(cfg.polls_source(), FeedSource::Url(_)));
        assert_eq!(cfg.layout(), ChartLayout::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: DashboardConfig = toml::from_str(
            r#"
            polls = "data/polls.csv"
            width = 1200
            "#,
        )
        .expect("valid toml");
        assert_eq!(cfg.polls_source(), FeedSource::Path("data/polls.csv".into()));
        assert_eq!(cfg.width, 1200);
        assert_eq!(cfg.height, HEIGHT);
        assert_eq!(cfg.predictions, PREDICTIONS_URL);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<DashboardConfig>("colour = \"red\"").is_err());
    }

    #[test]
    fn cli_overrides_file_values() {
        let mut cfg = DashboardConfig { width: 1200, theme: "dark".into(), ..Default::default() };
        let args = Args::parse_from(["popularity-demo", "--width", "640", "--predictions", "p.csv"]);
        cfg.apply(&args);
        assert_eq!(cfg.width, 640);
        assert_eq!(cfg.theme().name, "dark");
        assert_eq!(cfg.predictions_source(), FeedSource::Path("p.csv".into()));
    }
}
