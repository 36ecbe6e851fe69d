// File: crates/popularity-core/src/lib.rs
// Summary: Core library entry point; approval-poll scatter and prediction line charts.

pub mod annotation;
pub mod chart;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod index;
pub mod interaction;
pub mod loader;
pub mod logging;
pub mod record;
pub mod render;
pub mod scale;
pub mod scene;
pub mod style;
pub mod svg;
pub mod text;
pub mod types;

pub use chart::{ChartLayout, LineChart, RenderOptions, ScatterChart};
pub use error::{LoadError, ParseError};
pub use geometry::Point;
pub use index::PointIndex;
pub use interaction::{HoverState, PointerEvent, PointerTracker, SensingRegion};
pub use loader::FeedSource;
pub use record::{HdiBand, HdiLevel, Interval, OuterHdi, PollRecord, PredictionRecord};
pub use render::ChartRender;
pub use style::{MarkerStyle, Theme};
pub use svg::ChartSvg;
