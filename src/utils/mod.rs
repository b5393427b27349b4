//! Utility modules for rust_behavior_planning

pub mod visualization;

pub use visualization::{Visualizer, PathStyle, PointStyle, PlotSeries, colors};
