//! Visualization utilities for rust_behavior_planning
//!
//! Plots trajectories as station `s` over timestep using gnuplot.

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};

use crate::common::{PredictedPosition, Snapshot};

/// Color palette for consistent styling
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const RED: &str = "#FF0000";
    pub const BLUE: &str = "#0000FF";
    pub const GRAY: &str = "#808080";

    // Semantic colors
    pub const EGO: &str = BLUE;
    pub const BEST: &str = "#35C788";
    pub const CANDIDATE: &str = GRAY;
    pub const OTHER_VEHICLE: &str = BLACK;
    pub const COLLISION: &str = RED;
}

/// Style for trajectory rendering
#[derive(Debug, Clone)]
pub struct PathStyle {
    pub color: String,
    pub line_width: f64,
    pub caption: String,
}

impl PathStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            line_width: 2.0,
            caption: caption.to_string(),
        }
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: colors::EGO.to_string(),
            line_width: 2.0,
            caption: "Ego".to_string(),
        }
    }
}

/// Style for point rendering
#[derive(Debug, Clone)]
pub struct PointStyle {
    pub color: String,
    pub size: f64,
    pub symbol: char,
    pub caption: String,
}

impl PointStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            size: 1.0,
            symbol: 'O',
            caption: caption.to_string(),
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }
}

/// Timestep and station series of an ego trajectory
pub fn trajectory_series(trajectory: &[Snapshot]) -> (Vec<f64>, Vec<f64>) {
    trajectory
        .iter()
        .enumerate()
        .map(|(t, snapshot)| (t as f64, f64::from(snapshot.s)))
        .unzip()
}

/// Timestep and station series of another vehicle's predictions
pub fn prediction_series(predictions: &[PredictedPosition]) -> (Vec<f64>, Vec<f64>) {
    predictions
        .iter()
        .enumerate()
        .map(|(t, position)| (t as f64, f64::from(position.s)))
        .unzip()
}

/// One plotted data series, drawn when the figure is saved
#[derive(Debug, Clone)]
pub enum PlotSeries {
    Trajectory { t: Vec<f64>, s: Vec<f64>, style: PathStyle },
    Prediction { t: Vec<f64>, s: Vec<f64>, style: PointStyle },
    Collision { t: f64, s: f64 },
}

/// Main visualizer struct
///
/// Series are collected first and drawn onto a single set of axes in
/// [`Visualizer::save_svg`], so all of them share one scale.
pub struct Visualizer {
    series: Vec<PlotSeries>,
    title: String,
    x_label: String,
    y_label: String,
    x_range: Option<(f64, f64)>,
}

impl Visualizer {
    /// Create a new visualizer
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            title: String::new(),
            x_label: "timestep".to_string(),
            y_label: "s".to_string(),
            x_range: None,
        }
    }

    /// Set the plot title
    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    /// Set X axis range
    pub fn set_x_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.x_range = Some((min, max));
        self
    }

    pub fn series(&self) -> &[PlotSeries] {
        &self.series
    }

    /// Plot an ego trajectory
    pub fn plot_trajectory(&mut self, trajectory: &[Snapshot], style: &PathStyle) -> &mut Self {
        let (t, s) = trajectory_series(trajectory);
        self.series.push(PlotSeries::Trajectory { t, s, style: style.clone() });
        self
    }

    /// Plot the predictions of another vehicle
    pub fn plot_prediction(&mut self, predictions: &[PredictedPosition], style: &PointStyle) -> &mut Self {
        let (t, s) = prediction_series(predictions);
        self.series.push(PlotSeries::Prediction { t, s, style: style.clone() });
        self
    }

    /// Mark a collision at `timestep` and station `s`
    pub fn plot_collision(&mut self, timestep: usize, s: i32) -> &mut Self {
        self.series.push(PlotSeries::Collision {
            t: timestep as f64,
            s: f64::from(s),
        });
        self
    }

    /// Draw every series onto one set of axes
    fn build_figure(&self) -> Figure {
        let mut figure = Figure::new();
        let axes = figure.axes2d();

        if !self.title.is_empty() {
            axes.set_title(&self.title, &[]);
        }
        axes.set_x_label(&self.x_label, &[]);
        axes.set_y_label(&self.y_label, &[]);

        if let Some((min, max)) = self.x_range {
            axes.set_x_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }

        for series in &self.series {
            match series {
                PlotSeries::Trajectory { t, s, style } => {
                    axes.lines(t, s, &[
                        Caption(&style.caption),
                        Color(&style.color),
                        LineWidth(style.line_width),
                    ]);
                }
                PlotSeries::Prediction { t, s, style } => {
                    axes.lines(t, s, &[
                        Color(&style.color),
                        LineWidth(1.0),
                    ])
                    .points(t, s, &[
                        Caption(&style.caption),
                        Color(&style.color),
                        PointSymbol(style.symbol),
                        PointSize(style.size),
                    ]);
                }
                PlotSeries::Collision { t, s } => {
                    axes.points(&[*t], &[*s], &[
                        Caption("Collision"),
                        Color(colors::COLLISION),
                        PointSymbol('X'),
                        PointSize(2.5),
                    ]);
                }
            }
        }

        figure
    }

    /// Save plot to SVG file
    pub fn save_svg(&self, path: &str) -> Result<(), String> {
        self.build_figure()
            .save_to_svg(path, 800, 600)
            .map_err(|e| e.to_string())
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}
