//! Comparative line charts (SVG)
//!
//! A [`Chart`] lines up named `(mean, std)` series from several
//! implementations against one shared x-domain. The plotter does not repair
//! data: a series whose length differs from the x-domain is rejected before
//! anything is drawn.

use std::path::Path;

use plotters::coord::Shift;
use plotters::element::ErrorBarOrientV;
use plotters::prelude::*;

use crate::{Error, Result};

const PALETTE: [RGBColor; 6] = [BLUE, RED, GREEN, MAGENTA, CYAN, BLACK];

/// A named `(mean, std)` series.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    mean: Vec<f64>,
    std_dev: Vec<f64>,
}

impl Series {
    /// Create a series. Lengths are checked when the chart is validated.
    #[must_use]
    pub fn new(name: impl Into<String>, mean: Vec<f64>, std_dev: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            mean,
            std_dev,
        }
    }

    /// Get the series name (legend entry).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the means.
    #[must_use]
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Get the standard deviations.
    #[must_use]
    pub fn std_dev(&self) -> &[f64] {
        &self.std_dev
    }

    fn upper_bound(&self) -> f64 {
        self.mean
            .iter()
            .zip(&self.std_dev)
            .map(|(m, s)| m + s)
            .fold(0.0, f64::max)
    }
}

/// X-axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XScale {
    /// Values plotted as given
    #[default]
    Linear,
    /// Values plotted at `log2(x)`, ticks labelled `2^k`
    Log2,
}

impl XScale {
    fn project(self, x: f64) -> f64 {
        match self {
            Self::Linear => x,
            Self::Log2 => x.log2(),
        }
    }

    fn tick_label(self, v: f64) -> String {
        let integral = (v - v.round()).abs() < 1e-9;
        match (self, integral) {
            (Self::Linear, true) => format!("{v:.0}"),
            (Self::Linear, false) => format!("{v:.2}"),
            (Self::Log2, true) => format!("2^{v:.0}"),
            (Self::Log2, false) => format!("2^{v:.1}"),
        }
    }
}

/// One y-axis and the series drawn against it.
#[derive(Debug, Clone, PartialEq)]
pub struct YAxis {
    label: String,
    series: Vec<Series>,
}

impl YAxis {
    /// Axis with a label and its series.
    #[must_use]
    pub fn new(label: impl Into<String>, series: Vec<Series>) -> Self {
        Self {
            label: label.into(),
            series,
        }
    }

    /// Get the series on this axis.
    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    fn upper_bound(&self) -> f64 {
        let max = self.series.iter().map(Series::upper_bound).fold(0.0, f64::max);
        if max > 0.0 {
            max * 1.1
        } else {
            1.0
        }
    }
}

/// A multi-series line chart with an optional secondary y-axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    title: String,
    x_label: String,
    x_scale: XScale,
    x: Vec<f64>,
    primary: YAxis,
    secondary: Option<YAxis>,
    error_bars: bool,
    size: (u32, u32),
}

impl Chart {
    /// Chart over the shared x-domain `x` with series on the primary axis.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        x: Vec<f64>,
        primary: YAxis,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            x_scale: XScale::Linear,
            x,
            primary,
            secondary: None,
            error_bars: true,
            size: (1024, 768),
        }
    }

    /// Set the x-axis scale.
    #[must_use]
    pub const fn x_scale(mut self, x_scale: XScale) -> Self {
        self.x_scale = x_scale;
        self
    }

    /// Add a secondary y-axis on the right.
    #[must_use]
    pub fn secondary(mut self, axis: YAxis) -> Self {
        self.secondary = Some(axis);
        self
    }

    /// Draw (or hide) one-standard-deviation error bars.
    #[must_use]
    pub const fn error_bars(mut self, enabled: bool) -> Self {
        self.error_bars = enabled;
        self
    }

    /// Set the image size in pixels.
    #[must_use]
    pub const fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Get the x-domain.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Get the primary (latency) axis.
    #[must_use]
    pub const fn primary(&self) -> &YAxis {
        &self.primary
    }

    /// Check the x-domain and that every series matches its length.
    ///
    /// # Errors
    ///
    /// Returns `SeriesMismatch` for the first series of the wrong length, or
    /// `Plot` for an empty/non-finite x-domain or a primary axis with no series.
    pub fn validate(&self) -> Result<()> {
        if self.x.is_empty() {
            return Err(Error::Plot("x-domain is empty".to_string()));
        }
        if let Some(bad) = self.x.iter().find(|v| !v.is_finite()) {
            return Err(Error::Plot(format!("x value {bad} is not finite")));
        }
        if self.x_scale == XScale::Log2 && self.x.iter().any(|&v| v <= 0.0) {
            return Err(Error::Plot("log2 x-axis needs positive x values".to_string()));
        }
        if self.primary.series.is_empty() {
            return Err(Error::Plot("primary axis has no series".to_string()));
        }
        let axes = std::iter::once(&self.primary).chain(self.secondary.as_ref());
        for series in axes.flat_map(|a| a.series.iter()) {
            for len in [series.mean.len(), series.std_dev.len()] {
                if len != self.x.len() {
                    return Err(Error::SeriesMismatch {
                        series: series.name.clone(),
                        expected: self.x.len(),
                        actual: len,
                    });
                }
            }
            if let Some(bad) = series.mean.iter().chain(&series.std_dev).find(|v| !v.is_finite()) {
                return Err(Error::Plot(format!(
                    "series '{}' contains non-finite value {bad}",
                    series.name
                )));
            }
        }
        Ok(())
    }

    /// Render to an SVG file, creating its parent directory.
    ///
    /// # Errors
    ///
    /// Validation errors, I/O errors, or `Plot` if drawing fails.
    pub fn render_svg(&self, path: impl AsRef<Path>) -> Result<()> {
        self.validate()?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let root = SVGBackend::new(path, self.size).into_drawing_area();
        self.draw(&root)
    }

    /// Render to an in-memory SVG document.
    ///
    /// # Errors
    ///
    /// Validation errors, or `Plot` if drawing fails.
    pub fn render_svg_string(&self) -> Result<String> {
        self.validate()?;
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size).into_drawing_area();
            self.draw(&root)?;
        }
        Ok(svg)
    }

    fn projected_x(&self) -> Vec<f64> {
        self.x.iter().map(|&v| self.x_scale.project(v)).collect()
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(plot_error)?;

        let xs = self.projected_x();
        let x_min = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let x_max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let pad = if x_max > x_min { (x_max - x_min) * 0.02 } else { 0.5 };
        let x_range = (x_min - pad)..(x_max + pad);

        let mut builder = ChartBuilder::on(root);
        builder
            .caption(&self.title, ("sans-serif", 28).into_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80);
        if self.secondary.is_some() {
            builder.right_y_label_area_size(80);
        }
        let mut chart = builder
            .build_cartesian_2d(x_range.clone(), 0.0..self.primary.upper_bound())
            .map_err(plot_error)?;

        let x_scale = self.x_scale;
        let x_formatter = move |v: &f64| x_scale.tick_label(*v);
        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.primary.label.as_str())
            .x_label_formatter(&x_formatter)
            .draw()
            .map_err(plot_error)?;

        for (i, series) in self.primary.series.iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            chart
                .draw_series(LineSeries::new(
                    xs.iter().copied().zip(series.mean.iter().copied()),
                    color.stroke_width(3),
                ))
                .map_err(plot_error)?
                .label(series.name.as_str())
                .legend(move |(x, y)| legend_mark(x, y, color));
            if self.error_bars {
                chart
                    .draw_series(error_bars(&xs, series, color))
                    .map_err(plot_error)?;
            }
        }

        match &self.secondary {
            None => {
                chart
                    .configure_series_labels()
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK)
                    .draw()
                    .map_err(plot_error)?;
            }
            Some(axis) => {
                let mut chart = chart.set_secondary_coord(x_range, 0.0..axis.upper_bound());
                chart
                    .configure_secondary_axes()
                    .y_desc(axis.label.as_str())
                    .draw()
                    .map_err(plot_error)?;
                let offset = self.primary.series.len();
                for (j, series) in axis.series.iter().enumerate() {
                    let color = PALETTE[(offset + j) % PALETTE.len()];
                    chart
                        .draw_secondary_series(LineSeries::new(
                            xs.iter().copied().zip(series.mean.iter().copied()),
                            color.stroke_width(3),
                        ))
                        .map_err(plot_error)?
                        .label(series.name.as_str())
                        .legend(move |(x, y)| legend_mark(x, y, color));
                    if self.error_bars {
                        chart
                            .draw_secondary_series(error_bars(&xs, series, color))
                            .map_err(plot_error)?;
                    }
                }
                chart
                    .configure_series_labels()
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK)
                    .draw()
                    .map_err(plot_error)?;
            }
        }

        root.present().map_err(plot_error)?;
        Ok(())
    }
}

fn legend_mark(x: i32, y: i32, color: RGBColor) -> PathElement<(i32, i32)> {
    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
}

/// Vertical `mean +/- std` bars for one series.
fn error_bars<'a>(
    xs: &'a [f64],
    series: &'a Series,
    color: RGBColor,
) -> impl Iterator<Item = ErrorBar<f64, f64, ErrorBarOrientV<f64, f64>>> + 'a {
    xs.iter()
        .zip(series.mean.iter().zip(&series.std_dev))
        .map(move |(&x, (&m, &s))| ErrorBar::new_vertical(x, m - s, m, m + s, color.filled(), 10))
}

fn plot_error(e: impl std::fmt::Display) -> Error {
    Error::Plot(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_point(name: &str) -> Series {
        Series::new(name, vec![1.0, 2.0], vec![0.1, 0.2])
    }

    #[test]
    fn test_length_mismatch_fails_fast() {
        let chart = Chart::new(
            "t",
            "x",
            vec![1.0, 2.0],
            YAxis::new("y", vec![two_point("a"), Series::new("b", vec![1.0], vec![0.0])]),
        );
        let err = chart.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::SeriesMismatch { ref series, expected: 2, actual: 1 } if series == "b"
        ));
    }

    #[test]
    fn test_secondary_axis_is_checked() {
        let chart = Chart::new("t", "x", vec![1.0, 2.0], YAxis::new("y", vec![two_point("a")]))
            .secondary(YAxis::new("y2", vec![Series::new("c", vec![1.0; 3], vec![0.0; 3])]));
        assert!(matches!(chart.validate(), Err(Error::SeriesMismatch { .. })));
    }

    #[test]
    fn test_log2_requires_positive_x() {
        let chart = Chart::new("t", "x", vec![0.0, 2.0], YAxis::new("y", vec![two_point("a")]))
            .x_scale(XScale::Log2);
        assert!(chart.validate().is_err());
    }

    #[test]
    fn test_tick_labels() {
        assert_eq!(XScale::Log2.tick_label(18.0), "2^18");
        assert_eq!(XScale::Linear.tick_label(3.0), "3");
        assert_eq!(XScale::Linear.tick_label(2.5), "2.50");
    }

    #[test]
    fn test_render_svg_string() {
        let primary = YAxis::new("s", vec![two_point("sharded")]);
        let chart = Chart::new("Latency", "shards", vec![1.0, 2.0], primary)
            .secondary(YAxis::new("msg/s", vec![two_point("throughput")]));
        let svg = chart.render_svg_string().unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("sharded"));
    }
}
