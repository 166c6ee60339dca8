//! Static n-vs-T line chart rendered as SVG.
//!
//! Rendering is a pure function of the series and a [`PlotStyle`]; nothing is
//! kept between calls.

use crate::error::{BenchError, Result};
use crate::metrics::MetricSeries;
use serde::{Deserialize, Serialize};
use std::path::Path;
use svg::node::element::{Circle, Group, Line, Polyline, Rectangle, Text};
use svg::Document;

pub const DEFAULT_CHART_FILE: &str = "nT_plot.svg";

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;
const TICK_TARGET: usize = 6;
/// Fraction of the data span added on each side of an axis.
const AXIS_PADDING: f64 = 0.05;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub title_font_size: f64,
    pub x_label: String,
    pub y_label: String,
    pub legend_label: String,
    pub font_family: String,
    pub font_size: f64,
    /// Plot area fill.
    pub background: String,
    pub page_background: String,
    pub text_color: String,
    pub line_color: String,
    pub line_width: f64,
    /// Marker diameter.
    pub marker_size: f64,
    pub grid_color: String,
    pub grid_width: f64,
    /// SVG `stroke-dasharray` for grid lines.
    pub grid_dash: String,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "n vs. T".to_string(),
            title_font_size: 16.0,
            x_label: "n".to_string(),
            y_label: "T".to_string(),
            legend_label: "T vs. n".to_string(),
            font_family: "DejaVu Sans, Arial, sans-serif".to_string(),
            font_size: 12.0,
            background: "#EAEAF2".to_string(),
            page_background: "#FFFFFF".to_string(),
            text_color: "#262626".to_string(),
            line_color: "#4169E1".to_string(),
            line_width: 2.0,
            marker_size: 5.0,
            grid_color: "#FFFFFF".to_string(),
            grid_width: 0.8,
            grid_dash: "4,3".to_string(),
        }
    }
}

/// Linear map from data range onto a pixel range.
#[derive(Debug, Clone, Copy)]
struct Axis {
    lo: f64,
    hi: f64,
    px_lo: f64,
    px_hi: f64,
}

impl Axis {
    fn new(values: impl Iterator<Item = f64>, px_lo: f64, px_hi: f64) -> Self {
        let (mut lo, mut hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if !lo.is_finite() {
            // empty series
            lo = 0.0;
            hi = 1.0;
        } else if lo == hi {
            // A fixed +-1 vanishes at large magnitudes.
            let pad = (lo.abs() * 1e-9).max(1.0);
            lo -= pad;
            hi += pad;
        } else {
            let pad = (hi - lo) * AXIS_PADDING;
            lo -= pad;
            hi += pad;
        }
        Self {
            lo,
            hi,
            px_lo,
            px_hi,
        }
    }

    fn map(&self, v: f64) -> f64 {
        self.px_lo + (v - self.lo) / (self.hi - self.lo) * (self.px_hi - self.px_lo)
    }

    fn ticks(&self) -> (Vec<f64>, f64) {
        let step = nice_step((self.hi - self.lo) / TICK_TARGET as f64);
        let first = (self.lo / step).ceil() * step;
        let ticks = (0u32..)
            .map(|i| first + f64::from(i) * step)
            .take_while(|&v| v <= self.hi + step * 1e-9)
            .collect();
        (ticks, step)
    }
}

/// Round `raw` up to 1, 2, 2.5 or 5 times a power of ten.
fn nice_step(raw: f64) -> f64 {
    if !(raw.is_finite() && raw > 0.0) {
        return 1.0;
    }
    let mag = 10f64.powi(raw.log10().floor() as i32);
    let frac = raw / mag;
    let nice = if frac <= 1.0 {
        1.0
    } else if frac <= 2.0 {
        2.0
    } else if frac <= 2.5 {
        2.5
    } else if frac <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * mag
}

fn format_tick(v: f64, step: f64) -> String {
    let decimals = (0..10)
        .find(|&d| {
            let scaled = step * 10f64.powi(d);
            (scaled - scaled.round()).abs() < 1e-6
        })
        .unwrap_or(10) as usize;
    let s = format!("{v:.decimals$}");
    // avoid "-0"
    if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        s.trim_start_matches('-').to_string()
    } else {
        s
    }
}

fn px(v: f64) -> String {
    format!("{v:.2}")
}

fn label(content: &str, x: f64, y: f64, anchor: &str, style: &PlotStyle) -> Text {
    Text::new()
        .set("x", px(x))
        .set("y", px(y))
        .set("text-anchor", anchor)
        .set("font-family", style.font_family.as_str())
        .set("font-size", px(style.font_size))
        .set("fill", style.text_color.as_str())
        .add(svg::node::Text::new(content))
}

fn marker(x: f64, y: f64, style: &PlotStyle) -> Circle {
    Circle::new()
        .set("cx", px(x))
        .set("cy", px(y))
        .set("r", px(style.marker_size / 2.0))
        .set("fill", style.line_color.as_str())
}

/// Build the chart document for `series`.
pub fn render_document(series: &MetricSeries, style: &PlotStyle) -> Document {
    let width = f64::from(style.width);
    let height = f64::from(style.height);
    let left = MARGIN_LEFT;
    let right = (width - MARGIN_RIGHT).max(left + 1.0);
    let top = MARGIN_TOP;
    let bottom = (height - MARGIN_BOTTOM).max(top + 1.0);

    let samples = series.samples();
    let x_axis = Axis::new(samples.iter().map(|s| s.n as f64), left, right);
    // SVG y grows downwards.
    let y_axis = Axis::new(samples.iter().map(|s| s.t as f64), bottom, top);

    let mut doc = Document::new()
        .set("width", style.width.to_string())
        .set("height", style.height.to_string())
        .set("viewBox", format!("0 0 {} {}", style.width, style.height))
        .add(
            Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", style.page_background.as_str()),
        )
        .add(
            Rectangle::new()
                .set("x", px(left))
                .set("y", px(top))
                .set("width", px(right - left))
                .set("height", px(bottom - top))
                .set("fill", style.background.as_str()),
        );

    // Grid and tick labels
    let mut grid = Group::new()
        .set("stroke", style.grid_color.as_str())
        .set("stroke-width", px(style.grid_width))
        .set("stroke-dasharray", style.grid_dash.as_str());
    let mut tick_labels = Group::new().set("class", "ticks");

    let (x_ticks, x_step) = x_axis.ticks();
    for v in x_ticks {
        let x = x_axis.map(v);
        grid = grid.add(
            Line::new()
                .set("x1", px(x))
                .set("y1", px(top))
                .set("x2", px(x))
                .set("y2", px(bottom)),
        );
        tick_labels = tick_labels.add(label(
            &format_tick(v, x_step),
            x,
            bottom + style.font_size + 6.0,
            "middle",
            style,
        ));
    }
    let (y_ticks, y_step) = y_axis.ticks();
    for v in y_ticks {
        let y = y_axis.map(v);
        grid = grid.add(
            Line::new()
                .set("x1", px(left))
                .set("y1", px(y))
                .set("x2", px(right))
                .set("y2", px(y)),
        );
        tick_labels = tick_labels.add(label(
            &format_tick(v, y_step),
            left - 8.0,
            y + style.font_size / 3.0,
            "end",
            style,
        ));
    }
    doc = doc.add(grid).add(tick_labels);

    // Series
    let coords: Vec<(f64, f64)> = samples
        .iter()
        .map(|s| (x_axis.map(s.n as f64), y_axis.map(s.t as f64)))
        .collect();
    let mut data = Group::new().set("class", "series");
    if coords.len() > 1 {
        let points = coords
            .iter()
            .map(|&(x, y)| format!("{},{}", px(x), px(y)))
            .collect::<Vec<_>>()
            .join(" ");
        data = data.add(
            Polyline::new()
                .set("points", points)
                .set("fill", "none")
                .set("stroke", style.line_color.as_str())
                .set("stroke-width", px(style.line_width))
                .set("stroke-linejoin", "round"),
        );
    }
    for &(x, y) in &coords {
        data = data.add(marker(x, y, style));
    }
    doc = doc.add(data);

    // Axis labels and title
    let x_label = label(
        &style.x_label,
        (left + right) / 2.0,
        height - 15.0,
        "middle",
        style,
    );
    let label_y = (top + bottom) / 2.0;
    let y_label = label(&style.y_label, 25.0, label_y, "middle", style)
        .set("transform", format!("rotate(-90 25 {})", px(label_y)));
    let title = label(&style.title, (left + right) / 2.0, top - 18.0, "middle", style)
        .set("font-size", px(style.title_font_size))
        .set("font-weight", "bold");
    doc = doc.add(x_label).add(y_label).add(title);

    doc.add(legend(left, top, style))
}

fn legend(left: f64, top: f64, style: &PlotStyle) -> Group {
    let x = left + 12.0;
    let y = top + 12.0;
    let sample_len = 28.0;
    let text_width = style.legend_label.chars().count() as f64 * style.font_size * 0.6;
    let box_width = sample_len + 24.0 + text_width;
    let box_height = style.font_size + 14.0;
    let mid = y + box_height / 2.0;

    Group::new()
        .set("class", "legend")
        .add(
            Rectangle::new()
                .set("x", px(x))
                .set("y", px(y))
                .set("width", px(box_width))
                .set("height", px(box_height))
                .set("rx", "3")
                .set("fill", style.page_background.as_str())
                .set("fill-opacity", "0.8")
                .set("stroke", "#CCCCCC"),
        )
        .add(
            Line::new()
                .set("x1", px(x + 8.0))
                .set("y1", px(mid))
                .set("x2", px(x + 8.0 + sample_len))
                .set("y2", px(mid))
                .set("stroke", style.line_color.as_str())
                .set("stroke-width", px(style.line_width)),
        )
        .add(marker(x + 8.0 + sample_len / 2.0, mid, style))
        .add(label(
            &style.legend_label,
            x + 16.0 + sample_len,
            mid + style.font_size / 3.0,
            "start",
            style,
        ))
}

/// Render `series` to `output`, overwriting any existing file.
pub fn render(series: &MetricSeries, style: &PlotStyle, output: &Path) -> Result<()> {
    let doc = render_document(series, style);
    svg::save(output, &doc).map_err(|e| BenchError::io(output, e))?;
    tracing::info!(output = %output.display(), samples = series.len(), "chart written");
    Ok(())
}
