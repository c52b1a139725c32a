//! Headless chart rendering for seqsnap.
//!
//! The chart is assembled as an SVG document with the `svg` crate and
//! rasterized to PNG with `resvg`, so no display or plotting backend is
//! needed.

use std::path::Path;
use svg::Document;
use svg::node::element::{Circle, Line, Polyline, Rectangle, Text};

/// Canvas size in pixels (14 x 6 inches at 100 dpi).
pub const W: f32 = 1400.0;
pub const H: f32 = 600.0;

/// Every n-th point gets an x-axis label.
pub const LABEL_EVERY: usize = 10;

const MARGIN_LEFT: f32 = 90.0;
const MARGIN_RIGHT: f32 = 24.0;
const MARGIN_TOP: f32 = 48.0;
const MARGIN_BOTTOM: f32 = 150.0;
const AXIS_PAD_FRACTION: f32 = 0.05;
const VALUE_PAD_FRACTION: f64 = 0.05;
const Y_TICK_TARGET: f64 = 6.0;
const MAX_Y_TICKS: usize = 50;
// 6 pt at 100 dpi
const TICK_FONT_SIZE: f32 = 8.33;
const LINE_COLOR: &str = "#1f77b4";
const GRID_COLOR: &str = "#b0b0b0";
const TEXT_COLOR: &str = "#202020";
const FONT: &str = "Helvetica, Arial, sans-serif";

/// One plotted point: an x-axis label and the value drawn on the y axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LengthPoint {
    pub label: String,
    pub length: usize,
}

impl LengthPoint {
    pub fn new(label: impl Into<String>, length: usize) -> Self {
        Self {
            label: label.into(),
            length,
        }
    }
}

/// Text shown around the plot area.
#[derive(Clone, Debug)]
pub struct ChartText {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for ChartText {
    fn default() -> Self {
        Self {
            title: "GenBank sequence lengths".to_string(),
            x_label: "GenBank accession".to_string(),
            y_label: "Sequence length".to_string(),
        }
    }
}

/// Indices that carry an x-axis label: 0, `every`, 2*`every`, ...
pub fn tick_indices(count: usize, every: usize) -> Vec<usize> {
    (0..count).step_by(every.max(1)).collect()
}

/// Picks a "nice" y tick step (1, 2 or 5 times a power of ten).
fn nice_step(span: f64, target_ticks: f64) -> f64 {
    if span <= 0.0 || !span.is_finite() {
        return 1.0;
    }
    let raw = span / target_ticks;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    (nice * magnitude).max(1.0)
}

/// y range with a small margin; a flat series gets a unit band around it.
/// Chromosome-scale lengths exceed the exact integer range of `f32`, so the
/// axis is computed in `f64`.
fn value_range(points: &[LengthPoint]) -> (f64, f64) {
    let min = points.iter().map(|p| p.length).min().unwrap_or(0) as f64;
    let max = points.iter().map(|p| p.length).max().unwrap_or(0) as f64;
    if max <= min {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * VALUE_PAD_FRACTION;
    (min - pad, max + pad)
}

/// Y tick values inside `[lo, hi]`, at most `MAX_Y_TICKS` of them.
fn y_ticks(lo: f64, hi: f64) -> Vec<f64> {
    let step = nice_step(hi - lo, Y_TICK_TARGET);
    let first = (lo / step).ceil() * step;
    if !first.is_finite() || first > hi {
        return vec![];
    }
    let count = (((hi - first) / step).floor() as usize).min(MAX_Y_TICKS - 1);
    (0..=count).map(|k| first + k as f64 * step).collect()
}

fn index_to_x(idx: usize, count: usize, left: f32, right: f32) -> f32 {
    let pad = (right - left) * AXIS_PAD_FRACTION;
    if count <= 1 {
        return (left + right) * 0.5;
    }
    left + pad + idx as f32 * (right - left - 2.0 * pad) / (count - 1) as f32
}

fn value_to_y(value: f64, lo: f64, hi: f64, top: f32, bottom: f32) -> f32 {
    bottom - ((value - lo) / (hi - lo)) as f32 * (bottom - top)
}

fn dashed_line(x1: f32, y1: f32, x2: f32, y2: f32) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", GRID_COLOR)
        .set("stroke-width", 0.5)
        .set("stroke-dasharray", "4 3")
}

fn label(text: &str, x: f32, y: f32, size: f32) -> Text {
    Text::new(text.to_string())
        .set("x", x)
        .set("y", y)
        .set("font-family", FONT)
        .set("font-size", size)
        .set("fill", TEXT_COLOR)
}

/// Builds the length chart. `points` are drawn in the order given, so callers
/// sort them first.
pub fn length_chart_svg(points: &[LengthPoint], text: &ChartText) -> String {
    let left = MARGIN_LEFT;
    let right = W - MARGIN_RIGHT;
    let top = MARGIN_TOP;
    let bottom = H - MARGIN_BOTTOM;
    let (lo, hi) = value_range(points);

    let mut doc = Document::new()
        .set("viewBox", (0, 0, W, H))
        .set("width", W)
        .set("height", H)
        .add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", W)
                .set("height", H)
                .set("fill", "#ffffff"),
        );

    doc = doc.add(
        label(&text.title, (left + right) * 0.5, 28.0, 16.0).set("text-anchor", "middle"),
    );

    for tick in y_ticks(lo, hi) {
        let y = value_to_y(tick, lo, hi, top, bottom);
        doc = doc.add(dashed_line(left, y, right, y)).add(
            label(&format!("{}", tick as i64), left - 6.0, y + 3.0, TICK_FONT_SIZE)
                .set("text-anchor", "end"),
        );
    }

    for idx in tick_indices(points.len(), LABEL_EVERY) {
        let x = index_to_x(idx, points.len(), left, right);
        let y = bottom + 6.0;
        doc = doc.add(dashed_line(x, top, x, bottom)).add(
            label(&points[idx].label, x, y, TICK_FONT_SIZE)
                .set("text-anchor", "end")
                .set("dominant-baseline", "middle")
                .set("transform", format!("rotate(-90 {x} {y})")),
        );
    }

    doc = doc
        .add(
            Rectangle::new()
                .set("x", left)
                .set("y", top)
                .set("width", right - left)
                .set("height", bottom - top)
                .set("fill", "none")
                .set("stroke", "#000000")
                .set("stroke-width", 1),
        )
        .add(
            label(&text.x_label, (left + right) * 0.5, H - 12.0, 12.0).set("text-anchor", "middle"),
        )
        .add(
            label(&text.y_label, 20.0, (top + bottom) * 0.5, 12.0)
                .set("text-anchor", "middle")
                .set("transform", format!("rotate(-90 20 {})", (top + bottom) * 0.5)),
        );

    let coords: Vec<(f32, f32)> = points
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            (
                index_to_x(idx, points.len(), left, right),
                value_to_y(point.length as f64, lo, hi, top, bottom),
            )
        })
        .collect();
    let polyline_points = coords
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ");
    doc = doc.add(
        Polyline::new()
            .set("points", polyline_points)
            .set("fill", "none")
            .set("stroke", LINE_COLOR)
            .set("stroke-width", 1.5),
    );
    for (x, y) in coords {
        doc = doc.add(
            Circle::new()
                .set("cx", x)
                .set("cy", y)
                .set("r", 3)
                .set("fill", LINE_COLOR),
        );
    }

    doc.to_string()
}

/// Rasterizes an SVG document and writes it as PNG.
pub fn rasterize_png(svg_text: &str, path: &Path) -> Result<(), String> {
    let mut options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = resvg::usvg::Tree::from_str(svg_text, &options)
        .map_err(|e| format!("Could not parse chart SVG: {e}"))?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| format!("Invalid chart size {}x{}", size.width(), size.height()))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::default(),
        &mut pixmap.as_mut(),
    );
    pixmap
        .save_png(path)
        .map_err(|e| format!("Could not write chart image '{}': {e}", path.display()))
}
