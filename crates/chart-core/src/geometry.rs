// File: crates/chart-core/src/geometry.rs
// Summary: Pure chart geometry: date labels, nearest-slot hit testing, boundaries,
// and the two series primitives (dashed polyline, highlight circle).

use chrono::{DateTime, Utc};

use crate::dataset::Dataset;
use crate::surface::Surface;
use crate::types::{Point, PointerState};

/// Dash pattern of series polylines.
pub const LINE_DASH: [f64; 2] = [5.0, 2.0];
/// Stroke width of series polylines.
pub const LINE_WIDTH: f64 = 4.0;
/// Solid dash used for the highlight circle outline.
pub const HIGHLIGHT_DASH: [f64; 2] = [1.0, 0.0];
/// Fill of the highlight circle.
pub const HIGHLIGHT_FILL: &str = "#fff";

/// Value range spanned by all line series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boundary {
    pub min: f64,
    pub max: f64,
}

impl Boundary {
    pub fn span(&self) -> f64 { self.max - self.min }
}

/// `"<ShortMonth> <Day>"` for a millisecond timestamp, in UTC (e.g. `"Jan 5"`).
///
/// NaN, infinite or out-of-range timestamps produce an empty string; callers
/// should not rely on that output.
pub fn format_axis_label(timestamp_ms: f64) -> String {
    if !timestamp_ms.is_finite() {
        return String::new();
    }
    match DateTime::<Utc>::from_timestamp_millis(timestamp_ms as i64) {
        Some(date) => date.format("%b %-d").to_string(),
        None => String::new(),
    }
}

/// Nearest-slot hit test: true when `x` lies within half a slot of the pointer,
/// where a slot is `surface_width / series_len` device pixels.
pub fn is_hovered(pointer: Option<&PointerState>, x: f64, series_len: usize, surface_width: f64) -> bool {
    let Some(pointer) = pointer else {
        return false;
    };
    let slot = surface_width / series_len as f64;
    (x - pointer.x).abs() < slot / 2.0
}

/// Min and max over every `line` column; `None` when there is nothing to scan.
pub fn compute_boundaries(dataset: &Dataset) -> Option<Boundary> {
    dataset
        .line_columns()
        .flat_map(|c| c.samples.iter().copied())
        .fold(None, |acc, v| match acc {
            None => Some(Boundary { min: v, max: v }),
            Some(b) => Some(Boundary { min: b.min.min(v), max: b.max.max(v) }),
        })
}

/// Strokes a dashed polyline through `coords` in order.
pub fn draw_line_series(surface: &mut dyn Surface, coords: &[Point], color: &str) {
    surface.begin_path();
    surface.set_line_dash(&LINE_DASH);
    surface.set_line_width(LINE_WIDTH);
    surface.set_stroke_style(color);
    for p in coords {
        surface.line_to(p.x, p.y);
    }
    surface.stroke();
    surface.close_path();
}

/// White disc with a `color` outline marking the hovered sample.
pub fn draw_highlight_circle(surface: &mut dyn Surface, point: Point, color: &str, radius: f64) {
    surface.begin_path();
    surface.set_line_dash(&HIGHLIGHT_DASH);
    surface.set_stroke_style(color);
    surface.set_fill_style(HIGHLIGHT_FILL);
    surface.arc(point.x, point.y, radius, 0.0, std::f64::consts::TAU);
    surface.fill();
    surface.stroke();
    surface.close_path();
}
