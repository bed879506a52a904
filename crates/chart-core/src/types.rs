// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (sizes, paddings, pixel ratio, pointer state).

use serde::{Deserialize, Serialize};

/// Default surface width in CSS pixels.
pub const WIDTH: f64 = 600.0;
/// Default surface height in CSS pixels.
pub const HEIGHT: f64 = 200.0;
/// Device pixels per CSS pixel.
pub const DEVICE_PIXEL_RATIO: f64 = 2.0;
/// Space reserved around the plot for axis labels, in device pixels.
pub const PADDING: f64 = 40.0;
/// Number of horizontal gridlines on the Y axis.
pub const ROWS_COUNT: usize = 5;
/// Approximate number of date labels along the X axis.
pub const LABEL_COLUMNS: usize = 6;
/// Radius of the hovered-sample marker, in device pixels.
pub const CIRCLE_RADIUS: f64 = 8.0;
/// Frames needed for the animated max to cover a full target change.
pub const SPEED: f64 = 3000.0;

/// A pixel position on the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Tooltip anchor in surface-local CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TooltipPosition {
    pub left: f64,
    pub top: f64,
}

/// Last known pointer location over the surface.
/// `x` is in device pixels, `tooltip` in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub x: f64,
    pub tooltip: TooltipPosition,
}

/// Surface bounding box in client (CSS pixel) space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
}

/// Device-pixel geometry of one chart surface.
/// Contract: `height > 2 * padding`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Layout {
    /// Width available to series; the plot spans the full surface.
    pub fn plot_width(&self) -> f64 { self.width }
    /// Height between the top and bottom padding bands.
    pub fn plot_height(&self) -> f64 { self.height - self.padding * 2.0 }
    /// Pixel row of the lowest value (the bottom edge of the plot).
    pub fn baseline(&self) -> f64 { self.height - self.padding }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: WIDTH * DEVICE_PIXEL_RATIO,
            height: HEIGHT * DEVICE_PIXEL_RATIO,
            padding: PADDING,
        }
    }
}
