// File: crates/chart-core/src/surface.rs
// Summary: Immediate-mode 2D drawing surface the engine paints into (canvas-style path API).

use std::cell::RefCell;
use std::rc::Rc;

/// A 2D immediate-mode drawing context in device pixels.
///
/// Path semantics follow an HTML canvas: `begin_path` starts an empty path,
/// `line_to` on an empty path behaves like `move_to`, and `stroke`/`fill`
/// use the styles current at the time of the call.
pub trait Surface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    /// Arc around `(x, y)`; angles in radians, clockwise from the +X axis.
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn stroke(&mut self);
    fn fill(&mut self);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    fn set_stroke_style(&mut self, color: &str);
    fn set_fill_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    /// Alternating dash/gap lengths; an odd-length list repeats itself.
    fn set_line_dash(&mut self, segments: &[f64]);
    /// CSS font shorthand, e.g. `normal 20px Helvetica, sans-serif`.
    fn set_font(&mut self, font: &str);
}

// Lets a host keep a handle on a surface it hands to the engine.
impl<S: Surface + ?Sized> Surface for Rc<RefCell<S>> {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.borrow_mut().clear_rect(x, y, width, height)
    }
    fn begin_path(&mut self) { self.borrow_mut().begin_path() }
    fn close_path(&mut self) { self.borrow_mut().close_path() }
    fn move_to(&mut self, x: f64, y: f64) { self.borrow_mut().move_to(x, y) }
    fn line_to(&mut self, x: f64, y: f64) { self.borrow_mut().line_to(x, y) }
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.borrow_mut().arc(x, y, radius, start_angle, end_angle)
    }
    fn stroke(&mut self) { self.borrow_mut().stroke() }
    fn fill(&mut self) { self.borrow_mut().fill() }
    fn fill_text(&mut self, text: &str, x: f64, y: f64) { self.borrow_mut().fill_text(text, x, y) }
    fn set_stroke_style(&mut self, color: &str) { self.borrow_mut().set_stroke_style(color) }
    fn set_fill_style(&mut self, color: &str) { self.borrow_mut().set_fill_style(color) }
    fn set_line_width(&mut self, width: f64) { self.borrow_mut().set_line_width(width) }
    fn set_line_dash(&mut self, segments: &[f64]) { self.borrow_mut().set_line_dash(segments) }
    fn set_font(&mut self, font: &str) { self.borrow_mut().set_font(font) }
}

/// Pixel size parsed from a CSS font shorthand (`"bold 14px Arial"` -> 14.0).
pub fn font_size_px(font: &str) -> Option<f32> {
    font.split_whitespace()
        .find_map(|part| part.strip_suffix("px"))
        .and_then(|n| n.parse::<f32>().ok())
}

/// Expands a canvas dash list: odd lengths are repeated to become even.
pub fn normalize_dash(segments: &[f64]) -> Vec<f64> {
    if segments.len() % 2 == 1 {
        segments.iter().chain(segments.iter()).copied().collect()
    } else {
        segments.to_vec()
    }
}
