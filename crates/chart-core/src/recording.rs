// File: crates/chart-core/src/recording.rs
// Summary: Headless surface and tooltip presenter that record every call, for tests
// and for hosts that replay frames elsewhere.

use crate::surface::{normalize_dash, Surface};
use crate::tooltip::{TooltipContent, TooltipPosition, TooltipPresenter};
use crate::types::Point;

#[derive(Clone, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    Arc { center: Point, radius: f64, start: f64, end: f64 },
    Close,
}

/// Styles in effect when a path was stroked or filled.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintState {
    pub stroke_style: String,
    pub fill_style: String,
    pub line_width: f64,
    pub line_dash: Vec<f64>,
    pub font: String,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            stroke_style: "#000".into(),
            fill_style: "#000".into(),
            line_width: 1.0,
            line_dash: Vec::new(),
            font: "10px sans-serif".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear { x: f64, y: f64, width: f64, height: f64 },
    Stroke { path: Vec<PathCmd>, state: PaintState },
    Fill { path: Vec<PathCmd>, state: PaintState },
    Text { text: String, at: Point, state: PaintState },
}

impl DrawCall {
    /// Vertices of a stroke made only of move/line commands.
    pub fn polyline(&self) -> Option<Vec<Point>> {
        let DrawCall::Stroke { path, .. } = self else {
            return None;
        };
        path.iter()
            .map(|cmd| match cmd {
                PathCmd::MoveTo(p) | PathCmd::LineTo(p) => Some(*p),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
    path: Vec<PathCmd>,
    state: PaintState,
}

impl RecordingSurface {
    pub fn new() -> Self { Self::default() }

    pub fn calls(&self) -> &[DrawCall] { &self.calls }

    pub fn take_calls(&mut self) -> Vec<DrawCall> { std::mem::take(&mut self.calls) }

    /// Number of `clear_rect` calls, one per painted frame.
    pub fn clears(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Clear { .. })).count()
    }

    /// Strokes drawn with the given dash pattern.
    pub fn strokes_with_dash<'a>(&'a self, dash: &'a [f64]) -> impl Iterator<Item = &'a DrawCall> + 'a {
        self.calls.iter().filter(move |c| match c {
            DrawCall::Stroke { state, .. } => state.line_dash == dash,
            _ => false,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, Point)> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Text { text, at, .. } => Some((text.as_str(), *at)),
            _ => None,
        })
    }

    /// Centers of filled arcs (highlight markers) with their outline color.
    pub fn filled_arcs(&self) -> Vec<(Point, &str)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Fill { path, state } => Some((path, state)),
                _ => None,
            })
            .flat_map(|(path, state)| {
                path.iter().filter_map(move |cmd| match cmd {
                    PathCmd::Arc { center, .. } => Some((*center, state.stroke_style.as_str())),
                    _ => None,
                })
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(DrawCall::Clear { x, y, width, height });
    }
    fn begin_path(&mut self) { self.path.clear(); }
    fn close_path(&mut self) { self.path.push(PathCmd::Close); }
    fn move_to(&mut self, x: f64, y: f64) { self.path.push(PathCmd::MoveTo(Point::new(x, y))); }
    fn line_to(&mut self, x: f64, y: f64) { self.path.push(PathCmd::LineTo(Point::new(x, y))); }
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.path.push(PathCmd::Arc { center: Point::new(x, y), radius, start: start_angle, end: end_angle });
    }
    fn stroke(&mut self) {
        self.calls.push(DrawCall::Stroke { path: self.path.clone(), state: self.state.clone() });
    }
    fn fill(&mut self) {
        self.calls.push(DrawCall::Fill { path: self.path.clone(), state: self.state.clone() });
    }
    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.calls.push(DrawCall::Text { text: text.to_string(), at: Point::new(x, y), state: self.state.clone() });
    }
    fn set_stroke_style(&mut self, color: &str) { self.state.stroke_style = color.to_string(); }
    fn set_fill_style(&mut self, color: &str) { self.state.fill_style = color.to_string(); }
    fn set_line_width(&mut self, width: f64) { self.state.line_width = width; }
    fn set_line_dash(&mut self, segments: &[f64]) { self.state.line_dash = normalize_dash(segments); }
    fn set_font(&mut self, font: &str) { self.state.font = font.to_string(); }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TooltipCall {
    Show { position: TooltipPosition, content: TooltipContent },
    Hide,
}

#[derive(Debug, Default)]
pub struct RecordingTooltip {
    pub calls: Vec<TooltipCall>,
}

impl RecordingTooltip {
    pub fn new() -> Self { Self::default() }

    /// Most recent `show`, if any.
    pub fn last_shown(&self) -> Option<(&TooltipPosition, &TooltipContent)> {
        self.calls.iter().rev().find_map(|c| match c {
            TooltipCall::Show { position, content } => Some((position, content)),
            TooltipCall::Hide => None,
        })
    }

    /// Whether the latest call left the tooltip visible.
    pub fn is_visible(&self) -> bool {
        matches!(self.calls.last(), Some(TooltipCall::Show { .. }))
    }

    pub fn hides(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, TooltipCall::Hide)).count()
    }
}

impl TooltipPresenter for RecordingTooltip {
    fn show(&mut self, position: TooltipPosition, content: &TooltipContent) {
        self.calls.push(TooltipCall::Show { position, content: content.clone() });
    }
    fn hide(&mut self) { self.calls.push(TooltipCall::Hide); }
}
