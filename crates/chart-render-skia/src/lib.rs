// File: crates/chart-render-skia/src/lib.rs
// Summary: Skia CPU raster implementation of the chart-core drawing surface, plus PNG export.

use std::path::Path;

use anyhow::Context;
use chart_core::surface::{font_size_px, normalize_dash};
use chart_core::{Layout, Surface};
use skia_safe as skia;

pub mod color;

pub use color::parse_css_color;

const DEFAULT_FONT_PX: f32 = 10.0;

/// Raster surface that follows canvas path semantics on top of a Skia canvas.
///
/// Styles are plain state; a `skia::Paint` is built per `stroke`/`fill`/`fill_text`.
/// Unparseable colors leave the previous style in place, as a browser canvas does.
pub struct SkiaSurface {
    surface: skia::Surface,
    path: skia::Path,
    stroke: skia::Color,
    fill: skia::Color,
    line_width: f32,
    dash: Vec<f32>,
    font: skia::Font,
    background: Option<skia::Color>,
}

impl SkiaSurface {
    pub fn new(width: i32, height: i32) -> anyhow::Result<Self> {
        let surface = skia::surfaces::raster_n32_premul((width, height))
            .ok_or_else(|| anyhow::anyhow!("failed to create {width}x{height} raster surface"))?;
        Ok(Self {
            surface,
            path: skia::Path::new(),
            stroke: skia::Color::BLACK,
            fill: skia::Color::BLACK,
            line_width: 1.0,
            dash: Vec::new(),
            font: make_font("10px sans-serif"),
            background: None,
        })
    }

    /// Surface sized to the device-pixel dimensions of `layout`.
    pub fn for_layout(layout: &Layout) -> anyhow::Result<Self> {
        Self::new(layout.width.round() as i32, layout.height.round() as i32)
    }

    /// Color painted by `clear_rect` instead of transparency.
    pub fn with_background(mut self, color: skia::Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn width(&self) -> i32 { self.surface.width() }

    pub fn height(&self) -> i32 { self.surface.height() }

    /// Snapshot of the current pixels as PNG bytes.
    pub fn encode_png(&mut self) -> anyhow::Result<Vec<u8>> {
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    pub fn write_png(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let bytes = self.encode_png()?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path.as_ref(), bytes).with_context(|| format!("writing {}", path.as_ref().display()))?;
        log::debug!("wrote {}", path.as_ref().display());
        Ok(())
    }

    fn paint(&self, style: skia::paint::Style, color: skia::Color) -> skia::Paint {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(style);
        paint.set_color(color);
        paint
    }
}

impl Surface for SkiaSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let rect = skia::Rect::from_xywh(x as f32, y as f32, width as f32, height as f32);
        let mut paint = skia::Paint::default();
        paint.set_blend_mode(skia::BlendMode::Src);
        paint.set_color(self.background.unwrap_or(skia::Color::TRANSPARENT));
        self.surface.canvas().draw_rect(rect, &paint);
    }

    fn begin_path(&mut self) { self.path = skia::Path::new(); }

    fn close_path(&mut self) { self.path.close(); }

    fn move_to(&mut self, x: f64, y: f64) { self.path.move_to((x as f32, y as f32)); }

    fn line_to(&mut self, x: f64, y: f64) {
        if self.path.is_empty() {
            self.path.move_to((x as f32, y as f32));
        } else {
            self.path.line_to((x as f32, y as f32));
        }
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        let sweep = end_angle - start_angle;
        if sweep.abs() >= std::f64::consts::TAU {
            self.path.add_circle((x as f32, y as f32), radius as f32, skia::PathDirection::CW);
            return;
        }
        let r = radius as f32;
        let oval = skia::Rect::from_xywh(x as f32 - r, y as f32 - r, r * 2.0, r * 2.0);
        let force_move = self.path.is_empty();
        self.path.arc_to(oval, start_angle.to_degrees() as f32, sweep.to_degrees() as f32, force_move);
    }

    fn stroke(&mut self) {
        let mut paint = self.paint(skia::paint::Style::Stroke, self.stroke);
        paint.set_stroke_width(self.line_width);
        if is_dashed(&self.dash) {
            paint.set_path_effect(skia::PathEffect::dash(&self.dash, 0.0));
        }
        self.surface.canvas().draw_path(&self.path, &paint);
    }

    fn fill(&mut self) {
        let paint = self.paint(skia::paint::Style::Fill, self.fill);
        self.surface.canvas().draw_path(&self.path, &paint);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let paint = self.paint(skia::paint::Style::Fill, self.fill);
        self.surface.canvas().draw_str(text, (x as f32, y as f32), &self.font, &paint);
    }

    fn set_stroke_style(&mut self, color: &str) {
        match parse_css_color(color) {
            Some(c) => self.stroke = c,
            None => log::warn!("ignoring unsupported stroke color {color:?}"),
        }
    }

    fn set_fill_style(&mut self, color: &str) {
        match parse_css_color(color) {
            Some(c) => self.fill = c,
            None => log::warn!("ignoring unsupported fill color {color:?}"),
        }
    }

    fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.line_width = width as f32;
        }
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        if segments.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return;
        }
        self.dash = normalize_dash(segments).into_iter().map(|s| s as f32).collect();
    }

    fn set_font(&mut self, font: &str) { self.font = make_font(font); }
}

// A pattern whose gaps are all zero draws a solid line.
fn is_dashed(dash: &[f32]) -> bool {
    dash.len() >= 2 && dash.iter().skip(1).step_by(2).any(|gap| *gap > 0.0)
}

/// Families listed after the size in a CSS font shorthand.
fn font_families(css: &str) -> Vec<&str> {
    let Some(at) = css.find("px") else {
        return Vec::new();
    };
    css[at + 2..]
        .split(',')
        .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\''))
        .filter(|f| !f.is_empty())
        .collect()
}

fn make_font(css: &str) -> skia::Font {
    let mut font = skia::Font::default();
    font.set_size(font_size_px(css).unwrap_or(DEFAULT_FONT_PX));
    let mgr = skia::FontMgr::default();
    let typeface = font_families(css)
        .into_iter()
        .find_map(|family| mgr.match_family_style(family, skia::FontStyle::normal()));
    if let Some(typeface) = typeface {
        font.set_typeface(typeface);
    }
    font
}
