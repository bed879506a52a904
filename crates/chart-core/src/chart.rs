// File: crates/chart-core/src/chart.rs
// Summary: Chart engine: binds pointer events, drives the animated redraw loop and
// paints axes, series, hover guide and tooltip onto a host surface.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::animation::MaxAnimator;
use crate::dataset::{Column, Dataset};
use crate::geometry::{
    compute_boundaries, draw_highlight_circle, draw_line_series, format_axis_label, is_hovered, Boundary,
};
use crate::grid::{gridlines, js_round, label_step};
use crate::host::{FrameCallback, FrameScheduler, ListenerId, PointerEvent, PointerEventKind, PointerHandler, SurfaceEvents};
use crate::store::StateStore;
use crate::surface::Surface;
use crate::theme::Theme;
use crate::tooltip::{TooltipContent, TooltipItem, TooltipPresenter};
use crate::types::{
    Layout, Point, PointerState, TooltipPosition, CIRCLE_RADIUS, DEVICE_PIXEL_RATIO, HEIGHT, LABEL_COLUMNS, PADDING,
    ROWS_COUNT, SPEED, WIDTH,
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("chart is already initialized")]
    AlreadyInitialized,
    #[error("chart has been destroyed")]
    Destroyed,
    #[error("chart is busy painting or handling an event")]
    Busy,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Surface size in CSS pixels.
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
    /// Label band above and below the plot, in device pixels.
    pub padding: f64,
    pub rows: usize,
    pub label_columns: usize,
    pub circle_radius: f64,
    /// Frames per full transition of the animated max.
    pub speed: f64,
    /// Hide the tooltip on frames where the pointer is over the surface but
    /// between hit zones. Off by default: the last tooltip stays up until the
    /// next hover or pointer-leave.
    pub hide_tooltip_on_miss: bool,
    /// A theme name (`"light"`, `"dark"`) or an inline theme object in JSON.
    #[serde(deserialize_with = "crate::theme::named_or_inline")]
    pub theme: Theme,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            pixel_ratio: DEVICE_PIXEL_RATIO,
            padding: PADDING,
            rows: ROWS_COUNT,
            label_columns: LABEL_COLUMNS,
            circle_radius: CIRCLE_RADIUS,
            speed: SPEED,
            hide_tooltip_on_miss: false,
            theme: Theme::default(),
        }
    }
}

impl ChartOptions {
    pub fn layout(&self) -> Layout {
        Layout {
            width: self.width * self.pixel_ratio,
            height: self.height * self.pixel_ratio,
            padding: self.padding,
        }
    }
}

/// Host capabilities a chart is mounted on.
pub struct ChartTarget {
    pub surface: Box<dyn Surface>,
    pub events: Box<dyn SurfaceEvents>,
    pub tooltip: Box<dyn TooltipPresenter>,
    pub scheduler: Box<dyn FrameScheduler>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Initialized,
    Destroyed,
}

struct Inner {
    surface: Box<dyn Surface>,
    events: Box<dyn SurfaceEvents>,
    tooltip: Box<dyn TooltipPresenter>,
    store: StateStore,
    animator: MaxAnimator,
    dataset: Dataset,
    options: ChartOptions,
    listeners: Vec<(PointerEventKind, ListenerId)>,
    lifecycle: Lifecycle,
    frames: u64,
}

/// Handle to a mounted chart. Single-threaded; callbacks registered with the
/// host hold only weak references, so dropping the handle disarms them.
pub struct Chart {
    inner: Rc<RefCell<Inner>>,
}

impl Chart {
    /// Mount `dataset` on `target` with default options. Pointer listeners are
    /// registered immediately; nothing is painted until [`Chart::init`].
    pub fn create(target: ChartTarget, dataset: Dataset) -> Self {
        Self::with_options(target, dataset, ChartOptions::default())
    }

    pub fn with_options(target: ChartTarget, dataset: Dataset, options: ChartOptions) -> Self {
        let ChartTarget { surface, mut events, tooltip, scheduler } = target;
        let inner = Rc::new_cyclic(|weak: &Weak<RefCell<Inner>>| {
            let frame_ref = weak.clone();
            let store = StateStore::new(
                scheduler,
                Box::new(move || {
                    let weak = frame_ref.clone();
                    Box::new(move || run_frame(&weak)) as FrameCallback
                }),
            );

            let move_ref = weak.clone();
            let on_move: PointerHandler = Rc::new(move |event: &PointerEvent| {
                with_inner(&move_ref, "pointer-move", |inner| inner.pointer_move(event))
            });
            let leave_ref = weak.clone();
            let on_leave: PointerHandler = Rc::new(move |_: &PointerEvent| {
                with_inner(&leave_ref, "pointer-leave", Inner::pointer_leave)
            });
            let listeners = vec![
                (PointerEventKind::Move, events.on(PointerEventKind::Move, on_move)),
                (PointerEventKind::Leave, events.on(PointerEventKind::Leave, on_leave)),
            ];

            RefCell::new(Inner {
                surface,
                events,
                tooltip,
                store,
                animator: MaxAnimator::new(options.speed),
                dataset,
                options,
                listeners,
                lifecycle: Lifecycle::Created,
                frames: 0,
            })
        });
        log::debug!("chart created ({} columns)", inner.borrow().dataset.columns.len());
        Self { inner }
    }

    /// Paint the first frame synchronously and seed the animated max.
    ///
    /// Returns [`ChartError::Busy`] when called from inside one of the chart's
    /// own callbacks (for example a tooltip presenter during a paint).
    pub fn init(&self) -> Result<(), ChartError> {
        let Ok(mut inner) = self.inner.try_borrow_mut() else {
            log::warn!("init called re-entrantly; ignored");
            return Err(ChartError::Busy);
        };
        match inner.lifecycle {
            Lifecycle::Initialized => return Err(ChartError::AlreadyInitialized),
            Lifecycle::Destroyed => return Err(ChartError::Destroyed),
            Lifecycle::Created => {}
        }
        inner.lifecycle = Lifecycle::Initialized;
        log::debug!("chart init");
        inner.paint();
        Ok(())
    }

    /// Cancel the pending frame and unbind pointer listeners. Idempotent.
    ///
    /// A call made from inside one of the chart's own callbacks is dropped
    /// with a warning and the chart stays live.
    pub fn destroy(&self) {
        let Ok(mut inner) = self.inner.try_borrow_mut() else {
            log::warn!("destroy called re-entrantly; ignored");
            return;
        };
        if inner.lifecycle == Lifecycle::Destroyed {
            return;
        }
        inner.lifecycle = Lifecycle::Destroyed;
        inner.store.close();
        let listeners = std::mem::take(&mut inner.listeners);
        for (kind, id) in listeners {
            inner.events.off(kind, id);
        }
        log::debug!("chart destroyed after {} frames", inner.frames);
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.borrow().lifecycle == Lifecycle::Destroyed
    }

    /// Frames painted so far, including the synchronous first paint.
    pub fn frames_painted(&self) -> u64 { self.inner.borrow().frames }

    pub fn animated_max(&self) -> Option<f64> { self.inner.borrow().store.animated_max() }

    pub fn pointer(&self) -> Option<PointerState> { self.inner.borrow().store.pointer().copied() }

    pub fn options(&self) -> ChartOptions { self.inner.borrow().options.clone() }
}

fn with_inner(weak: &Weak<RefCell<Inner>>, what: &str, f: impl FnOnce(&mut Inner)) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let Ok(mut inner) = inner.try_borrow_mut() else {
        log::warn!("dropping re-entrant {what} callback");
        return;
    };
    f(&mut inner);
}

fn run_frame(weak: &Weak<RefCell<Inner>>) {
    with_inner(weak, "frame", |inner| {
        inner.store.frame_started();
        if inner.lifecycle != Lifecycle::Destroyed {
            inner.paint();
        }
    });
}

impl Inner {
    fn pointer_move(&mut self, event: &PointerEvent) {
        if self.lifecycle == Lifecycle::Destroyed {
            return;
        }
        let rect = self.events.bounding_rect();
        let left = event.client_x - rect.left;
        let top = event.client_y - rect.top;
        self.store.set_pointer(Some(PointerState {
            x: left * self.options.pixel_ratio,
            tooltip: TooltipPosition { left, top },
        }));
    }

    fn pointer_leave(&mut self) {
        if self.lifecycle == Lifecycle::Destroyed {
            return;
        }
        self.store.set_pointer(None);
        self.tooltip.hide();
    }

    fn paint(&mut self) {
        self.frames += 1;
        let Inner { surface, tooltip, store, animator, dataset, options, frames, .. } = self;
        let surface = surface.as_mut();
        let (dataset, options) = (&*dataset, &*options);
        let layout = options.layout();
        log::trace!("paint frame {frames}");

        surface.clear_rect(0.0, 0.0, layout.width, layout.height);

        let Some(bounds) = compute_boundaries(dataset) else {
            log::trace!("no line samples; frame left blank");
            return;
        };
        let sample_count = dataset.sample_count();
        // flat or single-sample data collapses onto the baseline / left edge
        let y_ratio = if bounds.span() > 0.0 { layout.plot_height() / bounds.span() } else { 0.0 };
        let x_ratio = if sample_count > 1 { layout.plot_width() / (sample_count as f64 - 1.0) } else { 0.0 };

        if let Some(next) = animator.advance(store.animated_max(), bounds.max) {
            store.set_animated_max(next);
        }
        let animated_max = store.animated_max().unwrap_or(bounds.max);
        let pointer = store.pointer().copied();

        let lines: Vec<&Column> = dataset.line_columns().collect();
        let axis = dataset.axis_column();

        draw_y_axis(surface, options, &layout, animated_max, bounds.min);

        let hovered = axis.and_then(|axis| draw_x_axis(surface, options, &layout, axis, x_ratio, pointer.as_ref()));
        match (hovered, pointer, axis) {
            (Some(index), Some(pointer), Some(axis)) => {
                let content = tooltip_content(dataset, &options.theme, &lines, axis, index);
                tooltip.show(pointer.tooltip, &content);
            }
            (None, Some(_), _) if options.hide_tooltip_on_miss => tooltip.hide(),
            _ => {}
        }

        for column in &lines {
            let color = dataset.color(&column.key).unwrap_or(options.theme.fallback_series.as_str());
            let coords = to_coords(&column.samples, &layout, bounds, x_ratio, y_ratio);
            draw_line_series(surface, &coords, color);
            if let Some(point) = coords.iter().find(|p| is_hovered(pointer.as_ref(), p.x, coords.len(), layout.width)) {
                draw_highlight_circle(surface, *point, color, options.circle_radius);
            }
        }
    }
}

/// Pixel coordinates of one series: sample `j` sits at `j * x_ratio`, the
/// boundary minimum on the bottom edge of the plot.
fn to_coords(samples: &[f64], layout: &Layout, bounds: Boundary, x_ratio: f64, y_ratio: f64) -> Vec<Point> {
    samples
        .iter()
        .enumerate()
        .map(|(j, v)| {
            Point::new(
                (j as f64 * x_ratio).floor(),
                (layout.baseline() - (v - bounds.min) * y_ratio).floor(),
            )
        })
        .collect()
}

fn draw_y_axis(surface: &mut dyn Surface, options: &ChartOptions, layout: &Layout, max: f64, min: f64) {
    let theme = &options.theme;
    let rows = options.rows.max(1);
    let text_step = (max - min) / rows as f64;

    surface.begin_path();
    surface.set_stroke_style(&theme.grid);
    surface.set_line_width(theme.grid_width);
    surface.set_line_dash(&theme.grid_dash);
    surface.set_font(&theme.font);
    surface.set_fill_style(&theme.label);
    for (i, y) in gridlines(layout.padding, layout.plot_height(), rows) {
        let text = js_round(max - text_step * i as f64);
        surface.fill_text(&format!("{text}"), 5.0, y - 10.0);
        surface.move_to(0.0, y);
        surface.line_to(layout.width, y);
    }
    surface.stroke();
    surface.close_path();
}

/// Draws date labels and, for the first hovered sample, the vertical guide.
/// Returns the hovered sample index.
fn draw_x_axis(
    surface: &mut dyn Surface,
    options: &ChartOptions,
    layout: &Layout,
    axis: &Column,
    x_ratio: f64,
    pointer: Option<&PointerState>,
) -> Option<usize> {
    let theme = &options.theme;
    let step = label_step(axis.samples.len(), options.label_columns);
    let mut hovered = None;

    surface.begin_path();
    surface.set_stroke_style(&theme.grid);
    surface.set_line_width(theme.grid_width);
    surface.set_line_dash(&theme.grid_dash);
    surface.set_font(&theme.font);
    surface.set_fill_style(&theme.label);
    for (j, &timestamp) in axis.samples.iter().enumerate() {
        let x = j as f64 * x_ratio;
        if j % step == 0 {
            surface.fill_text(&format_axis_label(timestamp), x, layout.height - 5.0);
        }
        if hovered.is_none() && is_hovered(pointer, x, axis.samples.len(), layout.width) {
            surface.move_to(x, layout.padding / 2.0);
            surface.line_to(x, layout.baseline());
            hovered = Some(j);
        }
    }
    surface.stroke();
    surface.close_path();
    hovered
}

fn tooltip_content(dataset: &Dataset, theme: &Theme, lines: &[&Column], axis: &Column, index: usize) -> TooltipContent {
    TooltipContent {
        title: format_axis_label(axis.samples[index]),
        items: lines
            .iter()
            .map(|column| TooltipItem {
                color: dataset.color(&column.key).unwrap_or(theme.fallback_series.as_str()).to_string(),
                name: dataset.name(&column.key).to_string(),
                value: column.samples.get(index).copied().unwrap_or(f64::NAN),
            })
            .collect(),
    }
}
