// File: crates/chart-core/tests/engine.rs
// Purpose: End-to-end engine behaviour against recording host fakes: first paint,
// hover tooltip and highlight, pointer-leave, drift between hit zones, teardown.

use std::cell::RefCell;
use std::rc::Rc;

use chart_core::geometry::LINE_DASH;
use chart_core::recording::TooltipCall;
use chart_core::{
    BoundingRect, Chart, ChartError, ChartOptions, ChartTarget, Dataset, FrameQueue, PointerEventKind,
    PointerListeners, RecordingSurface, RecordingTooltip, TooltipContent, TooltipPosition, TooltipPresenter,
};

const JAN_1_2024: f64 = 1_704_067_200_000.0;
const DAY: f64 = 86_400_000.0;

struct Harness {
    chart: Chart,
    surface: Rc<RefCell<RecordingSurface>>,
    tooltip: Rc<RefCell<RecordingTooltip>>,
    frames: FrameQueue,
    pointer: PointerListeners,
}

fn mount(dataset: Dataset, options: ChartOptions) -> Harness {
    let surface = Rc::new(RefCell::new(RecordingSurface::new()));
    let tooltip = Rc::new(RefCell::new(RecordingTooltip::new()));
    let frames = FrameQueue::new();
    let pointer = PointerListeners::new(BoundingRect::new(0.0, 0.0, 600.0, 200.0));
    let target = ChartTarget {
        surface: Box::new(Rc::clone(&surface)),
        events: Box::new(pointer.clone()),
        tooltip: Box::new(Rc::clone(&tooltip)),
        scheduler: Box::new(frames.clone()),
    };
    let chart = Chart::with_options(target, dataset, options);
    Harness { chart, surface, tooltip, frames, pointer }
}

fn days(n: usize) -> Vec<f64> {
    (0..n).map(|i| JAN_1_2024 + DAY * i as f64).collect()
}

fn three_point_dataset() -> Dataset {
    Dataset::new().with_axis("x", days(3)).with_line("y0", "#0", "#3DC23F", vec![5.0, 10.0, 15.0])
}

fn two_series_dataset() -> Dataset {
    Dataset::new()
        .with_axis("x", days(5))
        .with_line("y0", "Joined", "#3DC23F", vec![1.0, 2.0, 3.0, 4.0, 5.0])
        .with_line("y1", "Left", "#F34C44", vec![5.0, 4.0, 3.0, 2.0, 1.0])
}

#[test]
fn init_paints_one_polyline_synchronously() {
    let h = mount(three_point_dataset(), ChartOptions::default());
    h.chart.init().expect("first init");

    let surface = h.surface.borrow();
    assert_eq!(surface.clears(), 1, "exactly one frame painted");
    let lines: Vec<_> = surface.strokes_with_dash(&LINE_DASH).collect();
    assert_eq!(lines.len(), 1);

    let points = lines[0].polyline().expect("polyline");
    assert_eq!(points.len(), 3);
    assert!(points[0].y > points[1].y && points[1].y > points[2].y, "{points:?}");
    // min sits on the plot bottom, max on the plot top
    assert_eq!(points[0].y, 360.0);
    assert_eq!(points[2].y, 40.0);
    assert_eq!((points[0].x, points[1].x, points[2].x), (0.0, 600.0, 1200.0));
}

#[test]
fn init_seeds_animated_max_and_settles() {
    let h = mount(three_point_dataset(), ChartOptions::default());
    h.chart.init().unwrap();
    assert_eq!(h.chart.animated_max(), Some(15.0));

    // seeding wrote to the store, so one follow-up frame is queued
    assert_eq!(h.frames.pending(), 1);
    assert_eq!(h.frames.run_until_idle(10), 1);
    assert_eq!(h.chart.frames_painted(), 2);
    assert_eq!(h.frames.pending(), 0, "a settled chart stops scheduling");
}

#[test]
fn y_axis_labels_step_from_max_to_min() {
    let h = mount(three_point_dataset(), ChartOptions::default());
    h.chart.init().unwrap();

    let surface = h.surface.borrow();
    let labels: Vec<_> = surface.texts().filter(|(_, at)| at.x == 5.0).map(|(t, at)| (t.to_string(), at.y)).collect();
    assert_eq!(
        labels,
        vec![
            ("13".to_string(), 94.0),
            ("11".to_string(), 158.0),
            ("9".to_string(), 222.0),
            ("7".to_string(), 286.0),
            ("5".to_string(), 350.0),
        ]
    );
}

#[test]
fn x_axis_labels_use_short_dates() {
    let h = mount(three_point_dataset(), ChartOptions::default());
    h.chart.init().unwrap();

    let surface = h.surface.borrow();
    let dates: Vec<_> = surface.texts().filter(|(_, at)| at.y == 395.0).map(|(t, _)| t.to_string()).collect();
    assert_eq!(dates, ["Jan 1", "Jan 2", "Jan 3"]);
}

#[test]
fn x_axis_labels_an_evenly_spaced_subset() {
    let dataset = Dataset::new().with_axis("x", days(14)).with_line("y0", "#0", "#3DC23F", (1..=14).map(f64::from).collect());
    let h = mount(dataset, ChartOptions::default());
    h.chart.init().unwrap();

    let surface = h.surface.borrow();
    // 14 samples over 1200 px: x_ratio 1200/13, labels every 3rd sample
    let labels: Vec<_> = surface.texts().filter(|(_, at)| at.y == 395.0).map(|(t, at)| (t.to_string(), at.x)).collect();
    let x_ratio = 1200.0 / 13.0;
    let expected: Vec<_> = [0usize, 3, 6, 9, 12]
        .iter()
        .zip(["Jan 1", "Jan 4", "Jan 7", "Jan 10", "Jan 13"])
        .map(|(&j, text)| (text.to_string(), j as f64 * x_ratio))
        .collect();
    assert_eq!(labels, expected);
}

#[test]
fn pointer_move_shows_tooltip_and_highlights_each_series() {
    let h = mount(two_series_dataset(), ChartOptions::default());
    h.chart.init().unwrap();

    // client x 150 -> device x 300 -> sample 1 (samples every 300 device px)
    assert_eq!(h.pointer.pointer_move(150.0, 60.0), 1);
    let pointer = h.chart.pointer().expect("pointer recorded");
    assert_eq!(pointer.x, 300.0);
    assert_eq!((pointer.tooltip.left, pointer.tooltip.top), (150.0, 60.0));

    h.surface.borrow_mut().take_calls();
    h.frames.run_frame();

    let tooltip = h.tooltip.borrow();
    let (position, content) = tooltip.last_shown().expect("tooltip shown");
    assert_eq!((position.left, position.top), (150.0, 60.0));
    assert_eq!(content.title, "Jan 2");
    let items: Vec<_> = content.items.iter().map(|i| (i.name.as_str(), i.color.as_str(), i.value)).collect();
    assert_eq!(items, [("Joined", "#3DC23F", 2.0), ("Left", "#F34C44", 4.0)]);

    let surface = h.surface.borrow();
    let marks = surface.filled_arcs();
    assert_eq!(marks.len(), 2, "one marker per series");
    assert!(marks.iter().all(|(p, _)| p.x == 300.0));
    assert_eq!(marks[0].1, "#3DC23F");
    assert_eq!(marks[1].1, "#F34C44");
}

#[test]
fn pointer_move_respects_the_surface_offset() {
    let h = mount(two_series_dataset(), ChartOptions::default());
    h.pointer.set_rect(BoundingRect::new(100.0, 50.0, 600.0, 200.0));
    h.chart.init().unwrap();

    h.pointer.pointer_move(400.0, 80.0);
    let pointer = h.chart.pointer().unwrap();
    assert_eq!(pointer.x, 600.0);
    assert_eq!((pointer.tooltip.left, pointer.tooltip.top), (300.0, 30.0));

    h.frames.run_frame();
    assert_eq!(h.tooltip.borrow().last_shown().unwrap().1.title, "Jan 3");
}

#[test]
fn pointer_moves_in_one_tick_paint_once() {
    let h = mount(two_series_dataset(), ChartOptions::default());
    h.chart.init().unwrap();
    h.frames.run_until_idle(10);
    let painted = h.chart.frames_painted();

    h.pointer.pointer_move(10.0, 10.0);
    h.pointer.pointer_move(150.0, 10.0);
    h.pointer.pointer_move(450.0, 10.0);
    assert_eq!(h.frames.pending(), 1);
    h.frames.run_frame();
    assert_eq!(h.chart.frames_painted(), painted + 1);
    assert_eq!(h.tooltip.borrow().last_shown().unwrap().1.title, "Jan 4");
}

#[test]
fn pointer_leave_hides_tooltip_and_clears_pointer() {
    let h = mount(two_series_dataset(), ChartOptions::default());
    h.chart.init().unwrap();
    h.pointer.pointer_move(150.0, 60.0);
    h.frames.run_frame();
    assert!(h.tooltip.borrow().is_visible());

    h.pointer.pointer_leave();
    assert!(h.chart.pointer().is_none());
    assert_eq!(h.tooltip.borrow().calls.last(), Some(&TooltipCall::Hide));

    h.surface.borrow_mut().take_calls();
    h.frames.run_frame();
    assert!(h.surface.borrow().filled_arcs().is_empty(), "no highlight without a pointer");
    assert!(!h.tooltip.borrow().is_visible());
}

#[test]
fn drifting_between_hit_zones_keeps_the_last_tooltip() {
    let h = mount(two_series_dataset(), ChartOptions::default());
    h.chart.init().unwrap();
    h.pointer.pointer_move(150.0, 60.0);
    h.frames.run_frame();
    let shown = h.tooltip.borrow().calls.len();

    // device x 150 is 150 px from samples 0 and 1; half a slot is 120 px
    h.pointer.pointer_move(75.0, 60.0);
    h.surface.borrow_mut().take_calls();
    h.frames.run_frame();

    assert_eq!(h.tooltip.borrow().calls.len(), shown, "no show and no hide");
    assert!(h.tooltip.borrow().is_visible());
    assert!(h.surface.borrow().filled_arcs().is_empty());
}

#[test]
fn drifting_between_hit_zones_hides_when_configured() {
    let options = ChartOptions { hide_tooltip_on_miss: true, ..ChartOptions::default() };
    let h = mount(two_series_dataset(), options);
    h.chart.init().unwrap();
    h.pointer.pointer_move(150.0, 60.0);
    h.frames.run_frame();
    assert!(h.tooltip.borrow().is_visible());

    h.pointer.pointer_move(75.0, 60.0);
    h.frames.run_frame();
    assert_eq!(h.tooltip.borrow().calls.last(), Some(&TooltipCall::Hide));
}

#[test]
fn destroy_stops_frames_and_unbinds_listeners() {
    let h = mount(two_series_dataset(), ChartOptions::default());
    h.chart.init().unwrap();
    assert_eq!(h.pointer.count(PointerEventKind::Move), 1);
    assert_eq!(h.pointer.count(PointerEventKind::Leave), 1);

    h.chart.destroy();
    assert!(h.chart.is_destroyed());
    assert_eq!(h.frames.pending(), 0, "pending frame cancelled");
    assert_eq!(h.pointer.count(PointerEventKind::Move), 0);
    assert_eq!(h.pointer.count(PointerEventKind::Leave), 0);

    assert_eq!(h.pointer.pointer_move(150.0, 60.0), 0);
    h.pointer.pointer_leave();
    assert_eq!(h.frames.run_until_idle(10), 0);
    assert_eq!(h.surface.borrow().clears(), 1, "only the init paint");
    assert!(h.tooltip.borrow().calls.is_empty());

    h.chart.destroy();
}

#[test]
fn dropped_chart_leaves_no_live_callbacks() {
    let h = mount(two_series_dataset(), ChartOptions::default());
    h.chart.init().unwrap();
    let Harness { chart, surface, frames, pointer, .. } = h;
    drop(chart);

    pointer.pointer_move(150.0, 60.0);
    frames.run_until_idle(10);
    assert_eq!(surface.borrow().clears(), 1);
}

#[test]
fn init_twice_and_after_destroy_is_rejected() {
    let h = mount(three_point_dataset(), ChartOptions::default());
    h.chart.init().unwrap();
    assert_eq!(h.chart.init(), Err(ChartError::AlreadyInitialized));
    h.chart.destroy();
    assert_eq!(h.chart.init(), Err(ChartError::Destroyed));
    assert_eq!(h.surface.borrow().clears(), 1);
}

#[test]
fn dataset_without_lines_paints_a_blank_frame() {
    let h = mount(Dataset::new().with_axis("x", days(4)), ChartOptions::default());
    h.chart.init().unwrap();

    let surface = h.surface.borrow();
    assert_eq!(surface.clears(), 1);
    assert_eq!(surface.calls().len(), 1, "clear only");
    assert_eq!(h.chart.animated_max(), None);
    assert_eq!(h.frames.pending(), 0);
}

#[test]
fn two_charts_animate_independently() {
    let a = mount(three_point_dataset(), ChartOptions::default());
    let b = mount(two_series_dataset(), ChartOptions::default());
    a.chart.init().unwrap();
    b.chart.init().unwrap();
    assert_eq!(a.chart.animated_max(), Some(15.0));
    assert_eq!(b.chart.animated_max(), Some(5.0));

    b.chart.destroy();
    a.pointer.pointer_move(300.0, 10.0);
    a.frames.run_frame();
    assert!(a.tooltip.borrow().is_visible());
}

#[test]
fn flat_and_single_sample_series_stay_on_the_baseline() {
    let flat = Dataset::new().with_axis("x", days(3)).with_line("y0", "Flat", "#3DC23F", vec![4.0, 4.0, 4.0]);
    let h = mount(flat, ChartOptions::default());
    h.chart.init().unwrap();
    let surface = h.surface.borrow();
    let line = surface.strokes_with_dash(&LINE_DASH).next().and_then(|c| c.polyline()).expect("series stroke");
    assert_eq!(line.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>(), [(0.0, 360.0), (600.0, 360.0), (1200.0, 360.0)]);
    drop(surface);

    let single = Dataset::new().with_axis("x", days(1)).with_line("y0", "One", "#3DC23F", vec![9.0]);
    let h = mount(single, ChartOptions::default());
    h.chart.init().unwrap();
    let surface = h.surface.borrow();
    let line = surface.strokes_with_dash(&LINE_DASH).next().and_then(|c| c.polyline()).expect("series stroke");
    assert_eq!(line.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>(), [(0.0, 360.0)]);
}

/// Presenter that calls back into the chart it is mounted on.
struct ReentrantTooltip {
    chart: Rc<RefCell<Option<Rc<Chart>>>>,
    init_results: Rc<RefCell<Vec<Result<(), ChartError>>>>,
}

impl TooltipPresenter for ReentrantTooltip {
    fn show(&mut self, _: TooltipPosition, _: &TooltipContent) {
        if let Some(chart) = self.chart.borrow().as_ref() {
            chart.destroy();
            self.init_results.borrow_mut().push(chart.init());
        }
    }
    fn hide(&mut self) {}
}

#[test]
fn lifecycle_calls_from_inside_a_paint_are_ignored() {
    let slot = Rc::new(RefCell::new(None));
    let init_results = Rc::new(RefCell::new(Vec::new()));
    let frames = FrameQueue::new();
    let pointer = PointerListeners::new(BoundingRect::new(0.0, 0.0, 600.0, 200.0));
    let target = ChartTarget {
        surface: Box::new(RecordingSurface::new()),
        events: Box::new(pointer.clone()),
        tooltip: Box::new(ReentrantTooltip { chart: Rc::clone(&slot), init_results: Rc::clone(&init_results) }),
        scheduler: Box::new(frames.clone()),
    };
    let chart = Rc::new(Chart::create(target, three_point_dataset()));
    *slot.borrow_mut() = Some(Rc::clone(&chart));
    chart.init().unwrap();
    frames.run_until_idle(10);

    pointer.pointer_move(300.0, 50.0);
    frames.run_frame();

    assert_eq!(*init_results.borrow(), vec![Err(ChartError::Busy)]);
    assert!(!chart.is_destroyed(), "destroy from a callback is dropped");
    assert_eq!(pointer.count(PointerEventKind::Move), 1);

    // outside a callback the lifecycle works as usual
    chart.destroy();
    assert!(chart.is_destroyed());
    slot.borrow_mut().take();
}
