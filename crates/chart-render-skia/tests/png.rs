// File: crates/chart-render-skia/tests/png.rs
// Purpose: Drive the chart engine into a Skia raster surface and check the encoded PNG.

use std::cell::RefCell;
use std::rc::Rc;

use chart_core::{
    BoundingRect, Chart, ChartOptions, ChartTarget, Dataset, FrameQueue, PointerListeners, RecordingTooltip,
    Surface,
};
use chart_render_skia::SkiaSurface;

const JAN_1_2024: f64 = 1_704_067_200_000.0;
const DAY: f64 = 86_400_000.0;

fn dataset() -> Dataset {
    let days = (0..3).map(|i| JAN_1_2024 + DAY * i as f64).collect();
    Dataset::new().with_axis("x", days).with_line("y0", "#0", "#3DC23F", vec![5.0, 10.0, 15.0])
}

fn decode(bytes: &[u8]) -> image::RgbaImage {
    image::load_from_memory(bytes).expect("decode png").to_rgba8()
}

#[test]
fn surface_matches_layout_size() {
    let options = ChartOptions::default();
    let surface = SkiaSurface::for_layout(&options.layout()).expect("raster surface");
    assert_eq!((surface.width(), surface.height()), (1200, 400));
}

#[test]
fn hovered_frame_renders_highlight_marker() {
    let skia = Rc::new(RefCell::new(SkiaSurface::new(1200, 400).expect("raster surface")));
    let frames = FrameQueue::new();
    let pointer = PointerListeners::new(BoundingRect::new(0.0, 0.0, 600.0, 200.0));
    let target = ChartTarget {
        surface: Box::new(Rc::clone(&skia)),
        events: Box::new(pointer.clone()),
        tooltip: Box::new(RecordingTooltip::new()),
        scheduler: Box::new(frames.clone()),
    };
    let chart = Chart::create(target, dataset());
    chart.init().expect("init");
    frames.run_until_idle(10);

    // client 300 -> device 600, the middle sample at (600, 200)
    pointer.pointer_move(300.0, 50.0);
    frames.run_frame();

    let png = skia.borrow_mut().encode_png().expect("encode");
    let img = decode(&png);
    assert_eq!(img.dimensions(), (1200, 400));

    let center = img.get_pixel(600, 200);
    assert_eq!(center.0, [255, 255, 255, 255], "highlight disc is filled white");

    let painted = img.pixels().filter(|p| p.0[3] > 0).count();
    assert!(painted > 1_000, "expected gridlines and series, got {painted} pixels");
    // top-right corner of the padding band stays clear
    assert_eq!(img.get_pixel(1190, 5).0[3], 0);
}

#[test]
fn background_fills_cleared_area() {
    let mut surface = SkiaSurface::new(8, 8).expect("raster surface").with_background(skia_safe::Color::WHITE);
    surface.clear_rect(0.0, 0.0, 8.0, 8.0);
    let img = decode(&surface.encode_png().expect("encode"));
    assert!(img.pixels().all(|p| p.0 == [255, 255, 255, 255]));
}

#[test]
fn write_png_creates_parent_directories() {
    let dir = std::env::temp_dir().join(format!("chart-render-skia-{}", std::process::id()));
    let path = dir.join("nested").join("frame.png");
    let mut surface = SkiaSurface::new(4, 4).expect("raster surface");
    surface.write_png(&path).expect("write png");
    assert!(path.exists());
    let _ = std::fs::remove_dir_all(&dir);
}
