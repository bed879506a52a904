// File: crates/demo/src/main.rs
// Summary: Demo mounts a timeline chart on a Skia raster surface, synthesizes pointer
// events (hover, leave) and writes one PNG per step.
//
// Usage: timeline-demo [dataset.json|dataset.csv] [options.json]
// The options file may name a theme: `{ "theme": "dark" }`.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use chart_core::{
    BoundingRect, Chart, ChartOptions, ChartTarget, FrameQueue, PointerListeners, TooltipContent, TooltipPosition,
    TooltipPresenter,
};
use chart_render_skia::{parse_css_color, SkiaSurface};

mod source;

/// Upper bound on frames drained per step; the animated max settles well before.
const MAX_FRAMES: usize = 10_000;

/// Tooltip presenter that logs what a DOM host would display.
struct LogTooltip;

impl TooltipPresenter for LogTooltip {
    fn show(&mut self, position: TooltipPosition, content: &TooltipContent) {
        match serde_json::to_string(content) {
            Ok(json) => log::info!("tooltip at ({}, {}): {json}", position.left, position.top),
            Err(err) => log::warn!("tooltip content not serializable: {err}"),
        }
    }

    fn hide(&mut self) {
        log::info!("tooltip hidden");
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let data_path = args.next().map(PathBuf::from);
    let options_path = args.next().map(PathBuf::from);

    let dataset = match &data_path {
        Some(path) => source::load(path).with_context(|| format!("failed to load dataset '{}'", path.display()))?,
        None => {
            log::info!("no dataset given, using the built-in sample");
            source::sample()
        }
    };
    log::info!(
        "loaded {} columns, {} samples, {} line series",
        dataset.columns.len(),
        dataset.sample_count(),
        dataset.line_columns().count()
    );

    let options = match &options_path {
        Some(path) => load_options(path)?,
        None => ChartOptions::default(),
    };

    let stem = data_path
        .as_deref()
        .and_then(Path::file_stem)
        .and_then(|s| s.to_str())
        .unwrap_or("sample")
        .to_string();

    let background = parse_css_color(&options.theme.background).unwrap_or(skia_safe::Color::WHITE);
    let skia = SkiaSurface::for_layout(&options.layout())?.with_background(background);
    let skia = Rc::new(RefCell::new(skia));
    let frames = FrameQueue::new();
    let pointer = PointerListeners::new(BoundingRect::new(0.0, 0.0, options.width, options.height));
    let target = ChartTarget {
        surface: Box::new(Rc::clone(&skia)),
        events: Box::new(pointer.clone()),
        tooltip: Box::new(LogTooltip),
        scheduler: Box::new(frames.clone()),
    };
    let chart = Chart::with_options(target, dataset, options);
    let options = chart.options();
    log::info!("theme {}", options.theme.name);

    chart.init()?;
    write_step(&skia, &stem, "init")?;

    let settled = frames.run_until_idle(MAX_FRAMES);
    log::info!("animation settled after {settled} frames");
    write_step(&skia, &stem, "settled")?;

    // hover a third of the way in, then drift to two thirds
    pointer.pointer_move(options.width / 3.0, options.height / 2.0);
    frames.run_until_idle(MAX_FRAMES);
    write_step(&skia, &stem, "hover")?;

    pointer.pointer_move(options.width * 2.0 / 3.0, options.height / 3.0);
    frames.run_until_idle(MAX_FRAMES);
    write_step(&skia, &stem, "hover_moved")?;

    pointer.pointer_leave();
    frames.run_until_idle(MAX_FRAMES);
    write_step(&skia, &stem, "leave")?;

    chart.destroy();
    let painted = chart.frames_painted();
    let delivered = pointer.pointer_move(options.width / 2.0, options.height / 2.0);
    frames.run_until_idle(MAX_FRAMES);
    log::info!(
        "destroyed: {delivered} listeners left, {} frames painted after teardown",
        chart.frames_painted() - painted
    );

    Ok(())
}

fn load_options(path: &Path) -> Result<ChartOptions> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading options '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing options '{}'", path.display()))
}

/// Writes target/out/timeline_<stem>_<step>.png.
fn write_step(skia: &RefCell<SkiaSurface>, stem: &str, step: &str) -> Result<()> {
    let out = PathBuf::from("target/out").join(format!("timeline_{stem}_{step}.png"));
    skia.borrow_mut().write_png(&out)?;
    log::info!("wrote {}", out.display());
    Ok(())
}
