// File: crates/demo/src/source.rs
// Summary: Dataset sources for the demo: JSON data-source files, CSV tables, built-in sample.

use std::path::Path;

use anyhow::{Context, Result};
use chart_core::Dataset;
use chrono::{NaiveDate, NaiveDateTime};

const DAY_MS: f64 = 86_400_000.0;
/// 2024-01-01T00:00:00Z.
const SAMPLE_START_MS: f64 = 1_704_067_200_000.0;

/// Series colors assigned to CSV columns in order.
const PALETTE: [&str; 6] = ["#3DC23F", "#F34C44", "#3896E8", "#E8AF14", "#9C27B0", "#00BCD4"];

/// Load by extension: `.json` is the data-source shape, `.csv` a table.
pub fn load(path: &Path) -> Result<Dataset> {
    let ext = path.extension().map(|e| e.to_string_lossy().to_lowercase()).unwrap_or_default();
    match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            Dataset::from_json(&text).with_context(|| format!("parsing {}", path.display()))
        }
        "csv" => load_csv(path),
        other => anyhow::bail!("unsupported dataset extension {other:?} (expected .json or .csv)"),
    }
}

/// CSV with a header row: the first column holds timestamps, every other
/// column becomes a line series named after its header.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    log::debug!("csv headers: {headers:?}");
    let Some((axis_key, series_keys)) = headers.split_first() else {
        anyhow::bail!("{} has no header row", path.display());
    };
    if series_keys.is_empty() {
        anyhow::bail!("{} has no series columns", path.display());
    }

    let mut timestamps = Vec::new();
    let mut series: Vec<Vec<f64>> = vec![Vec::new(); series_keys.len()];
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec.with_context(|| format!("reading row {}", row + 1))?;
        let Some(t) = rec.get(0).and_then(parse_timestamp_ms) else {
            log::warn!("skipping row {}: unreadable timestamp", row + 1);
            continue;
        };
        let values: Option<Vec<f64>> =
            (1..=series_keys.len()).map(|i| rec.get(i).and_then(|s| s.parse::<f64>().ok())).collect();
        let Some(values) = values else {
            log::warn!("skipping row {}: missing or non-numeric value", row + 1);
            continue;
        };
        timestamps.push(t);
        for (column, v) in series.iter_mut().zip(values) {
            column.push(v);
        }
    }

    let mut dataset = Dataset::new().with_axis(axis_key.as_str(), timestamps);
    for (i, (key, samples)) in series_keys.iter().zip(series).enumerate() {
        dataset = dataset.with_line(key.as_str(), key.as_str(), PALETTE[i % PALETTE.len()], samples);
    }
    Ok(dataset)
}

/// Epoch milliseconds, epoch seconds, `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS` (UTC).
fn parse_timestamp_ms(s: &str) -> Option<f64> {
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        // below 10^11 reads as seconds (until year 5138)
        return Some(if n.abs() < 100_000_000_000 { n as f64 * 1000.0 } else { n as f64 });
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp_millis() as f64);
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc().timestamp_millis() as f64)
}

/// Two weeks of daily values for two series.
pub fn sample() -> Dataset {
    let days = 14;
    let timestamps = (0..days).map(|i| SAMPLE_START_MS + DAY_MS * i as f64).collect();
    let joined = (0..days).map(|i| 40.0 + 25.0 * (i as f64 * 0.6).sin() + i as f64 * 3.0).collect();
    let left = (0..days).map(|i| 30.0 + 15.0 * (i as f64 * 0.9).cos()).collect();
    Dataset::new()
        .with_axis("x", timestamps)
        .with_line("y0", "Joined", PALETTE[0], joined)
        .with_line("y1", "Left", PALETTE[1], left)
}
