// File: crates/chart-core/src/grid.rs
// Summary: Gridline and tick layout helpers.

/// Evenly spaced rows below `top`, skipping the top edge itself: yields
/// `(i, top + i * height / rows)` for `i` in `1..=rows`.
pub fn gridlines(top: f64, height: f64, rows: usize) -> impl Iterator<Item = (usize, f64)> {
    let step = if rows == 0 { 0.0 } else { height / rows as f64 };
    (1..=rows).map(move |i| (i, top + step * i as f64))
}

/// Index stride between date labels so that roughly `columns` labels fit.
///
/// The stride is `round((sample_count + 1) / columns)`: the count includes the
/// column key slot of the data-source format, so 14 samples label every 3rd.
pub fn label_step(sample_count: usize, columns: usize) -> usize {
    if columns == 0 {
        return 1;
    }
    let step = js_round((sample_count + 1) as f64 / columns as f64);
    if step >= 1.0 { step as usize } else { 1 }
}

/// Rounds halves toward positive infinity (so -2.5 becomes -2).
pub fn js_round(v: f64) -> f64 {
    (v + 0.5).floor()
}
