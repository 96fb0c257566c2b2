//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal or CI log
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - daily points: `*`
//! - sales line: `-`
//! - price-increase marker: `|` column

use crate::chart::{ChartSpec, date_to_x};

/// Render a chart specification as text.
pub fn render_ascii_chart(chart: &ChartSpec, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (d0, d1) = chart.x_bounds();
    let (x_min, x_max) = (date_to_x(d0), date_to_x(d1));
    let (y_min, y_max) = chart.y_bounds();
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Marker first, so the series draws over it.
    let mx = map_x(date_to_x(chart.marker.date), x_min, x_max, width);
    for row in grid.iter_mut() {
        row[mx] = '|';
    }

    let points: Vec<(usize, usize)> = chart
        .series
        .iter()
        .map(|p| {
            (
                map_x(date_to_x(p.date), x_min, x_max, width),
                map_y(p.sales, y_min, y_max, height),
            )
        })
        .collect();

    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        draw_line(&mut grid, x0, y0, x1, y1, '-');
    }
    for &(x, y) in &points {
        grid[y][x] = '*';
    }

    let mut out = String::new();
    out.push_str(&chart.title);
    out.push('\n');
    out.push_str(&format!(
        "Plot: date=[{d0}, {d1}] | sales=[{y_min:.2}, {y_max:.2}] | marker: {}\n",
        chart.marker.label
    ));

    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    if chart.series.is_empty() {
        out.push_str("(no sales for this selection)\n");
    }

    out
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Only fills blank or marker cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            let cell = &mut grid[y0 as usize][x0 as usize];
            if *cell == ' ' || *cell == '|' {
                *cell = ch;
            }
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::chart::compute_chart;
    use crate::domain::{Region, RegionFilter, SalesRecord};
    use crate::io::dataset::Dataset;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn plot_golden_snapshot_small() {
        // Days 10..=15 map onto columns 0, 2, 4, 6, 8, 10 of an 11-wide grid.
        let ds = Dataset::from_records(vec![
            SalesRecord { sales: 10.0, date: ymd(2021, 1, 10), region: Region::North },
            SalesRecord { sales: 0.0, date: ymd(2021, 1, 15), region: Region::North },
        ]);
        let chart = compute_chart(&ds, RegionFilter::North);

        let txt = render_ascii_chart(&chart, 11, 5);
        let expected = concat!(
            "Pink Morsel Sales Over Time (North)\n",
            "Plot: date=[2021-01-10, 2021-01-15] | sales=[-0.50, 10.50] | marker: Price Increase (Jan 15, 2021)\n",
            "*-        |\n",
            "  --      |\n",
            "    ---   |\n",
            "       -- |\n",
            "         -*\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_selection_still_shows_marker() {
        let chart = compute_chart(&Dataset::default(), RegionFilter::East);
        let txt = render_ascii_chart(&chart, 11, 5);
        let rows: Vec<_> = txt.lines().skip(2).take(5).collect();
        assert!(rows.iter().all(|r| *r == "     |"));
        assert!(txt.ends_with("(no sales for this selection)\n"));
    }
}
