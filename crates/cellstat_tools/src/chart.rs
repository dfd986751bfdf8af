//! SVG rendering.

use crate::surrounded::GroupedBars;
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

/// Fraction of a category slot covered by its bars.
const GROUP_WIDTH: f64 = 0.8;

fn hue_color(idx: usize) -> RGBAColor {
    Palette99::pick(idx).to_rgba()
}

/// Grouped bar chart of mean rates with 95% interval error bars.
pub fn render_grouped_bars(
    out_path: &Path,
    bars: &GroupedBars,
    legend_title: &str,
    y_desc: &str,
    size: (u32, u32),
) -> Result<()> {
    let n_groups = bars.groups.len().max(1);
    let n_hues = bars.hues.len().max(1);
    let slot = GROUP_WIDTH / n_hues as f64;

    let y_max = bars
        .groups
        .iter()
        .flat_map(|g| &g.bars)
        .map(|b| b.mean + b.error)
        .filter(|v| v.is_finite())
        .fold(0.0f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let root = SVGBackend::new(out_path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(n_groups as f64 - 0.5), 0.0f64..y_max)?;

    let labels: Vec<&str> = bars.groups.iter().map(|g| g.label.as_str()).collect();
    let x_label = |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).map(|l| l.to_string()).unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n_groups)
        .x_label_formatter(&x_label)
        .y_desc(y_desc)
        .draw()?;

    for (hue_idx, hue) in bars.hues.iter().enumerate() {
        let color = hue_color(hue_idx);
        let offset = -GROUP_WIDTH / 2.0 + slot * hue_idx as f64;
        let placed: Vec<(f64, f64, f64)> = bars
            .groups
            .iter()
            .enumerate()
            .flat_map(|(group_idx, group)| {
                group
                    .bars
                    .iter()
                    .filter(move |b| b.hue == hue_idx)
                    .map(move |b| (group_idx as f64 + offset, b.mean, b.error))
            })
            .filter(|(_, mean, _)| mean.is_finite())
            .collect();

        chart
            .draw_series(placed.iter().map(|&(x0, mean, _)| {
                Rectangle::new([(x0, 0.0), (x0 + slot, mean)], color.mix(0.8).filled())
            }))?
            .label(format!("{legend_title} = {hue}"))
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));

        chart.draw_series(placed.iter().map(|&(x0, mean, error)| {
            ErrorBar::new_vertical(
                x0 + slot / 2.0,
                mean - error,
                mean,
                mean + error,
                BLACK.stroke_width(1),
                8,
            )
        }))?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Line chart of `series` on a logarithmic y axis. Points whose value is not
/// positive are left out.
pub fn render_log_line(
    out_path: &Path,
    series: &[(f64, f64)],
    caption: &str,
    x_desc: &str,
    y_desc: &str,
    size: (u32, u32),
) -> Result<()> {
    let points: Vec<(f64, f64)> = series
        .iter()
        .copied()
        .filter(|&(x, y)| x.is_finite() && y.is_finite() && y > 0.0)
        .collect();

    let x_max = points.iter().map(|p| p.0).fold(0.0f64, f64::max).max(1.0);
    let y_min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let y_max = points.iter().map(|p| p.1).fold(0.0f64, f64::max);
    let (y_lo, y_hi) = if y_min.is_finite() && y_max > 0.0 {
        (y_min / 2.0, y_max * 2.0)
    } else {
        (0.1, 1.0)
    };

    let root = SVGBackend::new(out_path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0f64..x_max, (y_lo..y_hi).log_scale())?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;

    chart.draw_series(LineSeries::new(points, &BLUE))?;

    root.present()?;
    Ok(())
}
