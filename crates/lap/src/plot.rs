//! Histogram plots for analysis results.
//!
//! Binning is always available. Drawing needs the `plots` feature; without
//! it, or when drawing fails, an empty placeholder file is written so that
//! downstream pipeline steps still find their input.

use std::path::Path;

use tracing::{info, warn};

use crate::error::Result;
use crate::fsutil::touch;
use crate::table::DataTable;

/// Number of bins per histogram.
pub const DEFAULT_BINS: usize = 20;

/// One equal-width histogram bin. `end` is exclusive except for the last bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// A histogram panel drawn from one result column.
#[cfg_attr(not(feature = "plots"), allow(dead_code))]
#[derive(Debug, Clone, Copy)]
struct Panel {
    column: &'static str,
    label: &'static str,
    title: &'static str,
}

#[cfg_attr(not(feature = "plots"), allow(dead_code))]
const PANELS: [Panel; 2] = [
    Panel {
        column: "p_value",
        label: "P-value",
        title: "Distribution of P-values",
    },
    Panel {
        column: "effect_size",
        label: "Effect Size",
        title: "Distribution of Effect Sizes",
    },
];

/// Split `values` into `bins` equal-width bins spanning their range.
///
/// Non-finite values are ignored. A constant series gets a unit-wide range
/// centred on the value.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for v in finite {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }

    out
}

/// Write p-value and effect-size histograms for a results table.
///
/// Never fails because of plotting itself; only a failure to write the
/// placeholder file is returned.
pub fn create_analysis_plots(table: &DataTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    info!("Creating plots: {}", path.display());

    #[cfg(feature = "plots")]
    {
        crate::fsutil::create_output_directory(path)?;
        match svg::render(table, path) {
            Ok(()) => {
                info!("Plots saved to: {}", path.display());
                return Ok(());
            }
            Err(e) => tracing::error!("Plot generation failed: {}", e),
        }
    }

    #[cfg(not(feature = "plots"))]
    {
        let _ = table;
        warn!("Plotting support not available - skipping plot generation");
    }

    warn!("Writing empty placeholder: {}", path.display());
    touch(path)
}

#[cfg(feature = "plots")]
mod svg {
    use std::error::Error;
    use std::path::Path;

    use plotters::coord::Shift;
    use plotters::prelude::*;

    use super::{DEFAULT_BINS, PANELS, Panel, histogram};
    use crate::table::DataTable;

    const COLORS: [RGBColor; 2] = [BLUE, RGBColor(255, 165, 0)];

    pub(super) fn render(table: &DataTable, path: &Path) -> Result<(), Box<dyn Error>> {
        let root = SVGBackend::new(path, (1200, 500)).into_drawing_area();
        root.fill(&WHITE)?;

        let areas = root.split_evenly((1, 2));
        for ((area, panel), color) in areas.iter().zip(PANELS.iter()).zip(COLORS) {
            match table.column_f64(panel.column) {
                Some(values) if !values.is_empty() => draw_histogram(area, &values, panel, color)?,
                _ => draw_unavailable(area, panel)?,
            }
        }

        root.present()?;
        Ok(())
    }

    fn draw_histogram(
        area: &DrawingArea<SVGBackend<'_>, Shift>,
        values: &[f64],
        panel: &Panel,
        color: RGBColor,
    ) -> Result<(), Box<dyn Error>> {
        let bins = histogram(values, DEFAULT_BINS);
        let x_min = bins.first().map(|b| b.start).unwrap_or(0.0);
        let x_max = bins.last().map(|b| b.end).unwrap_or(1.0);
        let y_max = bins.iter().map(|b| b.count).max().unwrap_or(0) as f64 + 1.0;

        let mut chart = ChartBuilder::on(area)
            .caption(panel.title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(45)
            .build_cartesian_2d(x_min..x_max, 0.0..y_max)?;

        chart
            .configure_mesh()
            .x_desc(panel.label)
            .y_desc("Frequency")
            .draw()?;

        chart.draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], color.mix(0.7).filled())
        }))?;

        Ok(())
    }

    fn draw_unavailable(
        area: &DrawingArea<SVGBackend<'_>, Shift>,
        panel: &Panel,
    ) -> Result<(), Box<dyn Error>> {
        let (width, height) = area.dim_in_pixel();
        let inner = area.titled(
            &format!("{} Plot Not Available", panel.label),
            ("sans-serif", 20),
        )?;
        inner.draw(&Text::new(
            format!("No {} column found", panel.column),
            (width as i32 / 2 - 100, height as i32 / 2),
            ("sans-serif", 16).into_font(),
        ))?;
        Ok(())
    }
}
