// Terminal rendering of a finished grid

use crate::heatmap::{map_range, Grid};
use anyhow::{Context, Result};
use std::io::Write;

/// Intensity levels, lowest first
pub const INTENSITY_CHARS: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// Character for a value normalised to `[0, 1]`
pub fn intensity_char(normalized: f64) -> char {
    let last = INTENSITY_CHARS.len() - 1;
    let index = (normalized * last as f64) as i64;
    INTENSITY_CHARS[index.clamp(0, last as i64) as usize]
}

/// Cell value range used for shading. A uniform grid is shifted so every
/// cell renders at full intensity.
fn shading_range(grid: &Grid) -> (f64, f64) {
    let (min, max) = grid.value_range();
    if min == max {
        (min - 1.0, max)
    } else {
        (min, max)
    }
}

/// Write the grid as rows of intensity characters, row 0 first.
/// With a `legend` label, a legend follows the map.
pub fn render_heatmap<W: Write>(out: &mut W, grid: &Grid, legend: Option<&str>) -> Result<()> {
    let (min, max) = shading_range(grid);

    for row in grid.rows() {
        let line: String = row
            .iter()
            .map(|&v| intensity_char(map_range(v, min, max, 0.0, 1.0)))
            .collect();
        writeln!(out, "{}", line).context("Failed to write heatmap")?;
    }

    if let Some(label) = legend {
        write_legend(out, grid, label, min, max).context("Failed to write legend")?;
    }

    Ok(())
}

fn write_legend<W: Write>(out: &mut W, grid: &Grid, label: &str, min: f64, max: f64) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Legend: {}", label)?;

    let steps = (INTENSITY_CHARS.len() - 1) as f64;
    for (i, c) in INTENSITY_CHARS.iter().enumerate() {
        let lower = map_range(i as f64, 0.0, steps, min, max);
        if i + 1 < INTENSITY_CHARS.len() {
            let upper = map_range((i + 1) as f64, 0.0, steps, min, max);
            writeln!(out, "'{}' [{:.2}; {:.2})", c, lower, upper)?;
        } else {
            writeln!(out, "'{}' [{:.2}]", c, lower)?;
        }
    }

    if let Some(b) = grid.bounds() {
        writeln!(
            out,
            "x: [{:.2}; {:.2}]  y: [{:.2}; {:.2}]",
            b.min_x, b.max_x, b.min_y, b.max_y
        )?;
    }
    Ok(())
}
