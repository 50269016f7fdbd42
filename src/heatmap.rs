// Binning points into a fixed-size grid

use crate::data::DataPoint;
use crate::parser::AggregateFunc;
use anyhow::{bail, Result};

/// Upper bound on `width * height` for a single grid
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Validate grid dimensions, returning the cell count
pub fn check_grid_size(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        bail!("Grid dimensions must be at least 1x1 (got {}x{})", width, height);
    }
    match width.checked_mul(height) {
        Some(cells) if cells <= MAX_GRID_CELLS => Ok(cells),
        _ => bail!(
            "Grid dimensions {}x{} exceed the limit of {} cells",
            width,
            height,
            MAX_GRID_CELLS
        ),
    }
}

/// Linearly map `value` from `[in_min, in_max]` onto `[out_min, out_max]`
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Coordinate ranges covered by a point set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Scan the points. A flat axis is widened to a span of 1 so that
    /// mapping never divides by zero. Returns None for an empty slice.
    pub fn from_points(points: &[DataPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut bounds = Bounds {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for p in points {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_y = bounds.max_y.max(p.y);
        }

        if bounds.min_x == bounds.max_x {
            bounds.max_x = bounds.min_x + 1.0;
        }
        if bounds.min_y == bounds.max_y {
            bounds.max_y = bounds.min_y + 1.0;
        }
        Some(bounds)
    }

    /// Grid cell `(column, row)` for a point on a `width x height` grid
    pub fn cell(&self, x: f64, y: f64, width: usize, height: usize) -> (usize, usize) {
        (
            to_cell(map_range(x, self.min_x, self.max_x, 0.0, (width - 1) as f64), width),
            to_cell(map_range(y, self.min_y, self.max_y, 0.0, (height - 1) as f64), height),
        )
    }
}

/// Truncate toward zero, then clamp into `0..size`
fn to_cell(mapped: f64, size: usize) -> usize {
    (mapped as i64).clamp(0, size as i64 - 1) as usize
}

/// Aggregated `height x width` matrix, row 0 first
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<f64>,
    /// None when built from pre-computed rows
    bounds: Option<Bounds>,
}

impl Grid {
    fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0.0; width * height],
            bounds: None,
        }
    }

    /// Wrap pre-computed rows. Every row must have the same, non-zero length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            bail!("Empty grid provided");
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            bail!("Grid row {} has {} cells, expected {}", i, row.len(), width);
        }
        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
            bounds: None,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn get(&self, column: usize, row: usize) -> f64 {
        self.cells[row * self.width + column]
    }

    fn get_mut(&mut self, column: usize, row: usize) -> &mut f64 {
        &mut self.cells[row * self.width + column]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.cells.chunks(self.width)
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    /// Smallest and largest cell values
    pub fn value_range(&self) -> (f64, f64) {
        self.cells
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}

/// Bin `points` into a `width x height` grid, combining per cell with `func`.
///
/// Points without a value contribute nothing to Sum/Avg cells. Avg cells that
/// received no points stay at zero.
pub fn build_heatmap(
    points: &[DataPoint],
    width: usize,
    height: usize,
    func: AggregateFunc,
) -> Result<Grid> {
    let cells = check_grid_size(width, height)?;
    let bounds = match Bounds::from_points(points) {
        Some(b) => b,
        None => bail!("No data points to build a heatmap from"),
    };

    let mut grid = Grid::zeros(width, height);
    grid.bounds = Some(bounds);
    let mut counts = vec![0u64; cells];

    for point in points {
        let (column, row) = bounds.cell(point.x, point.y, width, height);
        match func {
            AggregateFunc::Count => *grid.get_mut(column, row) += 1.0,
            AggregateFunc::Sum | AggregateFunc::Avg => {
                if let Some(value) = point.value {
                    *grid.get_mut(column, row) += value;
                    counts[row * width + column] += 1;
                }
            }
        }
    }

    if func == AggregateFunc::Avg {
        for (cell, &count) in grid.cells.iter_mut().zip(&counts) {
            if count > 0 {
                *cell /= count as f64;
            }
        }
    }

    Ok(grid)
}
