//! Arena construction from a grid of cells.
//!
//! Obstacle cells are grown into maximal straight runs (horizontal, vertical
//! and optionally both diagonals). Runs contained in an already accepted run
//! are dropped; accepted runs contained in a new one are replaced by it, so
//! each wall ends up as one maximal segment.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{Arena, NavigationArena};
use crate::core::{DoubleRange, SimError, SimResult};
use crate::geometry::{Point, Segment};

/// Symbol for an empty cell in a text grid.
pub const EMPTY_CELL: char = '.';
/// Symbol for an obstacle cell in a text grid.
pub const OBSTACLE_CELL: char = 'w';
/// Symbol for the robot start cell in a text grid.
pub const START_CELL: char = 's';
/// Symbol for the target cell in a text grid.
pub const TARGET_CELL: char = 't';

/// A rectangular, row-major grid of cells. `(x, y)` is (column, row).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `value`.
    #[must_use]
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    /// Build a grid from rows, which must be non-empty and of equal length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> SimResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(SimError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(SimError::RaggedGrid {
                    row,
                    len: values.len(),
                    expected: width,
                });
            }
            cells.extend(values);
        }

        Ok(Self { width, height, cells })
    }
}

impl<T> Grid<T> {
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = value;
        }
    }

    /// Iterate over `((x, y), cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i % width, i / width), cell))
    }

    /// Map every cell, keeping the layout.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl Grid<char> {
    /// Parse a text grid; rows are separated by `|` or newlines.
    pub fn parse(text: &str) -> SimResult<Self> {
        let rows: Vec<Vec<char>> = text
            .split(|c| c == '|' || c == '\n')
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .map(|row| row.chars().collect())
            .collect();
        Self::from_rows(rows)
    }
}

type Cell = (usize, usize);

const STRAIGHT: [(isize, isize); 2] = [(1, 0), (0, 1)];
const DIAGONAL: [(isize, isize); 2] = [(1, 1), (1, -1)];

/// A maximal run of obstacle cells, ordered along `direction`.
#[derive(Clone, Debug)]
struct GridLine {
    cells: Vec<Cell>,
    direction: (isize, isize),
}

fn step(grid: &Grid<bool>, (x, y): Cell, (dx, dy): (isize, isize)) -> Option<Cell> {
    let nx = x.checked_add_signed(dx)?;
    let ny = y.checked_add_signed(dy)?;
    match grid.get(nx, ny) {
        Some(true) => Some((nx, ny)),
        _ => None,
    }
}

fn grow(grid: &Grid<bool>, cell: Cell, direction: (isize, isize)) -> GridLine {
    let backwards = (-direction.0, -direction.1);
    let mut first = cell;
    while let Some(previous) = step(grid, first, backwards) {
        first = previous;
    }

    let mut cells = vec![first];
    let mut current = first;
    while let Some(next) = step(grid, current, direction) {
        cells.push(next);
        current = next;
    }

    GridLine { cells, direction }
}

/// Accepted lines, indexed by the cells they cover.
#[derive(Default)]
struct LineSet {
    lines: Vec<Option<GridLine>>,
    by_cell: FxHashMap<Cell, SmallVec<[usize; 4]>>,
}

impl LineSet {
    fn covers(&self, line: &GridLine) -> bool {
        let Some(candidates) = self.by_cell.get(&line.cells[0]) else {
            return false;
        };
        candidates.iter().any(|&id| {
            line.cells
                .iter()
                .all(|cell| self.by_cell.get(cell).is_some_and(|ids| ids.contains(&id)))
        })
    }

    fn insert(&mut self, line: GridLine) {
        let members: FxHashSet<Cell> = line.cells.iter().copied().collect();
        let mut contained: SmallVec<[usize; 8]> = SmallVec::new();
        for cell in &line.cells {
            for &id in self.by_cell.get(cell).into_iter().flatten() {
                if contained.contains(&id) {
                    continue;
                }
                let inside = self.lines[id]
                    .as_ref()
                    .is_some_and(|old| old.cells.iter().all(|c| members.contains(c)));
                if inside {
                    contained.push(id);
                }
            }
        }

        for id in contained {
            if let Some(old) = self.lines[id].take() {
                for cell in &old.cells {
                    if let Some(ids) = self.by_cell.get_mut(cell) {
                        ids.retain(|other| *other != id);
                    }
                }
            }
        }

        let id = self.lines.len();
        for cell in &line.cells {
            self.by_cell.entry(*cell).or_default().push(id);
        }
        self.lines.push(Some(line));
    }

    fn into_lines(self) -> impl Iterator<Item = GridLine> {
        self.lines.into_iter().flatten()
    }
}

fn merge_lines(grid: &Grid<bool>, diagonals: bool) -> Vec<GridLine> {
    let directions: SmallVec<[(isize, isize); 4]> = if diagonals {
        STRAIGHT.iter().chain(DIAGONAL.iter()).copied().collect()
    } else {
        STRAIGHT.iter().copied().collect()
    };

    let mut set = LineSet::default();
    for (cell, &obstacle) in grid.iter() {
        if !obstacle {
            continue;
        }
        for &direction in &directions {
            let line = grow(grid, cell, direction);
            if !set.covers(&line) {
                set.insert(line);
            }
        }
    }
    set.into_lines().collect()
}

fn touches_boundary(grid: &Grid<bool>, (x, y): Cell, (ox, oy): (isize, isize)) -> bool {
    (ox < 0 && x == 0)
        || (ox > 0 && x + 1 == grid.width())
        || (oy < 0 && y == 0)
        || (oy > 0 && y + 1 == grid.height())
}

fn cell_center((x, y): Cell, side: f64) -> Point {
    Point::new((x as f64 + 0.5) * side, (y as f64 + 0.5) * side)
}

fn line_to_segment(grid: &Grid<bool>, line: &GridLine, side: f64) -> Segment {
    let first = line.cells[0];
    let last = line.cells[line.cells.len() - 1];

    if line.cells.len() == 1 {
        let center = cell_center(first, side);
        return Segment::new(
            center.translate(-side / 2.0, 0.0),
            center.translate(side / 2.0, 0.0),
        );
    }

    let (dx, dy) = line.direction;
    let half = Point::new(dx as f64, dy as f64) * (side / 2.0);
    let mut p1 = cell_center(first, side);
    let mut p2 = cell_center(last, side);
    if touches_boundary(grid, first, (-dx, -dy)) {
        p1 = p1 - half;
    }
    if touches_boundary(grid, last, (dx, dy)) {
        p2 = p2 + half;
    }
    Segment::new(p1, p2)
}

impl Arena {
    /// Build an arena from an obstacle grid with square cells of side
    /// `cell_side`. Extents are the grid dimensions times `cell_side`.
    pub fn from_obstacle_grid(grid: &Grid<bool>, cell_side: f64, diagonals: bool) -> SimResult<Self> {
        let obstacles = merge_lines(grid, diagonals)
            .iter()
            .map(|line| line_to_segment(grid, line, cell_side))
            .collect();
        tracing::debug!(
            width = grid.width(),
            height = grid.height(),
            "built arena from obstacle grid"
        );
        Arena::new(
            grid.width() as f64 * cell_side,
            grid.height() as f64 * cell_side,
            obstacles,
        )
    }
}

impl NavigationArena {
    /// Build a navigation arena from a text grid.
    ///
    /// Exactly one start cell and one target cell are required; both
    /// positions collapse to the center of their cell.
    pub fn from_text_grid(text: &str, cell_side: f64, diagonals: bool) -> SimResult<Self> {
        Self::from_char_grid(&Grid::parse(text)?, cell_side, diagonals)
    }

    /// Build a navigation arena from a grid of cell symbols.
    pub fn from_char_grid(grid: &Grid<char>, cell_side: f64, diagonals: bool) -> SimResult<Self> {
        let mut starts = Vec::new();
        let mut targets = Vec::new();
        for ((x, y), &symbol) in grid.iter() {
            match symbol {
                EMPTY_CELL | OBSTACLE_CELL => {}
                START_CELL => starts.push((x, y)),
                TARGET_CELL => targets.push((x, y)),
                other => return Err(SimError::UnknownGridSymbol { symbol: other, x, y }),
            }
        }
        if starts.len() != 1 {
            return Err(SimError::StartCellCount(starts.len()));
        }
        if targets.len() != 1 {
            return Err(SimError::TargetCellCount(targets.len()));
        }

        let arena = Arena::from_obstacle_grid(&grid.map(|c| *c == OBSTACLE_CELL), cell_side, diagonals)?;
        let start = cell_center(starts[0], cell_side);
        let target = cell_center(targets[0], cell_side);
        Ok(NavigationArena::new(
            arena,
            DoubleRange::point(start.x),
            DoubleRange::point(start.y),
            DoubleRange::point(target.x),
            DoubleRange::point(target.y),
        ))
    }
}
