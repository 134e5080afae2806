use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ai_core::Vec3;
use thiserror::Error;

use crate::{NavPath, Navigator};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid must be non-empty (got {width}x{height})")]
    Empty { width: u32, height: u32 },
    #[error("cell size must be > 0 (got {0})")]
    CellSize(f32),
}

/// Step order used when expanding a cell: -Z, +X, +Z, -X.
const STEPS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Walkability grid laid over the XZ plane of an arena.
///
/// Cell `(x, y)` covers world `x in [x*size, (x+1)*size)` and `z in [y*size, (y+1)*size)`.
/// Movement is 4-connected with unit cost, and searches are deterministic: the same grid and
/// endpoints always produce the same path.
#[derive(Debug, Clone)]
pub struct NavGrid {
    width: i32,
    height: i32,
    cell_size: f32,
    blocked: Vec<bool>,
}

impl NavGrid {
    pub fn new(width: u32, height: u32, cell_size: f32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty { width, height });
        }
        if cell_size.is_nan() || cell_size <= 0.0 {
            return Err(GridError::CellSize(cell_size));
        }
        Ok(Self {
            width: width as i32,
            height: height as i32,
            cell_size,
            blocked: vec![false; width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Out-of-bounds cells are ignored.
    pub fn set_blocked(&mut self, x: i32, y: i32, blocked: bool) {
        if let Some(idx) = self.index(x, y) {
            self.blocked[idx] = blocked;
        }
    }

    /// Out-of-bounds cells count as blocked.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map_or(true, |idx| self.blocked[idx])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let inside = (0..self.width).contains(&x) && (0..self.height).contains(&y);
        inside.then(|| (y * self.width + x) as usize)
    }

    fn coords(&self, idx: usize) -> (i32, i32) {
        let idx = idx as i32;
        (idx % self.width, idx / self.width)
    }

    fn locate(&self, p: Vec3) -> Option<usize> {
        let x = (p.x / self.cell_size).floor() as i32;
        let y = (p.z / self.cell_size).floor() as i32;
        self.index(x, y)
    }

    fn center(&self, idx: usize, height: f32) -> Vec3 {
        let (x, y) = self.coords(idx);
        Vec3::new(
            (x as f32 + 0.5) * self.cell_size,
            height,
            (y as f32 + 0.5) * self.cell_size,
        )
    }

    fn manhattan(&self, a: usize, b: usize) -> u32 {
        let (ax, ay) = self.coords(a);
        let (bx, by) = self.coords(b);
        ax.abs_diff(bx) + ay.abs_diff(by)
    }

    fn open_neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        let (x, y) = self.coords(idx);
        STEPS
            .into_iter()
            .filter_map(move |(dx, dy)| self.index(x + dx, y + dy))
            .filter(move |&n| !self.blocked[n])
    }

    /// A* over cell indices. Returns the cells from `start` to `goal` inclusive.
    fn search(&self, start: usize, goal: usize) -> Option<Vec<usize>> {
        if self.blocked[start] || self.blocked[goal] {
            return None;
        }

        let mut cost = vec![u32::MAX; self.blocked.len()];
        let mut parent = vec![usize::MAX; self.blocked.len()];
        // (f, g, insertion order, cell); `Reverse` turns the max-heap into a min-heap.
        let mut open = BinaryHeap::new();
        let mut order = 0u64;

        cost[start] = 0;
        open.push(Reverse((self.manhattan(start, goal), 0u32, order, start)));

        while let Some(Reverse((_, g, _, idx))) = open.pop() {
            if idx == goal {
                let mut cells = vec![goal];
                let mut at = goal;
                while at != start {
                    at = parent[at];
                    cells.push(at);
                }
                cells.reverse();
                return Some(cells);
            }
            if g > cost[idx] {
                continue;
            }

            for next in self.open_neighbors(idx) {
                let step = g + 1;
                if step >= cost[next] {
                    continue;
                }
                cost[next] = step;
                parent[next] = idx;
                order += 1;
                open.push(Reverse((step + self.manhattan(next, goal), step, order, next)));
            }
        }

        None
    }
}

impl Navigator for NavGrid {
    /// The path keeps the exact endpoints and passes through the centers of the cells between.
    fn find_path(&self, start: Vec3, goal: Vec3) -> Option<NavPath> {
        let cells = self.search(self.locate(start)?, self.locate(goal)?)?;

        let mut points = Vec::with_capacity(cells.len() + 1);
        points.push(start);
        if cells.len() > 2 {
            points.extend(
                cells[1..cells.len() - 1]
                    .iter()
                    .map(|&idx| self.center(idx, start.y)),
            );
        }
        points.push(goal);
        Some(NavPath::new(points))
    }

    fn nearest_point(&self, point: Vec3) -> Option<Vec3> {
        if let Some(idx) = self.locate(point) {
            if !self.blocked[idx] {
                return Some(point);
            }
        }

        // Ties resolve to the lowest cell index.
        let mut best: Option<(f32, Vec3)> = None;
        for idx in (0..self.blocked.len()).filter(|&i| !self.blocked[i]) {
            let center = self.center(idx, point.y);
            let d = (center - point).with_y(0.0).length_squared();
            if best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, center));
            }
        }
        best.map(|(_, p)| p)
    }
}
