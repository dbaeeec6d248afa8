// grid.rs - Sparse Game of Life state and rule engine

use std::collections::{HashMap, HashSet};

/// One cell position on the unbounded grid, in grid units (not pixels).
/// Two touches that quantize to the same column/row are the same cell.
pub type Cell = (i32, i32);

/// The set of currently-alive cells plus the rule to advance them.
///
/// The grid has no width or height - only alive cells and their direct
/// neighbors are ever examined, so it can grow in any direction. Bounding
/// is a rendering concern, not a simulation one.
pub struct Grid {
    alive: HashSet<Cell>,
}

impl Grid {
    pub fn new() -> Self {
        Self {
            alive: HashSet::new(),
        }
    }

    /// Adds cells to the alive set. Re-adding an alive cell is a no-op,
    /// so merging the same batch twice changes nothing.
    pub fn merge(&mut self, cells: impl IntoIterator<Item = Cell>) {
        for cell in cells {
            self.alive.insert(cell);
        }
    }

    /// Advances one generation.
    ///
    /// Counts live neighbors only for cells adjacent to at least one
    /// alive cell, then applies the classic rules and replaces the alive
    /// set wholesale. An empty grid steps to an empty grid.
    pub fn step(&mut self) {
        let mut neighbor_counts: HashMap<Cell, u32> = HashMap::new();
        for &cell in &self.alive {
            for neighbor in neighbors(cell) {
                *neighbor_counts.entry(neighbor).or_insert(0) += 1;
            }
        }

        let next = neighbor_counts
            .into_iter()
            .filter(|&(cell, count)| {
                match (self.alive.contains(&cell), count) {
                    (true, 2) | (true, 3) => true, // Survival
                    (false, 3) => true,            // Birth
                    _ => false,                    // Death or stays dead
                }
            })
            .map(|(cell, _)| cell)
            .collect();

        self.alive = next;
    }

    /// Copy of the alive set for rendering. The live set itself is never
    /// handed out.
    pub fn snapshot(&self) -> Vec<Cell> {
        self.alive.iter().copied().collect()
    }

    pub fn population(&self) -> usize {
        self.alive.len()
    }
}

fn neighbors((x, y): Cell) -> [Cell; 8] {
    [
        (x - 1, y - 1),
        (x, y - 1),
        (x + 1, y - 1),
        (x - 1, y),
        (x + 1, y),
        (x - 1, y + 1),
        (x, y + 1),
        (x + 1, y + 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut cells: Vec<Cell>) -> Vec<Cell> {
        cells.sort();
        cells
    }

    #[test]
    fn empty_grid_stays_empty() {
        let mut grid = Grid::new();
        grid.step();
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn merge_is_idempotent() {
        let cells = [(0, 0), (5, 3), (-2, 7)];
        let mut once = Grid::new();
        once.merge(cells);
        let mut twice = Grid::new();
        twice.merge(cells);
        twice.merge(cells);
        assert_eq!(sorted(once.snapshot()), sorted(twice.snapshot()));
    }

    #[test]
    fn merge_empty_is_noop() {
        let mut grid = Grid::new();
        grid.merge([(1, 1)]);
        grid.merge(Vec::new());
        assert_eq!(grid.snapshot(), vec![(1, 1)]);
    }

    #[test]
    fn blinker_oscillates() {
        // Vertical blinker flips horizontal after one step and back after
        // two.
        let vertical = vec![(1, 0), (1, 1), (1, 2)];
        let horizontal = vec![(0, 1), (1, 1), (2, 1)];

        let mut grid = Grid::new();
        grid.merge(vertical.clone());

        grid.step();
        assert_eq!(sorted(grid.snapshot()), sorted(horizontal));

        grid.step();
        assert_eq!(sorted(grid.snapshot()), sorted(vertical));
    }

    #[test]
    fn block_is_stable() {
        let block = vec![(10, 10), (10, 11), (11, 10), (11, 11)];
        let mut grid = Grid::new();
        grid.merge(block.clone());
        grid.step();
        assert_eq!(sorted(grid.snapshot()), sorted(block));
    }

    #[test]
    fn lone_cell_dies() {
        let mut grid = Grid::new();
        grid.merge([(3, 3)]);
        grid.step();
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn distant_cells_do_not_interact() {
        // The grid is unbounded; far-apart clusters evolve independently.
        let mut grid = Grid::new();
        grid.merge([
            (1_000_000, 1_000_000),
            (1_000_000, 1_000_001),
            (1_000_001, 1_000_000),
            (1_000_001, 1_000_001),
            (-500_000, -500_000),
        ]);
        grid.step();
        // The block survives, the lone cell dies.
        assert_eq!(grid.population(), 4);
    }
}
