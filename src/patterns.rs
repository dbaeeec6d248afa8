// patterns.rs - Classic seed patterns, as offsets around an origin

use crate::grid::Cell;

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [Cell],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(-1, 0), (0, 0), (1, 0)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 0), (1, 0), (2, 0), (-1, 1), (0, 1), (1, 1)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(0, 0), (1, 0), (-1, 1), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (-4, -6), (-3, -6), (-2, -6), (2, -6), (3, -6), (4, -6),
            (-6, -4), (-1, -4), (1, -4), (6, -4),
            (-6, -3), (-1, -3), (1, -3), (6, -3),
            (-6, -2), (-1, -2), (1, -2), (6, -2),
            (-4, -1), (-3, -1), (-2, -1), (2, -1), (3, -1), (4, -1),
            // Bottom half (mirrored)
            (-4, 1), (-3, 1), (-2, 1), (2, 1), (3, 1), (4, 1),
            (-6, 2), (-1, 2), (1, 2), (6, 2),
            (-6, 3), (-1, 3), (1, 3), (6, 3),
            (-6, 4), (-1, 4), (1, 4), (6, 4),
            (-4, 6), (-3, 6), (-2, 6), (2, 6), (3, 6), (4, 6),
        ],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (-17, -2), (-17, -1), (-16, -2), (-16, -1),
            (-7, -2), (-7, -1), (-7, 0), (-6, -3), (-6, 1), (-5, -4), (-5, 2),
            (-4, -4), (-4, 2), (-3, -1), (-2, -3), (-2, 1), (-1, -2), (-1, -1),
            (-1, 0), (0, -1), (3, -4), (3, -3), (3, -2), (4, -4), (4, -3),
            (4, -2), (5, -5), (5, -1), (7, -6), (7, -5), (7, -1), (7, 0),
            (17, -4), (17, -3), (18, -4), (18, -3),
        ],
    },
];

/// Translates a pattern's offsets to absolute cells around `origin`.
pub fn place(pattern: &Pattern, origin: Cell) -> Vec<Cell> {
    pattern
        .cells
        .iter()
        .map(|&(dx, dy)| (origin.0 + dx, origin.1 + dy))
        .collect()
}
