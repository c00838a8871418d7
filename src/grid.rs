use std::fmt;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::debug;
use tracing::trace;

use crate::rule_set::RuleSet;

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("Grid dimensions must be positive with a representable cell count, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("Alive probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),
}

/// Offsets of the eight neighbors of a cell, as `(dx, dy)`.
///
/// left, right, up, down, then the four diagonals.
const NEIGHBORHOOD: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, 1),
    (0, -1),
    (-1, 1),
    (1, 1),
    (-1, -1),
    (1, -1),
];

/// A fixed size toroidal grid of cells.
///
/// Cell `(x, y)` lives on row `x` and column `y`. The grid is double buffered: `alive` is the
/// current generation and is the only buffer ever read when computing neighbors, `alive_next`
/// receives the next generation during [`Grid::compute_next_states`] and is copied over by
/// [`Grid::commit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,

    /// Current state, row major
    alive: Vec<bool>,

    /// Next state, row major
    alive_next: Vec<bool>,

    rules: RuleSet,

    /// Number of ticks since creation
    generation: u64,
}

impl Grid {
    /// Create a grid where every cell is dead
    pub fn new(rows: usize, columns: usize) -> Result<Self, GridError> {
        Self::validate(rows, columns, 0.0)?;

        let n = rows * columns;

        Ok(Self {
            rows,
            columns,
            alive: vec![false; n],
            alive_next: vec![false; n],
            rules: RuleSet::default(),
            generation: 0,
        })
    }

    /// Create a grid where each cell starts alive with probability `alive_probability`, drawn
    /// from a `ChaCha8Rng` seeded with `seed`. The same seed always yields the same grid.
    ///
    /// ```
    /// use torus_life::grid::Grid;
    ///
    /// let a = Grid::initialize(16, 16, 0.15, 7).unwrap();
    /// let b = Grid::initialize(16, 16, 0.15, 7).unwrap();
    ///
    /// assert_eq!(a, b);
    /// ```
    pub fn initialize(
        rows: usize,
        columns: usize,
        alive_probability: f64,
        seed: u64,
    ) -> Result<Self, GridError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        Self::random(rows, columns, alive_probability, &mut rng)
    }

    /// Like [`Grid::initialize`], drawing from the given random source.
    ///
    /// Cells are drawn row by row, one Bernoulli trial each.
    pub fn random<R: Rng + ?Sized>(
        rows: usize,
        columns: usize,
        alive_probability: f64,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        Self::validate(rows, columns, alive_probability)?;

        let alive: Vec<bool> = (0..rows * columns)
            .map(|_| rng.gen_bool(alive_probability))
            .collect();

        let grid = Self {
            rows,
            columns,
            alive_next: alive.clone(),
            alive,
            rules: RuleSet::default(),
            generation: 0,
        };

        debug!(
            rows,
            columns,
            alive_probability,
            population = grid.population(),
            "initialized grid"
        );

        Ok(grid)
    }

    /// Reject configurations no grid can be built from.
    pub fn validate(rows: usize, columns: usize, alive_probability: f64) -> Result<(), GridError> {
        // both buffers hold `rows * columns` cells
        if rows == 0 || columns == 0 || rows.checked_mul(columns).is_none() {
            return Err(GridError::InvalidDimensions { rows, columns });
        }

        // NaN is not contained in any range
        if !(0.0..=1.0).contains(&alive_probability) {
            return Err(GridError::InvalidProbability(alive_probability));
        }

        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.alive[self.xy_from(x, y)]
    }

    /// The state computed for the next generation. Equal to [`Grid::is_alive`] right after a
    /// commit.
    pub fn is_alive_next(&self, x: usize, y: usize) -> bool {
        self.alive_next[self.xy_from(x, y)]
    }

    /// Set a cell in both buffers, so the grid stays consistent until the next tick.
    pub fn set_alive(&mut self, x: usize, y: usize, alive: bool) {
        let i = self.xy_from(x, y);

        self.alive[i] = alive;
        self.alive_next[i] = alive;
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.alive.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of every live cell, row by row
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(i, _)| self.xy_to(i))
    }

    /// Counts the live cells among the eight neighbors of `(x, y)`. Neighbors past an edge wrap
    /// around to the opposite edge.
    pub fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.rows, "x is out of bounds");
        assert!(y < self.columns, "y is out of bounds");

        let mut n = 0;

        for (dx, dy) in NEIGHBORHOOD {
            let nx = wrap(x, dx, self.rows);
            let ny = wrap(y, dy, self.columns);

            if self.alive[self.xy_from(nx, ny)] {
                n += 1;
            }
        }

        n
    }

    /// Evaluate phase. Computes every cell's next state from the current generation. No current
    /// state is modified, so the order cells are visited in does not matter.
    pub fn compute_next_states(&mut self) {
        for x in 0..self.rows {
            for y in 0..self.columns {
                let n = self.count_live_neighbors(x, y);
                let i = self.xy_from(x, y);

                self.alive_next[i] = self.rules.next_state(self.alive[i], n);
            }
        }
    }

    /// Commit phase. Makes the computed next states current.
    pub fn commit(&mut self) {
        self.alive.copy_from_slice(&self.alive_next);
    }

    /// Advance the grid by one generation
    pub fn tick(&mut self) {
        self.compute_next_states();
        self.commit();

        self.generation += 1;

        trace!(
            generation = self.generation,
            population = self.population(),
            "tick"
        );
    }

    fn xy_to(&self, i: usize) -> (usize, usize) {
        (i / self.columns, i % self.columns)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        assert!(x < self.rows, "x is out of bounds");
        assert!(y < self.columns, "y is out of bounds");

        x * self.columns + y
    }
}

/// Step `i` by `d` on a ring of length `n`
fn wrap(i: usize, d: isize, n: usize) -> usize {
    (i as isize + d).rem_euclid(n as isize) as usize
}

impl fmt::Display for Grid {
    /// One line per row, `#` for live cells and `.` for dead ones
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for x in 0..self.rows {
            for y in 0..self.columns {
                let c = if self.is_alive(x, y) { '#' } else { '.' };
                write!(f, "{c}")?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::Grid;
    use super::GridError;
    use super::NEIGHBORHOOD;
    use super::wrap;

    #[test]
    fn wrap_edges() {
        assert_eq!(wrap(0, -1, 5), 4);
        assert_eq!(wrap(4, 1, 5), 0);
        assert_eq!(wrap(2, 1, 5), 3);
        assert_eq!(wrap(0, 1, 1), 0);
    }

    #[test]
    fn corner_sees_opposite_corner() {
        let mut grid = Grid::new(6, 4).unwrap();
        grid.set_alive(5, 3, true);

        assert_eq!(grid.count_live_neighbors(0, 0), 1);
        assert_eq!(grid.count_live_neighbors(5, 3), 0);
    }

    #[test]
    fn full_grid_has_eight_neighbors_everywhere() {
        let grid = Grid::initialize(4, 7, 1.0, 0).unwrap();

        for x in 0..4 {
            for y in 0..7 {
                assert_eq!(grid.count_live_neighbors(x, y), 8);
            }
        }
    }

    #[test]
    fn transitions_by_neighbor_count() {
        for alive in [true, false] {
            for k in 0..=8 {
                let mut grid = Grid::new(5, 5).unwrap();
                grid.set_alive(2, 2, alive);

                for &(dx, dy) in &NEIGHBORHOOD[..k] {
                    grid.set_alive((2 + dx) as usize, (2 + dy) as usize, true);
                }

                assert_eq!(grid.count_live_neighbors(2, 2) as usize, k);

                grid.compute_next_states();

                let want = match (alive, k) {
                    (true, 2 | 3) => true,
                    (false, 3) => true,
                    _ => false,
                };

                assert_eq!(grid.is_alive_next(2, 2), want, "alive: {alive}, neighbors: {k}");
            }
        }
    }

    #[test]
    fn evaluate_does_not_touch_current_state() {
        let mut grid = Grid::new(5, 5).unwrap();
        for y in 1..4 {
            grid.set_alive(2, y, true);
        }

        let before = grid.to_string();
        grid.compute_next_states();

        assert_eq!(grid.to_string(), before);
        assert!(grid.is_alive_next(1, 2));
        assert!(!grid.is_alive_next(2, 1));

        grid.commit();

        assert!(grid.is_alive(1, 2));
        assert!(!grid.is_alive(2, 1));
        assert_eq!(grid.generation(), 0);
    }

    #[test]
    fn rejects_bad_configuration() {
        assert_eq!(
            Grid::new(0, 3),
            Err(GridError::InvalidDimensions {
                rows: 0,
                columns: 3
            })
        );
        assert_eq!(
            Grid::initialize(3, 3, 1.5, 0),
            Err(GridError::InvalidProbability(1.5))
        );
        assert!(matches!(
            Grid::initialize(3, 3, f64::NAN, 0),
            Err(GridError::InvalidProbability(_))
        ));
    }

    #[test]
    fn rejects_cell_count_overflow() {
        let side = usize::MAX / 2;

        assert_eq!(
            Grid::validate(side, 3, 0.5),
            Err(GridError::InvalidDimensions {
                rows: side,
                columns: 3
            })
        );
        assert!(Grid::new(side, 3).is_err());
    }

    #[test]
    fn live_cells_row_major() {
        let mut grid = Grid::new(3, 4).unwrap();
        grid.set_alive(2, 1, true);
        grid.set_alive(0, 3, true);

        let cells: Vec<_> = grid.live_cells().collect();

        assert_eq!(cells, vec![(0, 3), (2, 1)]);
        assert_eq!(grid.population(), 2);
    }

    #[test]
    fn display() {
        let mut grid = Grid::new(2, 3).unwrap();
        grid.set_alive(0, 1, true);
        grid.set_alive(1, 2, true);

        assert_eq!(grid.to_string(), ".#.\n..#\n");
    }
}
