use std::time::Duration;

use thiserror::Error;

use crate::grid::Grid;

#[derive(Debug, Error, PartialEq)]
pub enum PresenterError {
    #[error("Frame rate must be positive, got {0}")]
    InvalidFps(u32),
}

/// An axis aligned square in normalized device coordinates, where both axes span `[-1, 1]` and
/// `+1` on the vertical axis is the top of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    /// Bottom left corner
    pub min: [f32; 2],

    /// Top right corner
    pub max: [f32; 2],
}

impl Quad {
    /// The slot of cell `(x, y)` on a `rows` by `columns` grid. `x` runs along the horizontal
    /// axis and `y` along the vertical one, so the whole grid exactly covers the viewport.
    pub fn for_cell(x: usize, y: usize, rows: usize, columns: usize) -> Self {
        // position and size as a fraction of the board, then scaled to a range of 2
        let to_ndc = |i: usize, n: usize| {
            let size = 1.0 / n as f32;
            let position = i as f32 * size;

            (position * 2.0 - 1.0, (position + size) * 2.0 - 1.0)
        };

        let (x0, x1) = to_ndc(x, rows);
        let (y0, y1) = to_ndc(y, columns);

        Self {
            min: [x0, y0],
            max: [x1, y1],
        }
    }
}

/// Something draw calls can be issued to.
pub trait Surface {
    /// Forget everything drawn last frame
    fn clear(&mut self);

    /// Fill a quad
    fn fill(&mut self, quad: &Quad);
}

/// Draws a [`Grid`] onto a [`Surface`] and paces ticks to a fixed rate.
#[derive(Clone, Copy, Debug)]
pub struct Presenter {
    frame_time: Duration,
}

impl Presenter {
    pub fn new(fps: u32) -> Result<Self, PresenterError> {
        if fps == 0 {
            return Err(PresenterError::InvalidFps(fps));
        }

        Ok(Self {
            frame_time: Duration::from_secs(1) / fps,
        })
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// How long to sleep after a tick that took `elapsed`
    pub fn time_left(&self, elapsed: Duration) -> Duration {
        self.frame_time.saturating_sub(elapsed)
    }

    /// Clears the surface and issues one fill per live cell. Dead cells draw nothing.
    ///
    /// Returns the number of cells drawn.
    pub fn draw<S: Surface + ?Sized>(&self, grid: &Grid, surface: &mut S) -> usize {
        surface.clear();

        let (rows, columns) = (grid.rows(), grid.columns());
        let mut drawn = 0;

        for (x, y) in grid.live_cells() {
            surface.fill(&Quad::for_cell(x, y, rows, columns));
            drawn += 1;
        }

        drawn
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::Presenter;
    use super::PresenterError;
    use super::Quad;

    #[test]
    fn corner_quads() {
        let q = Quad::for_cell(0, 0, 4, 2);
        assert_eq!(q.min, [-1.0, -1.0]);
        assert_eq!(q.max, [-0.5, 0.0]);

        let q = Quad::for_cell(3, 1, 4, 2);
        assert_eq!(q.min, [0.5, 0.0]);
        assert_eq!(q.max, [1.0, 1.0]);
    }

    #[test]
    fn pacing() {
        let p = Presenter::new(2).unwrap();

        assert_eq!(p.frame_time(), Duration::from_millis(500));
        assert_eq!(p.time_left(Duration::from_millis(200)), Duration::from_millis(300));
        assert_eq!(p.time_left(Duration::from_secs(3)), Duration::ZERO);
    }

    #[test]
    fn zero_fps_rejected() {
        assert_eq!(Presenter::new(0).unwrap_err(), PresenterError::InvalidFps(0));
    }
}
