//! Digital line walk over the map grid.
//!
//! Both line-of-sight strategies sample terrain at evenly spaced points
//! between two cells.  The walk takes `max(|dx|, |dy|)` steps and visits the
//! interior points only: neither endpoint is yielded, since the source and
//! the observer never obstruct themselves.  Intermediate coordinates are the
//! start plus the scaled delta, truncated toward zero.

/// One sampled cell on a [`GridWalk`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridStep {
    pub x:     i32,
    pub y:     i32,
    /// Index of this step, `1..steps`.
    pub index: u32,
    /// Total number of steps in the walk.
    pub steps: u32,
}

impl GridStep {
    /// Fraction of the way from start to end, in `(0, 1)`.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.index as f32 / self.steps as f32
    }
}

/// Iterator over the interior cells between two grid points.
#[derive(Clone, Debug)]
pub struct GridWalk {
    x0:     i32,
    y0:     i32,
    step_x: f64,
    step_y: f64,
    steps:  u32,
    next:   u32,
}

impl GridWalk {
    pub fn new(from: (i32, i32), to: (i32, i32)) -> Self {
        let dx = i64::from(to.0) - i64::from(from.0);
        let dy = i64::from(to.1) - i64::from(from.1);
        // Two `i32` coordinates are never more than `u32::MAX` apart.
        let steps = dx.unsigned_abs().max(dy.unsigned_abs()) as u32;
        let (step_x, step_y) = if steps == 0 {
            (0.0, 0.0)
        } else {
            (dx as f64 / f64::from(steps), dy as f64 / f64::from(steps))
        };
        Self { x0: from.0, y0: from.1, step_x, step_y, steps, next: 1 }
    }

    /// Total steps between the endpoints (Chebyshev distance).
    #[inline]
    pub fn steps(&self) -> u32 {
        self.steps
    }
}

/// `start + i·step`, truncated toward zero and kept on the grid.
#[inline]
fn offset(start: i32, i: u32, step: f64) -> i32 {
    let v = i64::from(start) + (f64::from(i) * step) as i64;
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl Iterator for GridWalk {
    type Item = GridStep;

    fn next(&mut self) -> Option<GridStep> {
        if self.next >= self.steps {
            return None;
        }
        let i = self.next;
        self.next += 1;
        Some(GridStep {
            x:     offset(self.x0, i, self.step_x),
            y:     offset(self.y0, i, self.step_y),
            index: i,
            steps: self.steps,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.steps.saturating_sub(self.next) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for GridWalk {}
