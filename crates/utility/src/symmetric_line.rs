use crate::*;

/// Tran-Thong line rasterization.
///
/// Walks from `start` to `end`, both inclusive, in king steps, one square per step along the major axis.
/// Unlike plain Bresenham, the error term starts biased by the direction of the y step, which makes
/// the line from `end` to `start` exactly this line reversed.
///
/// Thong, Tran. "A symmetric linear algorithm for line segment generation."
/// Computers & Graphics 6.1 (1982): 15-17.
#[derive(Debug, Clone)]
pub struct SymmetricLine {
    current: WorldSquare,
    major_step: WorldStep,
    minor_step: WorldStep,
    major_delta: i32,
    minor_delta: i32,
    test: i32,
    steps_remaining: u32,
    start_pending: bool,
}

impl SymmetricLine {
    pub fn new(start: WorldSquare, end: WorldSquare) -> Self {
        let (delta_x, sign_x) = Self::difference(start.x, end.x);
        let (delta_y, sign_y) = Self::difference(start.y, end.y);

        let bias = if sign_y == 1 { -1 } else { 0 };

        let x_major = delta_x >= delta_y;
        let (major_delta, minor_delta, major_step, minor_step) = if x_major {
            (delta_x, delta_y, vec2(sign_x, 0), vec2(0, sign_y))
        } else {
            (delta_y, delta_x, vec2(0, sign_y), vec2(sign_x, 0))
        };

        SymmetricLine {
            current: start,
            major_step,
            minor_step,
            major_delta,
            minor_delta,
            test: (major_delta + bias) >> 1,
            steps_remaining: major_delta as u32,
            start_pending: true,
        }
    }

    // zero counts as positive
    fn difference(from: i32, to: i32) -> (i32, i32) {
        if to >= from {
            (to - from, 1)
        } else {
            (from - to, -1)
        }
    }
}

impl Iterator for SymmetricLine {
    type Item = WorldSquare;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start_pending {
            self.start_pending = false;
            return Some(self.current);
        }
        if self.steps_remaining == 0 {
            return None;
        }
        self.steps_remaining -= 1;

        self.test -= self.minor_delta;
        self.current += self.major_step;
        if self.test < 0 {
            self.current += self.minor_step;
            self.test += self.major_delta;
        }
        Some(self.current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.steps_remaining as usize + self.start_pending as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SymmetricLine {}

pub fn symmetric_line(start: WorldSquare, end: WorldSquare) -> SquareList {
    SymmetricLine::new(start, end).collect()
}
