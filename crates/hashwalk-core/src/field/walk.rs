use crate::generator::BoundedGenerator;

/// Number of unit moves the walker can make.
pub const DIRECTIONS: u32 = 4;

/// Walker on a toroidal `width × height` grid.
///
/// Directions: `0 → +x`, `1 → −x`, `2 → +y`, `3 → −y`. Each move changes one
/// coordinate by one, so a single correction per axis keeps it in range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Walker {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

impl Walker {
    /// Starts at `(0, 0)`. Both dimensions must be positive.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "walker needs a non-empty grid");
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Apply one move.
    ///
    /// # Panics
    ///
    /// If `direction >= 4`, which only a generator breaking its range
    /// contract can produce.
    #[inline]
    pub fn step(&mut self, direction: u32) {
        match direction {
            0 => {
                self.x += 1;
                if self.x >= self.width {
                    self.x -= self.width;
                }
            }
            1 => {
                if self.x == 0 {
                    self.x = self.width;
                }
                self.x -= 1;
            }
            2 => {
                self.y += 1;
                if self.y >= self.height {
                    self.y -= self.height;
                }
            }
            3 => {
                if self.y == 0 {
                    self.y = self.height;
                }
                self.y -= 1;
            }
            d => panic!("direction {d} outside 0..{DIRECTIONS}"),
        }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Row-major cell index of the current position.
    #[inline]
    pub fn index(&self) -> usize {
        self.y * self.width + self.x
    }
}

/// Run `steps` walk steps from the origin, bumping the counter of every cell
/// landed on. Counters wrap at `u32::MAX`.
pub(crate) fn diffuse<G: BoundedGenerator + ?Sized>(
    cells: &mut [u32],
    width: usize,
    height: usize,
    generator: &mut G,
    steps: u64,
) {
    debug_assert_eq!(cells.len(), width * height);
    let mut walker = Walker::new(width, height);
    for _ in 0..steps {
        walker.step(generator.next_below(DIRECTIONS));
        let cell = &mut cells[walker.index()];
        *cell = cell.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Scripted;

    #[test]
    fn moves_follow_direction_table() {
        let mut w = Walker::new(5, 5);
        w.step(0);
        assert_eq!(w.position(), (1, 0));
        w.step(2);
        assert_eq!(w.position(), (1, 1));
        w.step(1);
        assert_eq!(w.position(), (0, 1));
        w.step(3);
        assert_eq!(w.position(), (0, 0));
    }

    #[test]
    fn wraps_on_every_edge() {
        let mut w = Walker::new(3, 2);
        w.step(1);
        assert_eq!(w.position(), (2, 0));
        w.step(0);
        assert_eq!(w.position(), (0, 0));
        w.step(3);
        assert_eq!(w.position(), (0, 1));
        w.step(2);
        assert_eq!(w.position(), (0, 0));
    }

    #[test]
    fn single_cell_grid_stays_put() {
        let mut w = Walker::new(1, 1);
        for d in 0..4 {
            w.step(d);
            assert_eq!(w.position(), (0, 0));
        }
    }

    #[test]
    #[should_panic(expected = "outside 0..4")]
    fn rejects_out_of_range_direction() {
        Walker::new(2, 2).step(4);
    }

    #[test]
    fn index_is_row_major() {
        let mut w = Walker::new(4, 3);
        w.step(2);
        w.step(0);
        w.step(0);
        assert_eq!(w.index(), 6);
    }

    #[test]
    fn diffuse_counts_each_landing() {
        let mut cells = vec![0u32; 4];
        let mut gen = Scripted::new(vec![0, 1]);
        diffuse(&mut cells, 2, 2, &mut gen, 6);
        // (1,0), (0,0), (1,0), (0,0), ...
        assert_eq!(cells, vec![3, 3, 0, 0]);
    }

    #[test]
    fn diffuse_wraps_saturated_counters() {
        let mut cells = vec![u32::MAX];
        let mut gen = Scripted::new(vec![0]);
        diffuse(&mut cells, 1, 1, &mut gen, 2);
        assert_eq!(cells, vec![1]);
    }
}
