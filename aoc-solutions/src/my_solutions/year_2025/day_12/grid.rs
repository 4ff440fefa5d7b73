//! Boolean grids for present shapes and the regions they are packed into.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("unexpected character '{ch}' at ({row}, {col}), expected '#' or '.'")]
    UnexpectedCell { row: usize, col: usize, ch: char },
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("shape has no rows")]
    Empty,
}

/// Top-left cell of a placement's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub row: usize,
    pub col: usize,
}

impl Anchor {
    /// Every anchor of a `rows` x `cols` board in row-major order.
    pub fn row_major(rows: usize, cols: usize) -> impl Iterator<Item = Anchor> {
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Anchor { row, col }))
    }
}

/// Immutable occupancy matrix of a present, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Shape {
    /// Parse grid rows of `#` (occupied) and `.` (empty).
    pub fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<Self, ShapeError> {
        let mut cols = None;
        let mut rows = 0;
        let mut cells = Vec::new();

        for (row, line) in lines.into_iter().enumerate() {
            let width = line.chars().count();
            let expected = *cols.get_or_insert(width);
            if width != expected {
                return Err(ShapeError::Ragged {
                    row,
                    expected,
                    found: width,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                cells.push(match ch {
                    '#' => true,
                    '.' => false,
                    _ => return Err(ShapeError::UnexpectedCell { row, col, ch }),
                });
            }
            rows += 1;
        }

        match cols {
            Some(cols) if cols > 0 => Ok(Self { rows, cols, cells }),
            _ => Err(ShapeError::Empty),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Occupied cells as `(row, col)` offsets from the top-left corner.
    fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c)
            .map(|(i, _)| (i / self.cols, i % self.cols))
    }

    /// One quarter turn counter-clockwise. Height and width swap.
    pub fn rotated(&self) -> Self {
        let (rows, cols) = (self.cols, self.rows);
        let mut cells = Vec::with_capacity(self.cells.len());
        for row in 0..rows {
            for col in 0..cols {
                cells.push(self.is_occupied(col, self.cols - 1 - row));
            }
        }
        Self { rows, cols, cells }
    }

    /// The 0, 90, 180 and 270 degree rotations, computed on demand.
    ///
    /// Symmetric shapes yield repeats.
    pub fn rotations(&self) -> Rotations {
        Rotations {
            next: Some(self.clone()),
            remaining: 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rotations {
    next: Option<Shape>,
    remaining: u8,
}

impl Iterator for Rotations {
    type Item = Shape;

    fn next(&mut self) -> Option<Shape> {
        let current = self.next.take()?;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.next = Some(current.rotated());
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = if self.next.is_some() {
            usize::from(self.remaining)
        } else {
            0
        };
        (n, Some(n))
    }
}

impl ExactSizeIterator for Rotations {}

/// Region being packed. Occupied cells are exactly the union of the shapes
/// currently placed on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Board {
    /// Empty board. Panics if `rows * cols` overflows, like any oversized
    /// allocation.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn area(&self) -> usize {
        self.cells.len()
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Whether `shape` lies inside the board at `anchor` without covering an
    /// occupied cell.
    pub fn fits(&self, shape: &Shape, anchor: Anchor) -> bool {
        if anchor.row + shape.rows() > self.rows || anchor.col + shape.cols() > self.cols {
            return false;
        }
        shape
            .occupied()
            .all(|(r, c)| !self.is_occupied(anchor.row + r, anchor.col + c))
    }

    /// Mark the shape's occupied cells. The placement must [`fit`](Self::fits).
    pub fn place(&mut self, shape: &Shape, anchor: Anchor) {
        debug_assert!(self.fits(shape, anchor));
        self.set(shape, anchor, true);
    }

    /// Clear exactly the cells a matching [`place`](Self::place) marked.
    pub fn remove(&mut self, shape: &Shape, anchor: Anchor) {
        self.set(shape, anchor, false);
    }

    fn set(&mut self, shape: &Shape, anchor: Anchor, value: bool) {
        for (r, c) in shape.occupied() {
            self.cells[(anchor.row + r) * self.cols + anchor.col + c] = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn shape(rows: &[&str]) -> Shape {
        Shape::parse(rows.iter().copied()).unwrap()
    }

    #[test]
    fn test_parse_shape() {
        let s = shape(&["###", "#..", "###"]);
        assert_eq!((s.rows(), s.cols()), (3, 3));
        assert_eq!(s.cell_count(), 7);
        assert!(s.is_occupied(1, 0));
        assert!(!s.is_occupied(1, 1));
    }

    #[test]
    fn test_parse_shape_errors() {
        assert_eq!(
            Shape::parse(["##", "#x"]),
            Err(ShapeError::UnexpectedCell {
                row: 1,
                col: 1,
                ch: 'x'
            })
        );
        assert_eq!(
            Shape::parse(["###", "#."]),
            Err(ShapeError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(Shape::parse([]), Err(ShapeError::Empty));
    }

    #[test]
    fn test_rotation_is_counter_clockwise() {
        let s = shape(&["##", ".#", ".#"]);
        let r = s.rotated();
        assert_eq!(r, shape(&["###", "#.."]));
    }

    #[test]
    fn test_rotations_lazy_and_restartable() {
        let s = shape(&["#.", "##"]);
        let rotations = s.rotations();
        assert_eq!(rotations.len(), 4);

        let first: Vec<_> = rotations.clone().collect();
        let second: Vec<_> = rotations.collect();
        assert_eq!(first, second);
        assert_eq!(first[0], s);
        assert_eq!(s.rotations().count(), 4);
    }

    #[test]
    fn test_symmetric_shape_rotations_repeat() {
        let square = shape(&["##", "##"]);
        assert!(square.rotations().all(|r| r == square));
    }

    #[test]
    fn test_fits_bounds_and_overlap() {
        let domino = shape(&["##"]);
        let mut board = Board::new(2, 2);

        assert!(board.fits(&domino, Anchor { row: 1, col: 0 }));
        assert!(!board.fits(&domino, Anchor { row: 0, col: 1 }));
        assert!(!board.fits(&domino, Anchor { row: 2, col: 0 }));

        board.place(&domino, Anchor { row: 0, col: 0 });
        assert!(!board.fits(&domino, Anchor { row: 0, col: 0 }));
        assert!(board.fits(&domino, Anchor { row: 1, col: 0 }));
    }

    #[test]
    fn test_empty_shape_cells_do_not_collide() {
        let corner = shape(&["#.", "##"]);
        let dot = shape(&["#"]);
        let mut board = Board::new(2, 2);
        board.place(&corner, Anchor { row: 0, col: 0 });

        assert!(board.fits(&dot, Anchor { row: 0, col: 1 }));
        assert!(!board.fits(&dot, Anchor { row: 1, col: 1 }));
    }

    #[test]
    fn test_row_major_anchors() {
        let anchors: Vec<_> = Anchor::row_major(2, 2).map(|a| (a.row, a.col)).collect();
        assert_eq!(anchors, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(Anchor::row_major(0, 5).count(), 0);
    }

    fn arb_shape() -> impl Strategy<Value = Shape> {
        (1usize..5, 1usize..5)
            .prop_flat_map(|(rows, cols)| {
                prop::collection::vec(any::<bool>(), rows * cols)
                    .prop_map(move |cells| Shape { rows, cols, cells })
            })
    }

    proptest! {
        #[test]
        fn prop_four_turns_are_identity(s in arb_shape()) {
            let turned = s.rotated().rotated().rotated().rotated();
            prop_assert_eq!(&turned, &s);

            let last = s.rotations().last().unwrap();
            prop_assert_eq!(last.rotated(), s);
        }

        #[test]
        fn prop_rotation_keeps_cells_and_swaps_dims(s in arb_shape()) {
            let r = s.rotated();
            prop_assert_eq!(r.cell_count(), s.cell_count());
            prop_assert_eq!((r.rows(), r.cols()), (s.cols(), s.rows()));
        }

        #[test]
        fn prop_place_then_remove_restores_board(
            s in arb_shape(),
            filled in prop::collection::vec(any::<bool>(), 36),
            row in 0usize..6,
            col in 0usize..6,
        ) {
            let mut board = Board { rows: 6, cols: 6, cells: filled };
            let anchor = Anchor { row: row % (7 - s.rows()), col: col % (7 - s.cols()) };
            // clear the footprint so the placement is legal
            board.remove(&s, anchor);
            prop_assert!(board.fits(&s, anchor));

            let before = board.clone();
            board.place(&s, anchor);
            prop_assert_eq!(board.occupied_count(), before.occupied_count() + s.cell_count());
            board.remove(&s, anchor);
            prop_assert_eq!(board, before);
        }
    }
}
