//! Backtracking search that packs presents into a region.

use thiserror::Error;

use super::grid::{Anchor, Board, Shape};

/// Placement attempts allowed per region unless configured otherwise.
pub const DEFAULT_BUDGET: u64 = 200_000_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PackingError {
    #[error("search gave up after {0} placement attempts")]
    BudgetExhausted(u64),
}

/// Upper bound on the placement attempts of one search.
#[derive(Debug, Clone)]
pub struct SearchBudget {
    limit: u64,
    spent: u64,
}

impl SearchBudget {
    pub fn new(limit: u64) -> Self {
        Self { limit, spent: 0 }
    }

    pub fn spent(&self) -> u64 {
        self.spent
    }

    fn spend(&mut self) -> Result<(), PackingError> {
        if self.spent >= self.limit {
            return Err(PackingError::BudgetExhausted(self.limit));
        }
        self.spent += 1;
        Ok(())
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::new(DEFAULT_BUDGET)
    }
}

/// Cells the requested presents cover in total, or `None` past
/// `usize::MAX`.
///
/// `counts[i]` is the number of copies of `shapes[i]`; extra entries on
/// either side are ignored.
pub fn required_cells(shapes: &[Shape], counts: &[usize]) -> Option<usize> {
    shapes
        .iter()
        .zip(counts)
        .try_fold(0usize, |total, (shape, &count)| {
            total.checked_add(count.checked_mul(shape.cell_count())?)
        })
}

/// Place every piece on `board`, in order, without overlap.
///
/// Tries each rotation of the first piece at each anchor in row-major order
/// and recurses on the rest. Returns `Ok(true)` with the pieces left on the
/// board, or `Ok(false)` with the board as it was. Uncovered cells are
/// allowed.
pub fn pack(
    board: &mut Board,
    pieces: &[&Shape],
    budget: &mut SearchBudget,
) -> Result<bool, PackingError> {
    pack_with(board, pieces, budget, &Anchor::row_major, &Shape::rotations)
}

/// [`pack`] with the anchor and rotation orders supplied by the caller.
fn pack_with<A, AI, R, RI>(
    board: &mut Board,
    pieces: &[&Shape],
    budget: &mut SearchBudget,
    anchors: &A,
    rotations: &R,
) -> Result<bool, PackingError>
where
    A: Fn(usize, usize) -> AI,
    AI: Iterator<Item = Anchor>,
    R: Fn(&Shape) -> RI,
    RI: Iterator<Item = Shape>,
{
    let Some((piece, rest)) = pieces.split_first() else {
        return Ok(true);
    };

    let (rows, cols) = (board.rows(), board.cols());
    for rotation in rotations(*piece) {
        for anchor in anchors(rows, cols) {
            budget.spend()?;
            if !board.fits(&rotation, anchor) {
                continue;
            }
            board.place(&rotation, anchor);
            if pack_with(board, rest, budget, anchors, rotations)? {
                return Ok(true);
            }
            board.remove(&rotation, anchor);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn shape(rows: &[&str]) -> Shape {
        Shape::parse(rows.iter().copied()).unwrap()
    }

    #[test]
    fn test_no_pieces_always_fit() {
        let mut board = Board::new(0, 0);
        assert_eq!(pack(&mut board, &[], &mut SearchBudget::new(0)), Ok(true));
    }

    #[test]
    fn test_two_dominoes_tile_square() {
        let domino = shape(&["##"]);
        let mut board = Board::new(2, 2);
        let mut budget = SearchBudget::default();

        assert_eq!(pack(&mut board, &[&domino, &domino], &mut budget), Ok(true));
        assert_eq!(board.occupied_count(), 4);
        assert!(budget.spent() > 0);
    }

    #[test]
    fn test_needs_rotation() {
        let bar = shape(&["###"]);
        let mut board = Board::new(3, 1);
        assert_eq!(pack(&mut board, &[&bar], &mut SearchBudget::default()), Ok(true));
    }

    #[test]
    fn test_partial_cover_is_success() {
        let dot = shape(&["#"]);
        let mut board = Board::new(3, 3);
        assert_eq!(pack(&mut board, &[&dot], &mut SearchBudget::default()), Ok(true));
        assert_eq!(board.occupied_count(), 1);
        assert!(board.is_occupied(0, 0));
    }

    #[test]
    fn test_failure_restores_board() {
        let square = shape(&["##", "##"]);
        let mut board = Board::new(3, 3);

        // enough area, but two 2x2 squares always overlap in a 3x3
        assert!(required_cells(&[square.clone()], &[2]) <= Some(board.area()));
        let result = pack(&mut board, &[&square, &square], &mut SearchBudget::default());
        assert_eq!(result, Ok(false));
        assert_eq!(board, Board::new(3, 3));
    }

    #[test]
    fn test_budget_exhausted() {
        let domino = shape(&["##"]);
        let mut board = Board::new(2, 2);
        let result = pack(&mut board, &[&domino, &domino], &mut SearchBudget::new(1));
        assert_eq!(result, Err(PackingError::BudgetExhausted(1)));
    }

    #[test]
    fn test_piece_order_does_not_change_feasibility() {
        let el = shape(&["#.", "##"]);
        let dot = shape(&["#"]);
        for pieces in [[&el, &dot], [&dot, &el]] {
            let mut board = Board::new(2, 2);
            assert_eq!(pack(&mut board, &pieces, &mut SearchBudget::default()), Ok(true));
            assert_eq!(board.occupied_count(), 4);
        }
    }

    #[test]
    fn test_required_cells() {
        let shapes = [shape(&["##"]), shape(&["###", "#..", "###"])];
        assert_eq!(required_cells(&shapes, &[3, 2]), Some(20));
        assert_eq!(required_cells(&shapes, &[0, 0]), Some(0));
        assert_eq!(required_cells(&shapes, &[usize::MAX, 0]), None);
        assert_eq!(required_cells(&shapes, &[usize::MAX / 2, 1]), None);
    }

    fn column_major(rows: usize, cols: usize) -> impl Iterator<Item = Anchor> {
        (0..cols).flat_map(move |col| (0..rows).map(move |row| Anchor { row, col }))
    }

    fn reversed_rotations(shape: &Shape) -> std::vec::IntoIter<Shape> {
        let mut rotations: Vec<_> = shape.rotations().collect();
        rotations.reverse();
        rotations.into_iter()
    }

    #[test]
    fn test_column_major_visits_every_anchor() {
        let anchors: Vec<_> = column_major(2, 3).map(|a| (a.row, a.col)).collect();
        assert_eq!(anchors, vec![(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)]);
    }

    fn arb_piece() -> impl Strategy<Value = Shape> {
        (1usize..=3, 1usize..=3).prop_flat_map(|(rows, cols)| {
            prop::collection::vec(any::<bool>(), rows * cols).prop_map(move |cells| {
                let lines: Vec<String> = cells
                    .chunks(cols)
                    .map(|row| row.iter().map(|&c| if c { '#' } else { '.' }).collect())
                    .collect();
                Shape::parse(lines.iter().map(String::as_str)).unwrap()
            })
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_search_order_does_not_change_feasibility(
            rows in 1usize..=3,
            cols in 1usize..=3,
            pieces in prop::collection::vec(arb_piece(), 1..=3),
        ) {
            let pieces: Vec<&Shape> = pieces.iter().collect();
            let run = |by_row: bool, reverse: bool| {
                let mut board = Board::new(rows, cols);
                let mut budget = SearchBudget::default();
                let fits = match (by_row, reverse) {
                    (true, false) => pack(&mut board, &pieces, &mut budget),
                    (true, true) => pack_with(
                        &mut board, &pieces, &mut budget, &Anchor::row_major, &reversed_rotations,
                    ),
                    (false, false) => pack_with(
                        &mut board, &pieces, &mut budget, &column_major, &Shape::rotations,
                    ),
                    (false, true) => pack_with(
                        &mut board, &pieces, &mut budget, &column_major, &reversed_rotations,
                    ),
                };
                (fits, board.occupied_count())
            };

            let expected = run(true, false);
            let placed: usize = pieces.iter().map(|p| p.cell_count()).sum();
            match expected.0 {
                Ok(true) => prop_assert_eq!(expected.1, placed),
                _ => prop_assert_eq!(expected.1, 0),
            }
            for (by_row, reverse) in [(true, true), (false, false), (false, true)] {
                prop_assert_eq!(&run(by_row, reverse).0, &expected.0);
            }
        }
    }
}
