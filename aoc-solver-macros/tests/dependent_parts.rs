use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};

#[derive(Debug)]
struct SharedData {
    widths: Vec<usize>,
    widest: Option<usize>,
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct WidestRow;

impl AocParser for WidestRow {
    type SharedData<'a> = SharedData;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let widths = input.lines().map(|line| line.trim().len()).collect::<Vec<_>>();
        if widths.is_empty() {
            return Err(ParseError::MissingData("no rows".into()));
        }
        Ok(SharedData {
            widths,
            widest: None,
        })
    }
}

impl PartSolver<1> for WidestRow {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let widest = shared.widths.iter().copied().max().unwrap_or_default();
        shared.widest = Some(widest);
        Ok(widest.to_string())
    }
}

impl PartSolver<2> for WidestRow {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let widest = shared
            .widest
            .ok_or_else(|| SolveError::failed("part 1 has not run"))?;
        let count = shared.widths.iter().filter(|&&w| w == widest).count();
        Ok(count.to_string())
    }
}

#[test]
fn test_part_two_reuses_part_one() {
    let mut shared = WidestRow::parse("###\n#.\n..#\n").unwrap();

    assert_eq!(WidestRow::solve_part(&mut shared, 1).unwrap(), "3");
    assert_eq!(shared.widest, Some(3));
    assert_eq!(WidestRow::solve_part(&mut shared, 2).unwrap(), "2");
}

#[test]
fn test_part_two_without_part_one_fails() {
    let mut shared = WidestRow::parse("###").unwrap();

    let result = WidestRow::solve_part(&mut shared, 2);
    assert!(matches!(result, Err(SolveError::SolveFailed(_))));
}

#[test]
fn test_parts_constant() {
    assert_eq!(WidestRow::PARTS, 2);
}

#[test]
fn test_unknown_part_not_implemented() {
    let mut shared = WidestRow::parse("#").unwrap();

    for part in [0u8, 3, 255] {
        let result = WidestRow::solve_part(&mut shared, part);
        assert!(matches!(result, Err(SolveError::PartNotImplemented(p)) if p == part));
    }
}
