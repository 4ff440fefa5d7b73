use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 6, tags = ["parsing", "grid"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Multiply,
}

impl Operator {
    fn identity(self) -> u64 {
        match self {
            Operator::Add => 0,
            Operator::Multiply => 1,
        }
    }

    fn apply(self, acc: u64, value: u64) -> Option<u64> {
        match self {
            Operator::Add => acc.checked_add(value),
            Operator::Multiply => acc.checked_mul(value),
        }
    }
}

/// One problem: the character columns `start..end` of every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    start: usize,
    end: usize,
    op: Operator,
}

/// The worksheet as laid out on paper. Rows are kept verbatim since the
/// column alignment carries meaning.
#[derive(Debug)]
pub struct SharedData<'a> {
    rows: Vec<&'a [u8]>,
    problems: Vec<Problem>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorksheetError {
    #[error("expected number rows followed by an operator row, got {0} rows")]
    TooFewRows(usize),
    #[error("unexpected operator '{ch}' in column {col}")]
    UnknownOperator { col: usize, ch: char },
    #[error("problem at columns {start}..{end} has {found} operators")]
    OperatorCount {
        start: usize,
        end: usize,
        found: usize,
    },
    #[error("unexpected character '{ch}' at row {row}, column {col}")]
    UnexpectedChar { row: usize, col: usize, ch: char },
    #[error("problem at columns {start}..{end} has no number in row {row}")]
    MissingNumber { row: usize, start: usize, end: usize },
    #[error("number does not fit in 64 bits")]
    Overflow,
}

impl SharedData<'_> {
    fn byte(&self, row: usize, col: usize) -> u8 {
        self.rows[row].get(col).copied().unwrap_or(b' ')
    }

    /// Numbers of a problem read left to right along each row.
    fn row_numbers(&self, problem: &Problem) -> Result<Vec<u64>, WorksheetError> {
        (0..self.rows.len())
            .map(|row| {
                let digits = (problem.start..problem.end).map(|col| self.byte(row, col));
                parse_digits(digits)?.ok_or(WorksheetError::MissingNumber {
                    row,
                    start: problem.start,
                    end: problem.end,
                })
            })
            .collect()
    }

    /// Numbers of a problem read top to bottom along each column. Columns
    /// holding only spaces are skipped.
    fn column_numbers(&self, problem: &Problem) -> Result<Vec<u64>, WorksheetError> {
        (problem.start..problem.end)
            .filter_map(|col| {
                let digits = (0..self.rows.len()).map(|row| self.byte(row, col));
                parse_digits(digits).transpose()
            })
            .collect()
    }

    fn grand_total<F>(&self, numbers: F) -> Result<u64, WorksheetError>
    where
        F: Fn(&Self, &Problem) -> Result<Vec<u64>, WorksheetError>,
    {
        self.problems.iter().try_fold(0u64, |total, problem| {
            let answer = numbers(self, problem)?
                .into_iter()
                .try_fold(problem.op.identity(), |acc, n| problem.op.apply(acc, n))
                .ok_or(WorksheetError::Overflow)?;
            total.checked_add(answer).ok_or(WorksheetError::Overflow)
        })
    }
}

/// Digits of one number, with blanks ignored. `None` if there are no digits.
fn parse_digits(bytes: impl Iterator<Item = u8>) -> Result<Option<u64>, WorksheetError> {
    let mut number = None;
    for digit in bytes.filter(u8::is_ascii_digit).map(|b| u64::from(b - b'0')) {
        let next = number
            .unwrap_or(0u64)
            .checked_mul(10)
            .and_then(|n| n.checked_add(digit))
            .ok_or(WorksheetError::Overflow)?;
        number = Some(next);
    }
    Ok(number)
}

/// Problems are separated by columns that are blank in every row.
fn split_problems(rows: &[&[u8]], ops: &[u8]) -> Result<Vec<Problem>, WorksheetError> {
    let width = rows.iter().map(|row| row.len()).chain([ops.len()]).max().unwrap_or(0);
    let blank = |col: usize| {
        rows.iter()
            .chain([&ops])
            .all(|row| row.get(col).is_none_or(|&b| b == b' '))
    };

    let mut problems = Vec::new();
    let mut col = 0;
    while col < width {
        if blank(col) {
            col += 1;
            continue;
        }
        let start = col;
        while col < width && !blank(col) {
            col += 1;
        }

        let mut op = None;
        let mut found = 0;
        for c in start..col {
            match ops.get(c) {
                Some(b'+') => op = Some(Operator::Add),
                Some(b'*') => op = Some(Operator::Multiply),
                Some(b' ') | None => continue,
                Some(&other) => {
                    return Err(WorksheetError::UnknownOperator {
                        col: c,
                        ch: char::from(other),
                    });
                }
            }
            found += 1;
        }
        match (op, found) {
            (Some(op), 1) => problems.push(Problem { start, end: col, op }),
            _ => return Err(WorksheetError::OperatorCount { start, end: col, found }),
        }
    }
    Ok(problems)
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut rows: Vec<&[u8]> = input
            .lines()
            .map(|line| line.trim_end_matches('\r').as_bytes())
            .collect();
        while rows.last().is_some_and(|row| row.iter().all(|&b| b == b' ')) {
            rows.pop();
        }
        let invalid = |e: WorksheetError| ParseError::InvalidFormat(e.to_string());

        let row_count = rows.len();
        let ops = match rows.pop() {
            Some(ops) if row_count >= 2 => ops,
            _ => {
                let e = WorksheetError::TooFewRows(row_count);
                return Err(ParseError::MissingData(e.to_string()));
            }
        };
        for (row, line) in rows.iter().enumerate() {
            if let Some(col) = line.iter().position(|&b| b != b' ' && !b.is_ascii_digit()) {
                let ch = char::from(line[col]);
                return Err(invalid(WorksheetError::UnexpectedChar { row, col, ch }));
            }
        }

        let problems = split_problems(&rows, ops).map_err(invalid)?;
        Ok(SharedData { rows, problems })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .grand_total(SharedData::row_numbers)
            .map(|total| total.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .grand_total(SharedData::column_numbers)
            .map(|total| total.to_string())
            .map_err(SolveError::failed)
    }
}
