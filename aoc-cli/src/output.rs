//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;

/// Output formatter for solver results
pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    /// Format and print a single result
    pub fn print_result(&self, result: &SolverResult) {
        match (&result.answer, self.quiet) {
            (Ok(_), true) => println!("{}", quiet_line(result)),
            (Ok(_), false) => println!("{}", full_line(result)),
            (Err(_), true) => eprintln!("{}", quiet_line(result)),
            (Err(_), false) => eprintln!("{}", full_line(result)),
        }
    }

    /// Print a summary after all results
    /// Shows both total solve time (sum of durations) and actual elapsed wall-clock time
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let total = results.len();
        let successes = results.iter().filter(|r| r.answer.is_ok()).count();
        let failures = total - successes;

        let total_parse_time: TimeDelta = results
            .iter()
            .filter(|r| r.answer.is_ok())
            .filter_map(|r| r.parse_duration)
            .sum();
        let total_solve_time: TimeDelta = results
            .iter()
            .filter(|r| r.answer.is_ok())
            .map(|r| r.solve_duration)
            .sum();
        let total_compute_time = total_parse_time + total_solve_time;
        let elapsed_time = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!("Solvers: {} solved, {} failed", successes, failures);
        println!("Total parse time: {}", format_duration(total_parse_time));
        println!("Total solve time: {}", format_duration(total_solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(elapsed_time)
        );
        if !elapsed_time.is_zero() {
            let total_compute_secs =
                total_compute_time.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
            let speedup = total_compute_secs / elapsed_time.as_secs_f64();
            println!("Speedup factor: {:.2}x", speedup);
        }
    }
}

/// `solution for part P: answer`, or `Error: ...` on failure
fn quiet_line(result: &SolverResult) -> String {
    match &result.answer {
        Ok(answer) => format!("solution for part {}: {}", result.part, answer),
        Err(e) => format!("Error: {}", e),
    }
}

/// `YYYY/DD Part P: answer (parse: ..., solve: ...)`
fn full_line(result: &SolverResult) -> String {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);

    match &result.answer {
        Ok(answer) => {
            let parse_timing = result
                .parse_duration
                .map(|d| format!("parse: {}, ", format_duration(d)))
                .unwrap_or_default();
            format!(
                "{}: {} ({}solve: {})",
                prefix,
                answer,
                parse_timing,
                format_duration(result.solve_duration)
            )
        }
        Err(e) => format!("{}: Error - {}", prefix, e),
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::{SolveError, SolverError};

    fn result(part: u8, answer: Result<String, SolverError>) -> SolverResult {
        SolverResult {
            year: 2025,
            day: 3,
            part,
            answer,
            solve_duration: TimeDelta::microseconds(1500),
            parse_duration: Some(TimeDelta::microseconds(250)),
        }
    }

    #[test]
    fn test_quiet_line() {
        assert_eq!(
            quiet_line(&result(1, Ok("357".to_string()))),
            "solution for part 1: 357"
        );
        let failed = result(2, Err(SolveError::PartNotImplemented(2).into()));
        assert_eq!(
            quiet_line(&failed),
            "Error: Solve error: Part 2 is not implemented"
        );
    }

    #[test]
    fn test_full_line() {
        assert_eq!(
            full_line(&result(1, Ok("357".to_string()))),
            "2025/03 Part 1: 357 (parse: 250µs, solve: 1.50ms)"
        );

        let mut unparsed = result(2, Ok("x".to_string()));
        unparsed.parse_duration = None;
        assert_eq!(full_line(&unparsed), "2025/03 Part 2: x (solve: 1.50ms)");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(TimeDelta::microseconds(999)), "999µs");
        assert_eq!(format_duration(TimeDelta::milliseconds(12)), "12.00ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-5)), "-5µs");
    }

    #[test]
    fn test_format_std_duration() {
        use std::time::Duration;
        assert_eq!(format_std_duration(Duration::from_micros(10)), "10µs");
        assert_eq!(format_std_duration(Duration::from_millis(3)), "3.00ms");
        assert_eq!(format_std_duration(Duration::from_secs(2)), "2.00s");
    }
}
