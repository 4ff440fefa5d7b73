//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::inputs::InputSource;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Resolved runtime configuration
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags to filter solvers
    pub tags: Vec<String>,
    /// Where puzzle inputs are read from
    pub inputs: InputSource,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Quiet mode
    pub quiet: bool,
    /// Most detailed level logged to stderr
    pub log_level: Level,
}

impl Config {
    /// Build config from CLI args
    pub fn from_args(args: Args) -> Self {
        let inputs = match args.input {
            Some(file) => InputSource::File(expand_tilde(&file)),
            None => InputSource::Dir(expand_tilde(&args.input_dir)),
        };

        Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            inputs,
            thread_count: args.threads.unwrap_or_else(num_cpus),
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
            log_level: log_level(args.verbose),
        }
    }
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && let Some(rest) = path_str
            .strip_prefix("~/")
            .or_else(|| (path_str == "~").then_some(""))
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(args: &[&str]) -> Config {
        Config::from_args(Args::try_parse_from(args).unwrap())
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(config(&["aoc"]).log_level, Level::WARN);
        assert_eq!(config(&["aoc", "-v"]).log_level, Level::INFO);
        assert_eq!(config(&["aoc", "-vv"]).log_level, Level::DEBUG);
        assert_eq!(config(&["aoc", "-vvvv"]).log_level, Level::TRACE);
    }

    #[test]
    fn test_input_file_overrides_dir() {
        let cfg = config(&["aoc", "--input-dir", "puzzles", "--input", "day12.txt"]);
        assert!(matches!(cfg.inputs, InputSource::File(ref p) if p == Path::new("day12.txt")));

        let cfg = config(&["aoc", "--input-dir", "puzzles"]);
        assert!(matches!(cfg.inputs, InputSource::Dir(ref p) if p == Path::new("puzzles")));
    }

    #[test]
    fn test_thread_count() {
        assert_eq!(config(&["aoc", "--threads", "3"]).thread_count, 3);
        assert!(config(&["aoc"]).thread_count >= 1);
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde(Path::new("inputs")), PathBuf::from("inputs"));
        assert_eq!(expand_tilde(Path::new("/tmp/~x")), PathBuf::from("/tmp/~x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/aoc")), home.join("aoc"));
            assert_eq!(expand_tilde(Path::new("~")), home.join(""));
        }
    }
}
