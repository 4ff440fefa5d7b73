//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::InputSource;
use aoc_solver::{DynSolver, ParseError, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Result from a single solver execution
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, SolverError>,
    pub solve_duration: TimeDelta,
    /// Absent when the input never got parsed
    pub parse_duration: Option<TimeDelta>,
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

/// State shared read-only by every worker
pub struct SyncExecutorConfig {
    registry: SolverRegistry,
    inputs: InputSource,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                inputs: config.inputs.clone(),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .storage()
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(cfg.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        debug!(
            items = work_items.len(),
            mode = ?self.sync_executor_config.parallelize_by,
            "executing"
        );

        match self.sync_executor_config.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_solver(&work, &tx, &self.sync_executor_config) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                // items arrive ordered by (year, day), so equal years are adjacent
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            // Part additionally splits each item in run_solver
            ParallelizeBy::Day | ParallelizeBy::Part => self.execute_parallel(work_items, &tx),
        }
    }

    /// Execute work items in parallel, collecting errors
    fn execute_parallel(
        &self,
        work_items: Vec<WorkItem>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            work_items
                .into_par_iter()
                .map(|work| run_solver(&work, tx, sync_executor_config).err())
                .reduce_with(|err1, err2| match (err1, err2) {
                    (e1, Some(e2)) => Some(ArcExecutorError::combine_opt(e1, e2)),
                    (e1, None) => e1,
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }

    /// Execute grouped work items in parallel (for year-level parallelism)
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_solver(&work, tx, sync_executor_config) {
                            err = Some(ArcExecutorError::combine_opt(err, e))
                        }
                    }
                    err
                })
                .reduce_with(|err1, err2| match (err1, err2) {
                    (e1, Some(e2)) => Some(ArcExecutorError::combine_opt(e1, e2)),
                    (e1, None) => e1,
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }
}

/// Restrict a solver's parts to the part filter
#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0, // Empty range - intentional
        None => 1..=max_parts,
    }
}

/// Result for a part that could not run
fn error_result(year: u16, day: u8, part: u8, error: SolverError) -> SolverResult {
    SolverResult {
        year,
        day,
        part,
        answer: Err(error),
        solve_duration: TimeDelta::zero(),
        parse_duration: None,
    }
}

/// Copy of a creation error for each part that inherits it
fn replicate_error(error: &SolverError) -> SolverError {
    match error {
        SolverError::NotFound(year, day) => SolverError::NotFound(*year, *day),
        SolverError::InvalidYearDay(year, day) => SolverError::InvalidYearDay(*year, *day),
        SolverError::ParseError(e) => SolverError::ParseError(e.clone()),
        SolverError::SolveError(e) => SolverError::ParseError(ParseError::Other(e.to_string())),
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Send the same failure for every part of a work item
fn send_errors(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    error: &SolverError,
) -> Result<(), ArcExecutorError> {
    for part in work.parts.clone() {
        send(tx, error_result(work.year, work.day, part, replicate_error(error)))?;
    }
    Ok(())
}

/// Read the input for one work item and solve its parts
fn run_solver(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    sync_executor_config: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let input = match sync_executor_config.inputs.read(work.year, work.day) {
        Ok(input) => input,
        Err(e) => {
            warn!(year = work.year, day = work.day, "{e}");
            let error = SolverError::ParseError(ParseError::MissingData(e.to_string()));
            return send_errors(work, tx, &error);
        }
    };

    if matches!(sync_executor_config.parallelize_by, ParallelizeBy::Part) {
        run_solver_parts_parallel(work, &input, tx, sync_executor_config)
    } else {
        run_solver_sequential(work, &input, tx, sync_executor_config)
    }
}

/// Run parts in parallel, each on its own parsed instance, emitting in part order
fn run_solver_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    sync_executor_config: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let registry = &sync_executor_config.registry;

    let mut results: Vec<SolverResult> = work
        .parts
        .clone()
        .into_par_iter()
        .map(|part| match registry.create_solver(year, day, input) {
            Ok(mut solver) => solve_part(year, day, part, &mut *solver),
            Err(e) => error_result(year, day, part, e),
        })
        .collect();
    results.sort_by_key(|r| r.part);

    results.into_iter().try_for_each(|result| send(tx, result))
}

/// Parse once and run the parts in order
fn run_solver_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    sync_executor_config: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let mut solver = match sync_executor_config.registry.create_solver(year, day, input) {
        Ok(solver) => solver,
        Err(e) => {
            debug!(year, day, error = %e, "solver creation failed");
            return send_errors(work, tx, &e);
        }
    };

    for part in work.parts.clone() {
        send(tx, solve_part(year, day, part, &mut *solver))?;
    }
    Ok(())
}

/// Solve a single part, recording parse and solve times
fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    let parse_duration = Some(solver.parse_duration());
    let (answer, solve_duration) = match solver.solve(part) {
        Ok(result) => {
            let duration = result.duration();
            (Ok(result.answer), duration)
        }
        Err(e) => (Err(SolverError::from(e)), TimeDelta::zero()),
    };
    debug!(year, day, part, ok = answer.is_ok(), "part finished");

    SolverResult {
        year,
        day,
        part,
        answer,
        solve_duration,
        parse_duration,
    }
}
