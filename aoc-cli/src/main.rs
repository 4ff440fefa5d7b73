//! AOC CLI - Command-line interface for running Advent of Code solvers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aoc_solver::SolverRegistryBuilder;
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::Executor;
use inputs::InputSource;
use output::OutputFormatter;
use tracing::{info, warn};

fn main() {
    let config = Config::from_args(Args::parse());

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), CliError> {
    let registry = build_registry(&config.tags)?;
    info!(solvers = registry.storage().len(), "registry built");

    let executor =
        Executor::new(registry, &config).map_err(|e| CliError::Config(e.to_string()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    if let InputSource::File(path) = &config.inputs
        && work_items.len() != 1
    {
        return Err(CliError::Config(format!(
            "--input {} needs exactly one selected day, {} match",
            path.display(),
            work_items.len()
        )));
    }

    let missing: Vec<_> = work_items
        .iter()
        .filter(|w| !config.inputs.contains(w.year, w.day))
        .collect();
    for work in &missing {
        warn!(
            year = work.year,
            day = work.day,
            path = %config.inputs.path(work.year, work.day).display(),
            "input file missing"
        );
    }

    run_executor(executor, work_items, config.quiet)
}

/// Run the executor and print results in order as they become ready
fn run_executor(
    executor: Executor,
    work_items: Vec<executor::WorkItem>,
    quiet: bool,
) -> Result<(), CliError> {
    if !quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let expected_keys: Vec<aggregator::ResultKey> = work_items
        .iter()
        .flat_map(|w| {
            w.parts.clone().map(move |p| aggregator::ResultKey {
                year: w.year,
                day: w.day,
                part: p,
            })
        })
        .collect();

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = aggregator::ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    if !aggregator.is_complete() {
        warn!("not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))?
        .map_err(CliError::Executor)?;

    formatter.print_summary(&results);

    Ok(())
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_all_solutions() {
        let registry = build_registry(&[]).unwrap();
        for day in [2, 3, 4, 5, 6, 8, 9, 10, 11, 12] {
            assert_eq!(registry.storage().get_info(2025, day).map(|i| i.parts), Some(2));
        }
    }

    #[test]
    fn test_registry_tag_filter() {
        let registry = build_registry(&["search".to_string()]).unwrap();
        let days: Vec<_> = registry.storage().iter_info().map(|i| i.day).collect();
        assert_eq!(days, vec![12]);

        let registry = build_registry(&["graph".to_string(), "search".to_string()]).unwrap();
        assert!(registry.storage().is_empty());
    }
}
