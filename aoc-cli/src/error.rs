//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Combine two Arc-wrapped errors into one, flattening nested `Multiple`s
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let errors = match (first.inner(), second.inner()) {
            (ExecutorError::Multiple(v1), ExecutorError::Multiple(v2)) => {
                let mut combined = v1.clone();
                combined.extend(v2.iter().cloned());
                combined
            }
            (_, ExecutorError::Multiple(v)) => {
                let mut combined = vec![first];
                combined.extend(v.iter().cloned());
                combined
            }
            (ExecutorError::Multiple(v), _) => {
                let mut combined = v.clone();
                combined.push(second);
                combined
            }
            _ => vec![first, second],
        };
        ExecutorError::Multiple(errors).into()
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

/// Input lookup errors
#[derive(Error, Debug)]
pub enum InputError {
    /// No input file at the expected location
    #[error("Input file not found: {}", .0.display())]
    Missing(PathBuf),

    /// Input file exists but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(msg: &str) -> ArcExecutorError {
        ExecutorError::ThreadPool(msg.to_string()).into()
    }

    fn count(err: &ArcExecutorError) -> usize {
        match err.inner() {
            ExecutorError::Multiple(v) => v.len(),
            _ => 1,
        }
    }

    #[test]
    fn test_combine_flattens() {
        let two = ArcExecutorError::combine(single("a"), single("b"));
        assert_eq!(count(&two), 2);

        let three = ArcExecutorError::combine(two.clone(), single("c"));
        assert_eq!(count(&three), 3);

        let four = ArcExecutorError::combine(single("z"), three.clone());
        assert_eq!(count(&four), 4);
        assert!(matches!(four.inner(), ExecutorError::Multiple(v) if v[0].to_string().contains('z')));

        assert_eq!(count(&ArcExecutorError::combine(two, three)), 5);
    }

    #[test]
    fn test_combine_opt() {
        assert_eq!(count(&ArcExecutorError::combine_opt(None, single("a"))), 1);
        assert_eq!(
            count(&ArcExecutorError::combine_opt(Some(single("a")), single("b"))),
            2
        );
    }
}
