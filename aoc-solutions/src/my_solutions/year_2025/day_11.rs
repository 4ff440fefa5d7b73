use std::collections::HashMap;

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;
use tracing::debug;

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 11, tags = ["graph", "dp"])]
pub struct Solver;

/// Label of the sink every path ends in. It never has its own line.
const OUT: &str = "out";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(usize);

/// Device graph. Devices that are only referenced get an id with no outputs.
#[derive(Debug)]
pub struct Devices<'a> {
    labels: Vec<&'a str>,
    ids: HashMap<&'a str, DeviceId>,
    outputs: Vec<Vec<DeviceId>>,
    defined: Vec<bool>,
}

#[derive(Debug)]
pub struct SharedData<'a> {
    devices: Devices<'a>,
    cycle: Option<Option<DeviceId>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeviceGraphError {
    #[error("device graph has a cycle through '{0}'")]
    Cycle(String),
    #[error("device '{0}' is not defined")]
    MissingDevice(&'static str),
    #[error("path count does not fit in 64 bits")]
    Overflow,
}

impl<'a> Devices<'a> {
    fn intern(&mut self, label: &'a str) -> DeviceId {
        if let Some(&id) = self.ids.get(label) {
            return id;
        }
        let id = DeviceId(self.labels.len());
        self.labels.push(label);
        self.ids.insert(label, id);
        self.outputs.push(Vec::new());
        self.defined.push(false);
        id
    }

    fn parse_line(&mut self, line: &'a str) -> anyhow::Result<()> {
        let Some((label, outputs)) = line.split_once(':') else {
            bail!("expected '<label>: <outputs>', got '{line}'");
        };
        let label = label.trim();
        if label.is_empty() || label.contains(char::is_whitespace) {
            bail!("invalid device label '{label}'");
        }
        if label == OUT {
            bail!("the '{OUT}' device cannot have outputs");
        }

        let id = self.intern(label);
        if self.defined[id.0] {
            bail!("device '{label}' defined twice");
        }
        self.defined[id.0] = true;

        let outputs = outputs
            .split_whitespace()
            .map(|output| self.intern(output))
            .collect();
        self.outputs[id.0] = outputs;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn id(&self, label: &str) -> Option<DeviceId> {
        self.ids.get(label).copied()
    }

    pub fn is_defined(&self, label: &str) -> bool {
        self.id(label).is_some_and(|id| self.defined[id.0])
    }

    /// Some device on a directed cycle, if the graph has one.
    pub fn find_cycle(&self) -> Option<DeviceId> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Unseen,
            InProgress,
            Done,
        }

        let mut marks = vec![Mark::Unseen; self.len()];
        // (device, next output to visit)
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for root in 0..self.len() {
            if marks[root] != Mark::Unseen {
                continue;
            }
            marks[root] = Mark::InProgress;
            stack.push((root, 0));

            while let Some((device, child)) = stack.pop() {
                let Some(&DeviceId(next)) = self.outputs[device].get(child) else {
                    marks[device] = Mark::Done;
                    continue;
                };
                stack.push((device, child + 1));
                match marks[next] {
                    Mark::Unseen => {
                        marks[next] = Mark::InProgress;
                        stack.push((next, 0));
                    }
                    // back edge
                    Mark::InProgress => return Some(DeviceId(next)),
                    Mark::Done => {}
                }
            }
        }
        None
    }

    /// Number of distinct paths from `from` to `to`, memoized for this call
    /// only. Undefined labels and the sink (unless it is the target) lead
    /// nowhere. The graph must be acyclic.
    pub fn count_paths(&self, from: &str, to: &str) -> Result<u64, DeviceGraphError> {
        PathCounter::new(self).count(from, to)
    }
}

type PathKey = (DeviceId, DeviceId);

/// Memoized path counts keyed by `(device, target)`. `None` marks a count
/// past `u64::MAX`.
struct PathCounter<'d, 'a> {
    devices: &'d Devices<'a>,
    cache: DpCache<PathKey, Option<u64>, HashMapBackend<PathKey, Option<u64>>, PathCount<'d>>,
}

struct PathCount<'d> {
    outputs: &'d [Vec<DeviceId>],
}

impl DpProblem<PathKey, Option<u64>> for PathCount<'_> {
    fn deps(&self, &(device, target): &PathKey) -> Vec<PathKey> {
        if device == target {
            return vec![];
        }
        self.outputs[device.0]
            .iter()
            .map(|&next| (next, target))
            .collect()
    }

    fn compute(&self, &(device, target): &PathKey, deps: Vec<Option<u64>>) -> Option<u64> {
        if device == target {
            return Some(1);
        }
        deps.into_iter()
            .try_fold(0u64, |total, paths| total.checked_add(paths?))
    }
}

impl<'d, 'a> PathCounter<'d, 'a> {
    fn new(devices: &'d Devices<'a>) -> Self {
        let problem = PathCount {
            outputs: &devices.outputs,
        };
        Self {
            devices,
            cache: DpCache::with_problem(HashMapBackend::new(), problem),
        }
    }

    fn count(&self, from: &str, to: &str) -> Result<u64, DeviceGraphError> {
        if from == to {
            return Ok(1);
        }
        match (self.devices.id(from), self.devices.id(to)) {
            (Some(from), Some(to)) => self
                .cache
                .get(&(from, to))
                .ok_or(DeviceGraphError::Overflow),
            _ => Ok(0),
        }
    }

    /// Paths from `from` to `to` that pass through `via`.
    fn count_via(&self, from: &str, via: &str, to: &str) -> Result<u64, DeviceGraphError> {
        self.count(from, via)?
            .checked_mul(self.count(via, to)?)
            .ok_or(DeviceGraphError::Overflow)
    }
}

fn ensure_acyclic(shared: &mut SharedData<'_>) -> Result<(), SolveError> {
    let devices = &shared.devices;
    match *shared.cycle.get_or_insert_with(|| devices.find_cycle()) {
        Some(id) => Err(SolveError::failed(DeviceGraphError::Cycle(
            shared.devices.labels[id.0].to_string(),
        ))),
        None => Ok(()),
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut devices = Devices {
            labels: Vec::new(),
            ids: HashMap::new(),
            outputs: Vec::new(),
            defined: Vec::new(),
        };

        input
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .try_for_each(|(line_idx, line)| {
                devices
                    .parse_line(line)
                    .map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))
            })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;

        if devices.is_empty() {
            return Err(ParseError::MissingData("no devices".to_string()));
        }
        debug!(devices = devices.len(), "parsed device graph");

        Ok(SharedData {
            devices,
            cycle: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        ensure_acyclic(shared)?;
        if !shared.devices.is_defined("you") {
            return Err(SolveError::failed(DeviceGraphError::MissingDevice("you")));
        }
        let paths = shared
            .devices
            .count_paths("you", OUT)
            .map_err(SolveError::failed)?;
        Ok(paths.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        ensure_acyclic(shared)?;
        let counter = PathCounter::new(&shared.devices);
        let server_paths = |first: &str, second: &str| {
            counter
                .count_via("svr", first, second)?
                .checked_mul(counter.count(second, OUT)?)
                .ok_or(DeviceGraphError::Overflow)
        };

        let via_dac_first = server_paths("dac", "fft").map_err(SolveError::failed)?;
        let via_fft_first = server_paths("fft", "dac").map_err(SolveError::failed)?;
        debug!(via_dac_first, via_fft_first, "counted server paths");
        via_dac_first
            .checked_add(via_fft_first)
            .map(|total| total.to_string())
            .ok_or_else(|| SolveError::failed(DeviceGraphError::Overflow))
    }
}
