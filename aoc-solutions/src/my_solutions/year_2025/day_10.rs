//! Factory machines: toggle indicator lights, then raise joltage counters.
//!
//! Both parts press buttons from the same table of button subsets keyed by
//! the parity pattern they produce. Part two halves the remaining joltage
//! after every subset, since pressing a button twice never changes parity.

use std::collections::HashMap;
use std::num::ParseIntError;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;
use tracing::debug;

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 10, tags = ["bit-manipulation", "dynamic-programming"])]
pub struct Solver;

/// Lights per machine; one bit each in a `u16`.
pub const MAX_LIGHTS: usize = 16;
/// Every subset of buttons is enumerated up front.
pub const MAX_BUTTONS: usize = 16;

#[derive(Debug, Error)]
pub enum MachineParseError {
    #[error("expected '[lights] (button)... {{joltages}}', got '{0}'")]
    WrongFormat(String),
    #[error("can only handle {MAX_LIGHTS} lights, found {0}")]
    TooManyLights(usize),
    #[error("can only handle {MAX_BUTTONS} buttons, found {0}")]
    TooManyButtons(usize),
    #[error("unexpected light '{0}', expected '.' or '#'")]
    UnexpectedLight(char),
    #[error("could not parse '{0}' as a number")]
    NotANumber(String, #[source] ParseIntError),
    #[error("button {button} wires light {light}, but only {lights} exist")]
    NoSuchLight {
        button: usize,
        light: usize,
        lights: usize,
    },
    #[error("button {button} wires light {light} twice")]
    WiredTwice { button: usize, light: usize },
    #[error("expected {expected} joltages, found {found}")]
    JoltageCount { expected: usize, found: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("machine {0} cannot reach its light pattern")]
    LightsUnreachable(usize),
    #[error("machine {0} cannot reach its joltage levels")]
    JoltageUnreachable(usize),
    #[error("total button presses do not fit in 64 bits")]
    Overflow,
}

/// A set of buttons pressed once each.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Combo {
    presses: u64,
    /// Added to each counter.
    increments: Vec<u32>,
}

#[derive(Debug)]
pub struct Machine {
    lights: u16,
    buttons: Vec<u16>,
    joltages: Vec<u32>,
    /// Every button subset, keyed by the lights it toggles.
    combos: HashMap<u16, Vec<Combo>>,
}

fn strip(token: &str, open: char, close: char) -> Option<&str> {
    token.strip_prefix(open)?.strip_suffix(close)
}

fn parse_number<T: std::str::FromStr<Err = ParseIntError>>(
    s: &str,
) -> Result<T, MachineParseError> {
    s.trim()
        .parse()
        .map_err(|e| MachineParseError::NotANumber(s.to_string(), e))
}

impl Machine {
    fn parse(input: &str) -> Result<Self, MachineParseError> {
        let wrong_format = || MachineParseError::WrongFormat(input.to_string());
        let mut tokens = input.split_whitespace();
        let diagram = tokens
            .next()
            .and_then(|t| strip(t, '[', ']'))
            .ok_or_else(wrong_format)?;
        let joltages = tokens
            .next_back()
            .and_then(|t| strip(t, '{', '}'))
            .ok_or_else(wrong_format)?;

        let width = diagram.chars().count();
        if width > MAX_LIGHTS {
            return Err(MachineParseError::TooManyLights(width));
        }
        let mut lights = 0u16;
        for (idx, ch) in diagram.chars().enumerate() {
            match ch {
                '#' => lights |= 1 << idx,
                '.' => {}
                _ => return Err(MachineParseError::UnexpectedLight(ch)),
            }
        }

        let buttons = tokens
            .enumerate()
            .map(|(button, token)| {
                let wiring = strip(token, '(', ')').ok_or_else(wrong_format)?;
                wiring.split(',').try_fold(0u16, |mask, light| {
                    let light: usize = parse_number(light)?;
                    if light >= width {
                        return Err(MachineParseError::NoSuchLight {
                            button,
                            light,
                            lights: width,
                        });
                    }
                    if mask & (1 << light) != 0 {
                        return Err(MachineParseError::WiredTwice { button, light });
                    }
                    Ok(mask | (1 << light))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if buttons.len() > MAX_BUTTONS {
            return Err(MachineParseError::TooManyButtons(buttons.len()));
        }

        let joltages = joltages
            .split(',')
            .map(parse_number)
            .collect::<Result<Vec<u32>, _>>()?;
        if joltages.len() != width {
            return Err(MachineParseError::JoltageCount {
                expected: width,
                found: joltages.len(),
            });
        }

        let combos = combos(&buttons, width);
        Ok(Self {
            lights,
            buttons,
            joltages,
            combos,
        })
    }

    /// Fewest presses that leave exactly the diagram's lights on.
    pub fn fewest_presses_for_lights(&self) -> Option<u64> {
        self.combos
            .get(&self.lights)?
            .iter()
            .map(|combo| combo.presses)
            .min()
    }

    /// Fewest presses that raise every counter to its joltage level.
    pub fn fewest_presses_for_joltage(&self) -> Option<u64> {
        let cache = DpCache::with_problem(
            HashMapBackend::new(),
            Joltage {
                combos: &self.combos,
            },
        );
        let presses = cache.get(&self.joltages);
        debug!(
            buttons = self.buttons.len(),
            subproblems = cache.into_backend().len(),
            ?presses,
            "configured joltage"
        );
        presses
    }
}

fn combos(buttons: &[u16], width: usize) -> HashMap<u16, Vec<Combo>> {
    let mut combos: HashMap<u16, Vec<Combo>> = HashMap::new();
    for subset in 0u32..1 << buttons.len() {
        let pressed = || {
            buttons
                .iter()
                .enumerate()
                .filter(move |&(idx, _)| subset & (1 << idx) != 0)
                .map(|(_, &mask)| mask)
        };
        let pattern = pressed().fold(0, |acc, mask| acc ^ mask);
        let increments = (0..width)
            .map(|light| pressed().filter(|mask| mask & (1 << light) != 0).count() as u32)
            .collect();
        combos.entry(pattern).or_default().push(Combo {
            presses: u64::from(subset.count_ones()),
            increments,
        });
    }
    combos
}

/// Fewest presses to reach a joltage vector. `None` when it cannot be
/// reached or the count overflows.
struct Joltage<'m> {
    combos: &'m HashMap<u16, Vec<Combo>>,
}

impl Joltage<'_> {
    /// Subsets matching the parity of `target`, with the halved joltage
    /// left over after pressing them.
    fn candidates<'t>(
        &'t self,
        target: &'t [u32],
    ) -> impl Iterator<Item = (u64, Vec<u32>)> + 't {
        let parity = target
            .iter()
            .enumerate()
            .filter(|&(_, level)| level % 2 == 1)
            .fold(0u16, |acc, (idx, _)| acc | (1 << idx));
        self.combos
            .get(&parity)
            .into_iter()
            .flatten()
            .filter_map(move |combo| {
                let rest = target
                    .iter()
                    .zip(&combo.increments)
                    .map(|(&level, &inc)| level.checked_sub(inc).map(|left| left / 2))
                    .collect::<Option<Vec<_>>>()?;
                Some((combo.presses, rest))
            })
    }
}

impl DpProblem<Vec<u32>, Option<u64>> for Joltage<'_> {
    fn deps(&self, target: &Vec<u32>) -> Vec<Vec<u32>> {
        if target.iter().all(|&level| level == 0) {
            return vec![];
        }
        self.candidates(target).map(|(_, rest)| rest).collect()
    }

    fn compute(&self, target: &Vec<u32>, deps: Vec<Option<u64>>) -> Option<u64> {
        if target.iter().all(|&level| level == 0) {
            return Some(0);
        }
        self.candidates(target)
            .zip(deps)
            .filter_map(|((presses, _), rest)| rest?.checked_mul(2)?.checked_add(presses))
            .min()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Machine>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let machines = input
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(line_idx, line)| {
                Machine::parse(line).map_err(|e| {
                    ParseError::InvalidFormat(format!("(line {}) {e}", line_idx + 1))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if machines.is_empty() {
            return Err(ParseError::MissingData("no machines".to_string()));
        }
        Ok(machines)
    }
}

fn total_presses<F>(machines: &[Machine], presses: F) -> Result<u64, MachineError>
where
    F: Fn(usize, &Machine) -> Result<u64, MachineError>,
{
    machines
        .iter()
        .enumerate()
        .try_fold(0u64, |total, (idx, machine)| {
            total
                .checked_add(presses(idx, machine)?)
                .ok_or(MachineError::Overflow)
        })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_presses(shared, |idx, machine| {
            machine
                .fewest_presses_for_lights()
                .ok_or(MachineError::LightsUnreachable(idx))
        })
        .map(|total| total.to_string())
        .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_presses(shared, |idx, machine| {
            machine
                .fewest_presses_for_joltage()
                .ok_or(MachineError::JoltageUnreachable(idx))
        })
        .map(|total| total.to_string())
        .map_err(SolveError::failed)
    }
}
