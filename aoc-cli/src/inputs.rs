//! Puzzle input lookup on the local filesystem

use crate::error::InputError;
use std::fs;
use std::path::PathBuf;

/// Where puzzle inputs come from
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Directory laid out as `{dir}/{year}_day{day:02}.txt`
    Dir(PathBuf),
    /// One file used for the single selected day
    File(PathBuf),
}

impl InputSource {
    /// Path the input for a year/day is read from
    pub fn path(&self, year: u16, day: u8) -> PathBuf {
        match self {
            InputSource::Dir(dir) => dir.join(format!("{}_day{:02}.txt", year, day)),
            InputSource::File(file) => file.clone(),
        }
    }

    /// Check if the input file exists
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_file()
    }

    /// Read the input for a year/day
    pub fn read(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.path(year, day);
        if !path.is_file() {
            return Err(InputError::Missing(path));
        }
        fs::read_to_string(&path).map_err(|source| InputError::Io { path, source })
    }
}
