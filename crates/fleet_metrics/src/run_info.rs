//! Run metadata recovered from result-folder names.
//!
//! Folder names encode the run's parameters as dash-separated tokens, e.g.
//! `v2000-c4-w300-p0` or, with date components appended,
//! `v1000-c2-w300-p0-d2-k24-y2017-t1495400400`. The numeric values are read
//! positionally, so the metadata is available without opening the
//! parameter file.

use chrono::NaiveDate;

use fleet_core::tokenize;

use crate::error::PipelineError;

/// Candidate snapshot intervals encoded as `i<step>` in the folder name.
pub const STEP_CANDIDATES: [u32; 4] = [10, 20, 40, 50];
/// Snapshot interval assumed when the folder name names none.
pub const DEFAULT_STEP_SECS: u32 = 30;

/// Date components optionally appended to a run folder name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunDate {
    /// Day of week, 1 = Sunday.
    pub weekday: i64,
    /// Week of year, Sunday-first counting.
    pub week: i64,
    pub year: i64,
    /// Unix timestamp of the simulated day, carried for reference.
    pub timestamp: i64,
}

/// Run parameters encoded in a result folder's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInfo {
    pub n_vehicles: i64,
    pub capacity: i64,
    pub max_waiting_time: i64,
    /// Prediction horizon in seconds; -1 means predictions disabled.
    pub predictions: i64,
    pub date: Option<RunDate>,
}

impl RunInfo {
    /// Parse the dash-separated folder name convention.
    pub fn parse(folder_name: &str) -> Result<Self, PipelineError> {
        let nums = tokenize::integer_tokens(folder_name);
        if nums.len() < 4 {
            return Err(PipelineError::MalformedFolderName(folder_name.to_string()));
        }
        let date = if nums.len() >= 8 {
            Some(RunDate {
                weekday: nums[4],
                week: nums[5],
                year: nums[6],
                timestamp: nums[7],
            })
        } else {
            None
        };
        Ok(Self {
            n_vehicles: nums[0],
            capacity: nums[1],
            max_waiting_time: nums[2],
            predictions: nums[3],
            date,
        })
    }

    /// Midnight at the start of the simulated day, resolved from the
    /// weekday/week/year components.
    pub fn start_date(&self) -> Result<NaiveDate, PipelineError> {
        let date = self.date.ok_or(PipelineError::MissingStartDate)?;
        let spec = format!("{}-{}-{}", date.weekday - 1, date.week, date.year);
        NaiveDate::parse_from_str(&spec, "%w-%U-%Y").map_err(|_| PipelineError::MissingStartDate)
    }
}

/// Snapshot interval for a run, matched from an `i<step>` marker anywhere
/// in the folder path.
pub fn determine_step(folder: &str) -> u32 {
    for step in STEP_CANDIDATES {
        if folder.contains(&format!("i{step}")) {
            return step;
        }
    }
    DEFAULT_STEP_SECS
}
