//! Run parameter file loading.
//!
//! Every run folder carries a `parameters.txt` of `KEY: VALUE` lines. A
//! value is numeric when it contains a numeric token, otherwise the trimmed
//! string is kept. Only a handful of keys feed the metrics table; the rest
//! are retained for lookup.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use fleet_core::tokenize;

use crate::error::PipelineError;

pub const KEY_FLEET_SIZE: &str = "NUMBER_VEHICLES";
pub const KEY_CAPACITY: &str = "maxPassengersVehicle";
pub const KEY_REBALANCING: &str = "USE_REBALANCING";

/// One parameter value: numeric when it parses as such, else text.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Number(f64),
    Text(String),
}

/// All parameters of one run, keyed by the literal file keys.
#[derive(Debug, Clone, Default)]
pub struct RunParameters {
    values: HashMap<String, ParameterValue>,
}

impl RunParameters {
    /// Load and parse a parameter file.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let text = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        Ok(Self::parse(&text))
    }

    /// Parse parameter text. Lines without a `:` separator are ignored.
    pub fn parse(text: &str) -> Self {
        let mut values = HashMap::new();
        for line in text.lines() {
            let Some((key, raw)) = line.split_once(':') else {
                continue;
            };
            let value = match tokenize::numeric_tokens(raw).first() {
                Some(number) => ParameterValue::Number(*number),
                None => ParameterValue::Text(raw.trim().to_string()),
            };
            values.insert(key.to_string(), value);
        }
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&ParameterValue> {
        self.values.get(key)
    }

    /// Numeric value for `key`, or `MissingParameter` when the key is
    /// absent or non-numeric.
    pub fn number(&self, key: &str) -> Result<f64, PipelineError> {
        match self.values.get(key) {
            Some(ParameterValue::Number(n)) => Ok(*n),
            _ => Err(PipelineError::MissingParameter(key.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The parameters a metrics row records for its run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSettings {
    pub n_vehicles: u32,
    pub capacity: u32,
    pub rebalancing: bool,
    /// Marks runs longer than the standard analysis window.
    pub is_long: bool,
}

impl RunSettings {
    /// Extract the required keys from a loaded parameter file.
    pub fn from_parameters(params: &RunParameters) -> Result<Self, PipelineError> {
        Ok(Self {
            n_vehicles: params.number(KEY_FLEET_SIZE)? as u32,
            capacity: params.number(KEY_CAPACITY)? as u32,
            rebalancing: params.number(KEY_REBALANCING)? != 0.0,
            is_long: true,
        })
    }
}
