use crate::client::RawResponse;
use crate::error::SolarError;
use crate::models::{EnergySample, parse_energy};
use reqwest::StatusCode;
use std::fmt;

const HEADER: &str = "\n   Date    |   Wh\n-----------|------\n";
const NO_DATA: &str = "No data";
const DATE_WIDTH: usize = 10;

/// Outcome of a request: a table of samples or the provider's error status.
#[derive(Debug, Clone, PartialEq)]
pub enum EnergyReport {
    Table(Vec<EnergySample>),
    Status(StatusCode),
}

impl EnergyReport {
    /// Only `200 OK` carries a table; its body must match the energy payload.
    pub fn from_response(response: &RawResponse) -> Result<Self, SolarError> {
        if response.status != StatusCode::OK {
            return Ok(EnergyReport::Status(response.status));
        }
        let parsed = parse_energy(&response.body)?;
        Ok(EnergyReport::Table(parsed.energy.values))
    }
}

impl fmt::Display for EnergyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnergyReport::Table(samples) => {
                f.write_str(HEADER)?;
                for sample in samples {
                    writeln!(f, "{} | {}", date_column(sample), value_column(sample))?;
                }
                Ok(())
            }
            EnergyReport::Status(status) => write!(f, "Response status: {}", status.as_u16()),
        }
    }
}

fn date_column(sample: &EnergySample) -> &str {
    match sample.date.as_deref() {
        Some(date) => match date.char_indices().nth(DATE_WIDTH) {
            Some((end, _)) => &date[..end],
            None => date,
        },
        None => NO_DATA,
    }
}

// Truncates toward zero; `+ 0.0` turns -0 into 0 so -0.5 renders as 0.
fn value_column(sample: &EnergySample) -> String {
    match sample.value {
        Some(value) => format!("{:.0}", value.trunc() + 0.0),
        None => NO_DATA.to_string(),
    }
}
