use crate::error::SolarError;
use log::debug;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
pub struct EnergyResponse {
    pub energy: Energy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Energy {
    #[serde(rename = "timeUnit")]
    pub time_unit: Option<String>,
    pub unit: Option<String>,
    #[serde(rename = "measuredBy")]
    pub measured_by: Option<String>,
    pub values: Vec<EnergySample>,
}

/// One point of the energy series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnergySample {
    #[serde(default, deserialize_with = "deserialize_date_opt")]
    pub date: Option<String>,
    /// Watt-hours.
    #[serde(default)]
    pub value: Option<f64>,
}

fn deserialize_date_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()))
}

pub fn parse_energy(data: &str) -> Result<EnergyResponse, SolarError> {
    let parsed: EnergyResponse = serde_json::from_str(data).map_err(SolarError::PayloadShape)?;
    debug!(
        "Parsed {} energy samples (timeUnit={:?}, unit={:?}, measuredBy={:?})",
        parsed.energy.values.len(),
        parsed.energy.time_unit,
        parsed.energy.unit,
        parsed.energy.measured_by,
    );
    Ok(parsed)
}
