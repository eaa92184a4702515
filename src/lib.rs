//! Fetch a site's energy history from the SolarEdge monitoring API and
//! render it as a plain-text table.
//!
//! API documentation:
//! <https://www.solaredge.com/sites/default/files/se_monitoring_api.pdf>

pub mod client;
pub mod config;
pub mod dates;
pub mod error;
pub mod models;
pub mod report;

pub use client::{Client, EnergyRequest, RawResponse};
pub use config::{Config, default_config_path};
pub use error::{ConfigError, SolarError};
pub use models::EnergySample;
pub use report::EnergyReport;

use chrono::NaiveDate;
use log::info;

/// Request the configured date range and format the response.
pub async fn fetch_energy_report(
    client: &Client,
    config: &Config,
    today: NaiveDate,
) -> Result<EnergyReport, SolarError> {
    let request = EnergyRequest::from_config(config, today)?;
    info!(
        "Fetching {} energy for site {} from {} to {}",
        request.time_unit, config.site_id, request.start_date, request.end_date
    );
    let response = client.execute(&request).await?;
    EnergyReport::from_response(&response)
}
