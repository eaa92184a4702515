use crate::config::Config;
use crate::dates::{DATE_FORMAT, days_back};
use crate::error::SolarError;
use chrono::NaiveDate;
use log::{debug, info};
use reqwest::{Client as HttpClient, StatusCode, Url};
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A GET against a site's energy endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnergyRequest {
    pub address: String,
    pub api_key: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub time_unit: String,
}

impl EnergyRequest {
    /// Resolve the configured offsets against `today`.
    ///
    /// The range is not checked for order; the provider decides what an
    /// inverted range means.
    pub fn from_config(config: &Config, today: NaiveDate) -> Result<Self, SolarError> {
        Ok(Self {
            address: config.address.clone(),
            api_key: config.api_key.clone(),
            start_date: days_back(today, config.start)?,
            end_date: days_back(today, config.end)?,
            time_unit: config.unit.clone(),
        })
    }

    pub fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("api_key", self.api_key.clone()),
            ("startDate", self.start_date.format(DATE_FORMAT).to_string()),
            ("endDate", self.end_date.format(DATE_FORMAT).to_string()),
            ("timeUnit", self.time_unit.clone()),
        ]
    }

    pub fn url(&self) -> Result<Url, SolarError> {
        self.url_with_key(&self.api_key)
    }

    /// The request URL with `<api_key>` in place of the key, for logging.
    pub fn redacted_url(&self) -> Result<Url, SolarError> {
        self.url_with_key("<api_key>")
    }

    fn url_with_key(&self, api_key: &str) -> Result<Url, SolarError> {
        let mut pairs = self.query_pairs();
        pairs[0].1 = api_key.to_string();
        Url::parse_with_params(&self.address, pairs)
            .map_err(|_| SolarError::InvalidUrl(self.address.clone()))
    }
}

/// Status and body of a completed request, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
}

impl Client {
    /// Create a client with the default request timeout.
    pub fn new() -> Result<Self, SolarError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, SolarError> {
        let http = HttpClient::builder().timeout(timeout).build()?;
        info!("Initialized SolarEdge client with {}s timeout", timeout.as_secs());
        Ok(Self { http })
    }

    /// Send the request. Non-success statuses are returned, not raised.
    pub async fn execute(&self, request: &EnergyRequest) -> Result<RawResponse, SolarError> {
        let url = request.url()?;
        debug!("GET request to {}", request.redacted_url()?);
        let response = self.http.get(url).send().await?;
        let status = response.status();
        debug!("Received status {}", status);
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    const CONFIG: &str = r#"{
        "site_id": "777",
        "api_key": "KEY 1&2",
        "start": -7,
        "end": 0,
        "unit": "QUARTER_OF_AN_HOUR"
    }"#;

    fn config() -> Config {
        Config::from_json(CONFIG).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    #[test]
    fn builds_request_from_config() {
        let request = EnergyRequest::from_config(&config(), today()).unwrap();
        assert_eq!(
            request.address,
            "https://monitoringapi.solaredge.com/site/777/energy"
        );
        assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(request.end_date, today());
        assert_eq!(request.time_unit, "QUARTER_OF_AN_HOUR");
    }

    #[test]
    fn query_has_exactly_four_keys() {
        let request = EnergyRequest::from_config(&config(), today()).unwrap();
        let pairs = request.query_pairs();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["api_key", "startDate", "endDate", "timeUnit"]);
        assert_eq!(pairs[1].1, "2024-06-03");
        assert_eq!(pairs[2].1, "2024-06-10");
        for (_, date) in &pairs[1..3] {
            assert!(NaiveDate::parse_from_str(date, DATE_FORMAT).is_ok());
        }
    }

    #[test]
    fn inverted_range_is_passed_through() {
        let mut config = config();
        config.start = 0;
        config.end = -3;
        let request = EnergyRequest::from_config(&config, today()).unwrap();
        assert!(request.start_date > request.end_date);
    }

    #[test]
    fn url_encodes_query() {
        let request = EnergyRequest::from_config(&config(), today()).unwrap();
        let url = request.url().unwrap();
        assert_eq!(url.path(), "/site/777/energy");
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(query[0], ("api_key".to_string(), "KEY 1&2".to_string()));
        assert_eq!(query.len(), 4);
    }

    #[test]
    fn redacted_url_hides_encoded_key() {
        let mut request = EnergyRequest::from_config(&config(), today()).unwrap();
        request.api_key = "AB+C/D=".to_string();
        let url = request.redacted_url().unwrap();
        let logged = url.as_str();
        assert!(!logged.contains("AB%2BC%2FD%3D"));
        assert!(!logged.contains("AB+C/D="));
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "api_key");
        assert_eq!(value, "<api_key>");
        assert_eq!(url.query_pairs().count(), 4);
        assert_eq!(request.url().unwrap().query_pairs().next().unwrap().1, "AB+C/D=");
    }

    #[test]
    fn bad_address_is_invalid_url() {
        let mut request = EnergyRequest::from_config(&config(), today()).unwrap();
        request.address = "not a url".to_string();
        assert!(matches!(request.url(), Err(SolarError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn executes_get_with_query() {
        let mut server = Server::new_async().await;
        let body = json!({ "energy": { "values": [] } }).to_string();
        let mock = server
            .mock("GET", "/site/777/energy")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("api_key".into(), "KEY 1&2".into()),
                Matcher::UrlEncoded("startDate".into(), "2024-06-03".into()),
                Matcher::UrlEncoded("endDate".into(), "2024-06-10".into()),
                Matcher::UrlEncoded("timeUnit".into(), "QUARTER_OF_AN_HOUR".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(&body)
            .create_async()
            .await;

        let config = config().with_base_url(&server.url());
        let request = EnergyRequest::from_config(&config, today()).unwrap();
        let response = Client::new().unwrap().execute(&request).await.unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, body);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_is_returned_not_raised() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/site/777/energy")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body("Invalid token")
            .create_async()
            .await;

        let config = config().with_base_url(&server.url());
        let request = EnergyRequest::from_config(&config, today()).unwrap();
        let response = Client::new().unwrap().execute(&request).await.unwrap();

        assert_eq!(response.status, StatusCode::FORBIDDEN);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn connection_failure_is_http_error() {
        let config = config().with_base_url("http://127.0.0.1:1");
        let request = EnergyRequest::from_config(&config, today()).unwrap();
        let result = Client::with_timeout(Duration::from_secs(2))
            .unwrap()
            .execute(&request)
            .await;
        assert!(matches!(result, Err(SolarError::Http(_))));
    }
}
