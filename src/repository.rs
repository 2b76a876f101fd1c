//! # Archive repository client
//!
//! The external archive service storing canonical observation records by
//! `caom2:` URI. The core only depends on the [`Repository`] contract; the
//! orchestrator selects insert vs. update from whether its own earlier
//! `get` found the record.
//!
//! [`HttpRepository`] is the default client: records travel as XML bodies,
//! a `404` on `get` means "not in the repository".

use std::time::Duration;

use ureq::Agent;

use crate::caom2::xml::to_xml_string;
use crate::caom2::Observation;
use crate::constants::CAOM_URI_PREFIX;
use crate::ingest_errors::IngestionError;

/// Storage contract for canonical records.
pub trait Repository {
    /// Fetch a record by canonical URI; `Ok(None)` when not present.
    fn get(&self, uri: &str) -> Result<Option<Observation>, IngestionError>;

    /// Insert a record that is not yet in the repository.
    fn put(&self, observation: &Observation) -> Result<(), IngestionError>;

    /// Replace a record already in the repository.
    fn update(&self, observation: &Observation) -> Result<(), IngestionError>;
}

/// Canonical URI of a record (`caom2:UKIRT/<id>`).
pub fn record_uri(observation: &Observation) -> String {
    format!("{CAOM_URI_PREFIX}{}", observation.observation_id)
}

/// HTTP client for a remote record repository.
#[derive(Debug, Clone)]
pub struct HttpRepository {
    http_client: Agent,
    base_url: String,
}

impl HttpRepository {
    pub fn new(base_url: &str) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build();

        HttpRepository {
            http_client: config.into(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn record_url(&self, uri: &str) -> String {
        format!("{}/{}", self.base_url, uri.replace('/', "%2F"))
    }

    fn repository_error(uri: &str, message: impl ToString) -> IngestionError {
        IngestionError::Repository {
            uri: uri.to_owned(),
            message: message.to_string(),
        }
    }
}

impl Repository for HttpRepository {
    fn get(&self, uri: &str) -> Result<Option<Observation>, IngestionError> {
        match self.http_client.get(self.record_url(uri).as_str()).call() {
            Ok(mut response) => {
                let body = response
                    .body_mut()
                    .read_to_string()
                    .map_err(|e| Self::repository_error(uri, e))?;
                let observation = quick_xml::de::from_str(&body)
                    .map_err(|e| Self::repository_error(uri, e))?;
                Ok(Some(observation))
            }
            Err(ureq::Error::StatusCode(404)) => Ok(None),
            Err(e) => Err(Self::repository_error(uri, e)),
        }
    }

    fn put(&self, observation: &Observation) -> Result<(), IngestionError> {
        let uri = record_uri(observation);
        let body = to_xml_string(observation)?;
        self.http_client
            .post(self.record_url(&uri).as_str())
            .header("content-type", "application/xml")
            .send(body.as_str())
            .map_err(|e| Self::repository_error(&uri, e))?;
        Ok(())
    }

    fn update(&self, observation: &Observation) -> Result<(), IngestionError> {
        let uri = record_uri(observation);
        let body = to_xml_string(observation)?;
        self.http_client
            .put(self.record_url(&uri).as_str())
            .header("content-type", "application/xml")
            .send(body.as_str())
            .map_err(|e| Self::repository_error(&uri, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod repository_test {
    use super::*;

    #[test]
    fn test_record_uri() {
        let obs = Observation::new("UKIRT", "a20230101_00042");
        assert_eq!(record_uri(&obs), "caom2:UKIRT/a20230101_00042");
    }

    #[test]
    fn test_record_url_encodes_uri() {
        let repo = HttpRepository::new("https://archive.example/caom2repo/");
        assert_eq!(
            repo.record_url("caom2:UKIRT/a20230101_00042"),
            "https://archive.example/caom2repo/caom2:UKIRT%2Fa20230101_00042"
        );
    }
}
