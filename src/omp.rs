//! # OMP project-information service client
//!
//! Remote lookup of observing-program metadata (title, principal
//! investigator) by validated project code. The client keeps one persistent
//! blocking HTTP agent with a global timeout and treats a `404` as "project
//! unknown", not as a failure.
//!
//! [`ProjectInfoSource`] is the contract the orchestrator resolves proposals
//! through; the local [`crate::proposals::Proposals`] registry implements the
//! same contract and serves as the fallback source.

use std::time::Duration;

use serde::Deserialize;
use ureq::Agent;

use crate::ingest_errors::IngestionError;

/// Resolved observing-program metadata. Either field may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectInfo {
    pub title: Option<String>,
    pub pi: Option<String>,
}

/// A source of observing-program metadata, queried by project code.
pub trait ProjectInfoSource {
    /// Look up a project. `Ok(None)` means the source does not know the
    /// project; an error means the lookup itself failed.
    fn project_info(&self, project_id: &str) -> Result<Option<ProjectInfo>, IngestionError>;
}

/// HTTP client for the remote OMP project-information service.
#[derive(Debug, Clone)]
pub struct Omp {
    http_client: Agent,
    base_url: String,
}

impl Omp {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: &str) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(10)))
            .build();

        Omp {
            http_client: config.into(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn project_url(&self, project_id: &str) -> String {
        // Project codes contain slashes; keep them out of the path segments.
        format!("{}/project/{}", self.base_url, project_id.replace('/', "%2F"))
    }
}

impl ProjectInfoSource for Omp {
    fn project_info(&self, project_id: &str) -> Result<Option<ProjectInfo>, IngestionError> {
        let url = self.project_url(project_id);

        match self.http_client.get(url.as_str()).call() {
            Ok(mut response) => {
                let body = response
                    .body_mut()
                    .read_to_string()
                    .map_err(|e| IngestionError::ProjectService(e.to_string()))?;
                let info: ProjectInfo = serde_json::from_str(&body)
                    .map_err(|e| IngestionError::ProjectService(e.to_string()))?;
                Ok(Some(info))
            }
            Err(ureq::Error::StatusCode(404)) => Ok(None),
            Err(e) => Err(IngestionError::ProjectService(e.to_string())),
        }
    }
}
