use std::path::{Path, PathBuf};

use bytes::Bytes;
use common_utils::{CustomResult, Request};
use domain_types::{errors::ApiClientError, router_response_types::Response};
use error_stack::ResultExt;
use interfaces::connector_types::ResponseSource;
use serde_json::json;

use crate::service::{debug_log, info_log, Tag};

/// Answers every request with the body of `<dir>/<scenario>.xml`.
///
/// A scenario named after an HTTP error status (e.g. `500`) answers with that status, so
/// failure paths can be exercised without a server.
#[derive(Debug, Clone)]
pub struct FixtureResponseSource {
    dir: PathBuf,
    scenario: String,
}

impl FixtureResponseSource {
    pub fn new(dir: impl Into<PathBuf>, scenario: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            scenario: scenario.into(),
        }
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.xml", self.scenario))
    }

    fn status_code(&self) -> u16 {
        self.scenario
            .parse::<u16>()
            .ok()
            .filter(|status_code| (100..=599).contains(status_code))
            .unwrap_or(200)
    }
}

#[async_trait::async_trait]
impl ResponseSource for FixtureResponseSource {
    async fn fetch(&self, request: Request) -> CustomResult<Response, ApiClientError> {
        let path = self.path();
        debug_log(
            "FIXTURE_REQUEST",
            &json!({ "url": request.url, "method": request.method.to_string() }),
        );

        let body = tokio::fs::read(&path)
            .await
            .change_context(ApiClientError::FixtureNotFound(self.scenario.clone()))
            .attach_printable_lazy(|| format!("fixture path: {}", path.display()))?;

        let status_code = self.status_code();
        info_log(
            "FIXTURE_RESPONSE",
            &json!({ "scenario": self.scenario, "status_code": status_code }),
        );
        tracing::info!(tag = ?Tag::FixtureResponse, scenario = %self.scenario, "Fixture served");

        Ok(Response {
            headers: None,
            response: Bytes::from(body),
            status_code,
        })
    }
}
