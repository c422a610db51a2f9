//! [`DevOpsClient`] over the Azure DevOps REST API.

use std::time::Duration;

use async_trait::async_trait;
use pipeline::{
    AccessToken, BuildDefinition, BuildQueueRequest, DefinitionId, DefinitionReference,
    DevOpsClient, PipelineName, ProjectName, ProjectUrl, QueuedBuild, Release, ReleaseDefinition,
    ReleaseStartRequest, RemoteError, RemoteProjectId,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::endpoints::ServiceEndpoints;
use crate::models::{ErrorBody, ListResponse};

/// REST API version sent with every request.
pub const API_VERSION: &str = "7.1";

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const USER_AGENT: &str = concat!("azure-pipelines-trigger/", env!("CARGO_PKG_VERSION"));

/// How a 404 from an endpoint is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Missing {
    /// The resource does not exist: `Ok(None)`.
    IsNone,
    /// The endpoint itself should exist: error.
    IsError,
}

/// Azure DevOps client authenticated with a personal access token.
pub struct AzureDevOpsClient {
    http: Client,
    endpoints: ServiceEndpoints,
    token: AccessToken,
}

impl AzureDevOpsClient {
    /// Creates a client for the organization owning `project_url`, with
    /// [`DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// [`RemoteError::Transport`] when the HTTP client cannot be built.
    pub fn new(project_url: &ProjectUrl, token: AccessToken) -> Result<Self, RemoteError> {
        Self::with_timeout(project_url, token, DEFAULT_TIMEOUT)
    }

    /// Creates a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// [`RemoteError::Transport`] when the HTTP client cannot be built.
    pub fn with_timeout(
        project_url: &ProjectUrl,
        token: AccessToken,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(transport)?;

        Ok(Self {
            http,
            endpoints: ServiceEndpoints::for_project(project_url),
            token,
        })
    }

    /// The base URLs this client talks to.
    pub fn endpoints(&self) -> &ServiceEndpoints {
        &self.endpoints
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .query(&[("api-version", API_VERSION)])
            .basic_auth("", Some(self.token.expose()))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        missing: Missing,
    ) -> Result<Option<T>, RemoteError> {
        debug!(%url, "GET");
        let response = self
            .authorize(self.http.get(url).query(query))
            .send()
            .await
            .map_err(transport)?;
        read_response(response, missing).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<Option<T>, RemoteError> {
        debug!(%url, "POST");
        let response = self
            .authorize(self.http.post(url).query(query).json(body))
            .send()
            .await
            .map_err(transport)?;
        read_response(response, Missing::IsError).await
    }

    fn build_url(&self, project: &str, resource: &str) -> String {
        format!(
            "{}/{}/_apis/build/{}",
            self.endpoints.collection(),
            project,
            resource
        )
    }

    fn release_url(&self, project: &str, resource: &str) -> String {
        format!(
            "{}/{}/_apis/release/{}",
            self.endpoints.release(),
            project,
            resource
        )
    }
}

#[async_trait]
impl DevOpsClient for AzureDevOpsClient {
    async fn get_definitions(
        &self,
        project: &ProjectName,
        name: &PipelineName,
    ) -> Result<Vec<DefinitionReference>, RemoteError> {
        let url = self.build_url(project.as_str(), "definitions");
        let list: Option<ListResponse<DefinitionReference>> = self
            .get(&url, &[("name", name.as_str())], Missing::IsError)
            .await?;
        Ok(list.map(|l| l.value).unwrap_or_default())
    }

    async fn get_definition(
        &self,
        project: &ProjectName,
        id: DefinitionId,
    ) -> Result<Option<BuildDefinition>, RemoteError> {
        let url = self.build_url(project.as_str(), &format!("definitions/{id}"));
        self.get(&url, &[], Missing::IsNone).await
    }

    async fn queue_build(
        &self,
        project_id: &RemoteProjectId,
        request: &BuildQueueRequest,
    ) -> Result<Option<QueuedBuild>, RemoteError> {
        let url = self.build_url(project_id.as_str(), "builds");
        self.post(&url, &[("ignoreWarnings", "true")], request).await
    }

    async fn get_release_definitions(
        &self,
        project: &ProjectName,
        name: &PipelineName,
    ) -> Result<Vec<ReleaseDefinition>, RemoteError> {
        let url = self.release_url(project.as_str(), "definitions");
        let query = [
            ("searchText", name.as_str()),
            ("isExactNameMatch", "true"),
            ("$expand", "artifacts"),
        ];
        let list: Option<ListResponse<ReleaseDefinition>> =
            self.get(&url, &query, Missing::IsError).await?;
        Ok(list.map(|l| l.value).unwrap_or_default())
    }

    async fn get_release_definition(
        &self,
        project: &ProjectName,
        id: DefinitionId,
    ) -> Result<Option<ReleaseDefinition>, RemoteError> {
        let url = self.release_url(project.as_str(), &format!("definitions/{id}"));
        self.get(&url, &[], Missing::IsNone).await
    }

    async fn create_release(
        &self,
        project: &ProjectName,
        request: &ReleaseStartRequest,
    ) -> Result<Option<Release>, RemoteError> {
        let url = self.release_url(project.as_str(), "releases");
        self.post(&url, &[], request).await
    }
}

fn transport(err: reqwest::Error) -> RemoteError {
    RemoteError::Transport {
        message: err.to_string(),
    }
}

async fn read_response<T: DeserializeOwned>(
    response: reqwest::Response,
    missing: Missing,
) -> Result<Option<T>, RemoteError> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    decode_response(status.as_u16(), status.canonical_reason(), &body, missing)
}

/// Interprets a status and body.
///
/// Azure DevOps answers an unusable token with `203 Non-Authoritative` and a
/// sign-in page rather than `401`, so 203 is treated as an authentication failure.
fn decode_response<T: DeserializeOwned>(
    status: u16,
    reason: Option<&str>,
    body: &str,
    missing: Missing,
) -> Result<Option<T>, RemoteError> {
    if status == 404 && missing == Missing::IsNone {
        return Ok(None);
    }
    if status == 203 {
        return Err(RemoteError::Status {
            status,
            message: "authentication failed; check the access token".to_string(),
        });
    }
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| reason.unwrap_or("request failed").to_string());
        return Err(RemoteError::Status { status, message });
    }

    let body = body.trim();
    if body.is_empty() || body == "null" {
        return Ok(None);
    }
    serde_json::from_str(body)
        .map(Some)
        .map_err(|e| RemoteError::Decode {
            message: e.to_string(),
        })
}
